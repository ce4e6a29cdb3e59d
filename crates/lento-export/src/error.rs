//! Error types for lento-export

use std::io;
use thiserror::Error;

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error while writing the container
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Input could not be decoded. The decoder's message is kept verbatim.
    #[error("Decode failure: {0}")]
    Decode(String),

    /// Malformed container bytes
    #[error("Invalid container data: {0}")]
    InvalidData(String),

    /// Decoded audio violates the asset invariants
    #[error(transparent)]
    Asset(#[from] lento_core::Error),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

// External library errors are flattened at the API boundary
impl From<hound::Error> for ExportError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => ExportError::Io(io),
            other => ExportError::Encoding(other.to_string()),
        }
    }
}
