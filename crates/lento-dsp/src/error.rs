//! Error types for lento-dsp

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] lento_core::Error),
}

impl Error {
    /// Bad speed or input, whether caught here or by core validation.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter(_) | Error::Core(lento_core::Error::InvalidParameter(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
