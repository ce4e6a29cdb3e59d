//! Error types for lento-core.

use thiserror::Error;

/// Error type for data model and parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    ChannelMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid channel count: {0}. Must be 1 (mono) or 2 (stereo)")]
    InvalidChannelCount(usize),

    #[error("Invalid sample rate: {0}. Must be non-zero")]
    InvalidSampleRate(u32),
}

/// Result type for lento-core operations.
pub type Result<T> = std::result::Result<T, Error>;
