//! Centralized error type for the lento umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] lento_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] lento_dsp::Error),

    #[error("Export: {0}")]
    Export(#[from] lento_export::ExportError),
}

impl Error {
    /// Bad speed, empty input for a pitch-preserving stretch, or bad grain config.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Error::Core(lento_core::Error::InvalidParameter(_))
                | Error::Dsp(lento_dsp::Error::InvalidParameter(_))
                | Error::Dsp(lento_dsp::Error::InvalidConfig(_))
                | Error::Dsp(lento_dsp::Error::Core(
                    lento_core::Error::InvalidParameter(_)
                ))
        )
    }

    pub fn is_channel_mismatch(&self) -> bool {
        matches!(
            self,
            Error::Core(lento_core::Error::ChannelMismatch { .. })
                | Error::Dsp(lento_dsp::Error::Core(
                    lento_core::Error::ChannelMismatch { .. }
                ))
                | Error::Export(lento_export::ExportError::Asset(
                    lento_core::Error::ChannelMismatch { .. }
                ))
        )
    }

    /// Failure reported by the decoder rather than by this crate.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Error::Export(lento_export::ExportError::Decode(_)))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
