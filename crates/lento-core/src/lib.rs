//! Data model shared by the lento crates.
//!
//! - [`AudioAsset`]: equal-length per-channel sample buffers plus a sample rate
//! - [`StretchParameters`]: speed factor and pitch-preservation flag
//! - [`Error`]: parameter and channel-layout validation failures

mod asset;
mod error;
mod params;

pub use asset::{AudioAsset, SampleBuffer, MAX_CHANNELS};
pub use error::{Error, Result};
pub use params::{
    checked_output_frames, max_output_frames, output_frames, validate_speed, SpeedMode,
    StretchParameters, MAX_DATA_BYTES,
};
