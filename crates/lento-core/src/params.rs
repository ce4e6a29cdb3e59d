//! Speed-change parameters.

use crate::{AudioAsset, Error, Result};

/// Largest RIFF data chunk: the 32-bit RIFF length field also counts the
/// 36 bytes of header that follow it.
pub const MAX_DATA_BYTES: u64 = u32::MAX as u64 - 36;

const BYTES_PER_SAMPLE: u64 = 2;
use serde::{Deserialize, Serialize};

/// Per-file speed-change settings.
///
/// `speed < 1.0` slows the recording down, `speed > 1.0` speeds it up.
/// Output duration is `input duration / speed` for both modes.
///
/// ```
/// use lento_core::{SpeedMode, StretchParameters};
///
/// let params = StretchParameters::new().speed(0.5).preserve_pitch(true);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.mode(), SpeedMode::Granular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StretchParameters {
    /// Playback speed factor (1.0 = unchanged). Must be finite and > 0.
    pub speed: f64,

    /// Keep the original pitch (granular stretch) instead of resampling.
    #[serde(default = "default_preserve_pitch")]
    pub preserve_pitch: bool,
}

fn default_preserve_pitch() -> bool {
    true
}

impl StretchParameters {
    /// Typical lower end of the speed range offered to users.
    pub const TYPICAL_MIN_SPEED: f64 = 0.1;
    /// Typical upper end of the speed range offered to users.
    pub const TYPICAL_MAX_SPEED: f64 = 2.0;

    /// Unity speed with pitch preservation enabled.
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            preserve_pitch: default_preserve_pitch(),
        }
    }

    /// Set the speed factor. Not clamped; checked by [`validate`](Self::validate).
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn preserve_pitch(mut self, preserve: bool) -> Self {
        self.preserve_pitch = preserve;
        self
    }

    pub fn mode(&self) -> SpeedMode {
        if self.preserve_pitch {
            SpeedMode::Granular
        } else {
            SpeedMode::Resample
        }
    }

    /// Whether the speed leaves duration unchanged.
    pub fn is_identity(&self) -> bool {
        (self.speed - 1.0).abs() <= f64::EPSILON
    }

    pub fn is_typical(&self) -> bool {
        (Self::TYPICAL_MIN_SPEED..=Self::TYPICAL_MAX_SPEED).contains(&self.speed)
    }

    /// Reject zero, negative and non-finite speeds.
    pub fn validate(&self) -> Result<()> {
        validate_speed(self.speed)
    }

    /// Validate against a concrete input.
    ///
    /// Pitch-preserving stretch of an empty recording is rejected; plain
    /// resampling of an empty recording yields an empty output. A speed so
    /// low that the result would not fit in a WAV container is rejected
    /// before anything is allocated.
    pub fn validate_for(&self, asset: &AudioAsset) -> Result<()> {
        checked_output_frames(asset.frames(), self.speed, asset.channel_count())?;
        if self.preserve_pitch && asset.is_empty() {
            return Err(Error::InvalidParameter(
                "pitch-preserving stretch requires a non-empty input".into(),
            ));
        }
        Ok(())
    }

    /// Samples per channel after the speed change: `floor(frames / speed)`.
    pub fn output_frames(&self, input_frames: usize) -> usize {
        output_frames(input_frames, self.speed)
    }
}

impl Default for StretchParameters {
    fn default() -> Self {
        Self::new()
    }
}

/// How the speed change is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedMode {
    /// Linear-interpolation resampling. Pitch follows speed.
    Resample,
    /// Overlap-add granular stretch. Pitch is preserved.
    Granular,
}

/// Check that a speed factor is usable.
pub fn validate_speed(speed: f64) -> Result<()> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "speed must be a positive finite number, got {}",
            speed
        )));
    }
    Ok(())
}

/// `floor(input_frames / speed)`.
///
/// `speed` must already have been validated. Saturates for tiny speeds; use
/// [`checked_output_frames`] before allocating.
#[inline]
pub fn output_frames(input_frames: usize, speed: f64) -> usize {
    (input_frames as f64 / speed).floor() as usize
}

/// Most frames per channel a 16-bit WAV with `channels` channels can hold.
pub fn max_output_frames(channels: usize) -> usize {
    let frame_bytes = BYTES_PER_SAMPLE * channels.max(1) as u64;
    usize::try_from(MAX_DATA_BYTES / frame_bytes).unwrap_or(usize::MAX)
}

/// Validate `speed` and return `floor(input_frames / speed)`, rejecting
/// results too long to encode.
pub fn checked_output_frames(input_frames: usize, speed: f64, channels: usize) -> Result<usize> {
    validate_speed(speed)?;
    let frames = (input_frames as f64 / speed).floor();
    let limit = max_output_frames(channels);
    if frames > limit as f64 {
        return Err(Error::InvalidParameter(format!(
            "speed {} would stretch {} frames to {}, more than the {} a WAV container holds",
            speed, input_frames, frames, limit
        )));
    }
    Ok(frames as usize)
}
