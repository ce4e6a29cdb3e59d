//! Decoded audio: per-channel sample buffers plus a sample rate.

use crate::{Error, Result};

/// One channel of 32-bit float samples, nominally in [-1.0, 1.0].
pub type SampleBuffer = Vec<f32>;

/// Maximum supported channel count (stereo).
pub const MAX_CHANNELS: usize = 2;

/// A decoded recording.
///
/// All channels always have the same length. The fields are private so the
/// invariant can only be established through [`AudioAsset::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAsset {
    channels: Vec<SampleBuffer>,
    sample_rate: u32,
}

impl AudioAsset {
    /// Create an asset from per-channel buffers.
    ///
    /// Fails with [`Error::ChannelMismatch`] when channels differ in length.
    /// Mismatched channels are never truncated to the shortest one.
    pub fn new(channels: Vec<SampleBuffer>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() || channels.len() > MAX_CHANNELS {
            return Err(Error::InvalidChannelCount(channels.len()));
        }
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }

        let expected = channels[0].len();
        if let Some((channel, buffer)) = channels
            .iter()
            .enumerate()
            .find(|(_, buffer)| buffer.len() != expected)
        {
            return Err(Error::ChannelMismatch {
                channel,
                expected,
                actual: buffer.len(),
            });
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    pub fn mono(samples: SampleBuffer, sample_rate: u32) -> Result<Self> {
        Self::new(vec![samples], sample_rate)
    }

    pub fn stereo(left: SampleBuffer, right: SampleBuffer, sample_rate: u32) -> Result<Self> {
        Self::new(vec![left, right], sample_rate)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[SampleBuffer] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<SampleBuffer> {
        self.channels
    }
}
