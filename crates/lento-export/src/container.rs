//! 16-bit PCM WAV container encoding using hound.
//!
//! The output is always the canonical 44-byte header followed by interleaved
//! little-endian `i16` frames. Mono and stereo assets both fit the plain
//! PCM `fmt ` chunk, so hound never switches to the extensible format here.

use crate::error::{ExportError, Result};
use crate::header::{WavHeader, HEADER_LEN};
use hound::{SampleFormat, WavSpec, WavWriter};
use lento_core::AudioAsset;
use std::io::{Cursor, Seek, Write};

/// Encoded WAV bytes. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedContainer {
    bytes: Vec<u8>,
}

impl EncodedContainer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Parse this container's header.
    pub fn header(&self) -> Result<WavHeader> {
        WavHeader::parse(&self.bytes)
    }

    /// The interleaved PCM payload after the header.
    pub fn data(&self) -> &[u8] {
        &self.bytes[HEADER_LEN.min(self.bytes.len())..]
    }
}

impl AsRef<[u8]> for EncodedContainer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encode an asset as a 16-bit PCM WAV container in memory.
///
/// Produces exactly `44 + frames * channels * 2` bytes. Samples are clamped
/// to [-1.0, 1.0] and rounded to the nearest `i16` step of `1/32767`.
pub fn encode_wav(asset: &AudioAsset) -> Result<EncodedContainer> {
    let channels = asset.channel_count();
    let frames = asset.frames();
    let expected = WavHeader::pcm16(channels as u16, asset.sample_rate(), frames)?;

    let spec = create_wav_spec(asset);
    let mut buffer = Vec::with_capacity(expected.total_len());
    let clamped;
    {
        let cursor = Cursor::new(&mut buffer);
        let mut writer = WavWriter::new(cursor, spec)?;

        clamped = write_interleaved(&mut writer, asset)?;

        // Finalize writes the header lengths and flushes
        writer.finalize()?;
    }

    if buffer.len() != expected.total_len() {
        return Err(ExportError::Encoding(format!(
            "encoder produced {} bytes, expected {}",
            buffer.len(),
            expected.total_len()
        )));
    }

    if clamped > 0 {
        tracing::warn!(clamped, "samples outside [-1.0, 1.0] were clamped");
    }
    tracing::debug!(
        channels,
        frames,
        sample_rate = asset.sample_rate(),
        bytes = buffer.len(),
        "encoded wav"
    );

    Ok(EncodedContainer { bytes: buffer })
}

/// Create hound WavSpec for an asset
fn create_wav_spec(asset: &AudioAsset) -> WavSpec {
    WavSpec {
        channels: asset.channel_count() as u16,
        sample_rate: asset.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Write frames channel-interleaved. Returns how many samples were clamped.
fn write_interleaved<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    asset: &AudioAsset,
) -> Result<usize> {
    let channels = asset.channels();
    let mut clamped = 0;

    for i in 0..asset.frames() {
        for channel in channels {
            let sample = channel[i];
            if !(-1.0..=1.0).contains(&sample) {
                clamped += 1;
            }
            writer.write_sample(float_to_i16(sample))?;
        }
    }

    Ok(clamped)
}

/// Convert float sample to 16-bit integer with clipping
#[inline]
pub fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0).round() as i16
}
