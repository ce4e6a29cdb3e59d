//! WAV decoding into an [`AudioAsset`].
//!
//! Stands in for the upstream decoder when the input is already
//! uncompressed PCM. Any decoder failure is surfaced as
//! [`ExportError::Decode`] with hound's message unchanged.

use crate::error::{ExportError, Result};
use hound::{SampleFormat, WavReader};
use lento_core::{AudioAsset, SampleBuffer};
use std::io::Cursor;

/// Decode WAV bytes (8/16/24/32-bit integer or 32-bit float PCM).
pub fn decode_wav(bytes: &[u8]) -> Result<AudioAsset> {
    let reader = WavReader::new(Cursor::new(bytes)).map_err(decode_failure)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(ExportError::Decode("stream declares zero channels".into()));
    }

    let interleaved = read_interleaved(reader, spec.sample_format, spec.bits_per_sample)?;
    if interleaved.len() % channels != 0 {
        return Err(ExportError::Decode(format!(
            "{} samples do not divide into {} channels",
            interleaved.len(),
            channels
        )));
    }

    let buffers = deinterleave(&interleaved, channels);
    tracing::debug!(
        channels,
        frames = buffers[0].len(),
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "decoded wav"
    );
    Ok(AudioAsset::new(buffers, spec.sample_rate)?)
}

fn read_interleaved(
    mut reader: WavReader<Cursor<&[u8]>>,
    format: SampleFormat,
    bits: u16,
) -> Result<Vec<f32>> {
    match format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(decode_failure),
        SampleFormat::Int => {
            if bits == 0 || bits > 32 {
                return Err(ExportError::Decode(format!(
                    "unsupported bit depth {}",
                    bits
                )));
            }
            let scale = 1.0 / (1u64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(decode_failure)
        }
    }
}

fn deinterleave(interleaved: &[f32], channels: usize) -> Vec<SampleBuffer> {
    let frames = interleaved.len() / channels;
    let mut buffers: Vec<SampleBuffer> =
        (0..channels).map(|_| Vec::with_capacity(frames)).collect();
    for frame in interleaved.chunks_exact(channels) {
        for (buffer, &sample) in buffers.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }
    buffers
}

fn decode_failure(e: hound::Error) -> ExportError {
    ExportError::Decode(e.to_string())
}
