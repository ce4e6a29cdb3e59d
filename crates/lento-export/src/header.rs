//! Canonical 44-byte RIFF/WAVE header.
//!
//! Layout (all integers little-endian):
//!
//! | Offset | Size | Field                        |
//! |--------|------|------------------------------|
//! | 0      | 4    | `"RIFF"`                     |
//! | 4      | 4    | `36 + data_len`              |
//! | 8      | 4    | `"WAVE"`                     |
//! | 12     | 4    | `"fmt "`                     |
//! | 16     | 4    | `16` (fmt chunk size)        |
//! | 20     | 2    | `1` (PCM)                    |
//! | 22     | 2    | channels                     |
//! | 24     | 4    | sample rate                  |
//! | 28     | 4    | byte rate                    |
//! | 32     | 2    | block align                  |
//! | 34     | 2    | bits per sample              |
//! | 36     | 4    | `"data"`                     |
//! | 40     | 4    | `data_len`                   |

use crate::error::{ExportError, Result};
use lento_core::MAX_DATA_BYTES;

/// Header length in bytes.
pub const HEADER_LEN: usize = 44;

/// Bytes per encoded sample (16-bit PCM).
pub const BYTES_PER_SAMPLE: usize = 2;

/// PCM format tag.
pub const FORMAT_PCM: u16 = 1;

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_len: u32,
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

impl WavHeader {
    /// Header for 16-bit PCM with the given layout.
    ///
    /// Fails when the data chunk or byte rate does not fit its 32-bit field.
    pub fn pcm16(channels: u16, sample_rate: u32, frames: usize) -> Result<Self> {
        let block_align = channels
            .checked_mul(BYTES_PER_SAMPLE as u16)
            .ok_or_else(|| too_large("block align", channels))?;
        let data_len = (frames as u64)
            .checked_mul(block_align as u64)
            .filter(|&len| len <= MAX_DATA_BYTES)
            .ok_or_else(|| {
                too_large("data chunk", format!("{} frames x {} channels", frames, channels))
            })? as u32;
        let byte_rate = sample_rate
            .checked_mul(block_align as u32)
            .ok_or_else(|| too_large("byte rate", sample_rate))?;

        Ok(Self {
            riff_len: 36 + data_len,
            format_tag: FORMAT_PCM,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: 16,
            data_len,
        })
    }

    /// Parse the first 44 bytes of a container.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(ExportError::InvalidData(format!(
                "container is {} bytes, header needs {}",
                bytes.len(),
                HEADER_LEN
            )));
        }

        expect_tag(bytes, 0, b"RIFF")?;
        expect_tag(bytes, 8, b"WAVE")?;
        expect_tag(bytes, 12, b"fmt ")?;
        expect_tag(bytes, 36, b"data")?;

        let fmt_len = read_u32(bytes, 16);
        if fmt_len != 16 {
            return Err(ExportError::InvalidData(format!(
                "fmt chunk is {} bytes, expected 16",
                fmt_len
            )));
        }

        let header = Self {
            riff_len: read_u32(bytes, 4),
            format_tag: read_u16(bytes, 20),
            channels: read_u16(bytes, 22),
            sample_rate: read_u32(bytes, 24),
            byte_rate: read_u32(bytes, 28),
            block_align: read_u16(bytes, 32),
            bits_per_sample: read_u16(bytes, 34),
            data_len: read_u32(bytes, 40),
        };

        if header.block_align == 0 {
            return Err(ExportError::InvalidData("block align is zero".into()));
        }
        Ok(header)
    }

    /// Serialize to the 44-byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.riff_len.to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&16u32.to_le_bytes());
        out[20..22].copy_from_slice(&self.format_tag.to_le_bytes());
        out[22..24].copy_from_slice(&self.channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_len.to_le_bytes());
        out
    }

    /// Frames (samples per channel) in the data chunk.
    pub fn frame_count(&self) -> usize {
        self.data_len as usize / self.block_align as usize
    }

    /// Total container length implied by the header.
    pub fn total_len(&self) -> usize {
        HEADER_LEN + self.data_len as usize
    }
}

fn expect_tag(bytes: &[u8], offset: usize, tag: &[u8; 4]) -> Result<()> {
    if &bytes[offset..offset + 4] != tag {
        return Err(ExportError::InvalidData(format!(
            "expected {:?} at offset {}",
            String::from_utf8_lossy(tag),
            offset
        )));
    }
    Ok(())
}

fn too_large(field: &str, value: impl std::fmt::Display) -> ExportError {
    ExportError::Encoding(format!("{} overflows the WAV header: {}", field, value))
}

#[inline]
fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
