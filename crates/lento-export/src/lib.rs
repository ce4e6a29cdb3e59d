//! # Lento Export
//!
//! Packs processed audio into a standard uncompressed container:
//! - **Encoding**: 16-bit PCM WAV in memory via hound, canonical 44-byte header
//! - **Header parsing**: recover channels, sample rate and frame count
//! - **Decoding** (`wav` feature): WAV bytes to an [`AudioAsset`](lento_core::AudioAsset)
//!
//! ```ignore
//! use lento_export::encode_wav;
//!
//! let container = encode_wav(&asset)?;
//! assert_eq!(container.header()?.frame_count(), asset.frames());
//! ```

pub mod error;
pub use error::{ExportError, Result};

mod container;
pub use container::{encode_wav, float_to_i16, EncodedContainer};

pub mod header;
pub use header::{WavHeader, HEADER_LEN};

#[cfg(feature = "wav")]
mod decode;
#[cfg(feature = "wav")]
pub use decode::decode_wav;

mod naming;
pub use naming::output_file_name;
