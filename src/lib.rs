//! # Lento - Recording Speed Change
//!
//! Changes the playback speed of decoded recordings and encodes the result
//! as 16-bit PCM WAV.
//!
//! ## Architecture
//!
//! Lento is an umbrella crate that coordinates:
//! - **lento-core** - Audio assets, speed parameters, errors
//! - **lento-dsp** - Linear resampler, granular stretcher, normalizer
//! - **lento-export** - WAV container encoding (and decoding with `wav`)
//!
//! Two speed-change modes exist. With `preserve_pitch` off the recording is
//! linearly resampled, so pitch rises and falls with speed. With it on, a
//! Hann-windowed overlap-add stretcher keeps pitch and the result is
//! loudness-normalized per channel.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lento::prelude::*;
//!
//! let asset = decode_wav(&std::fs::read("lecture.wav")?)?;
//!
//! let processor = Processor::builder()
//!     .speed(0.75)
//!     .preserve_pitch(true)
//!     .build()?;
//!
//! let container = processor.process(&asset)?;
//! std::fs::write(output_file_name("lecture.wav", 0.75), container.as_bytes())?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - `wav` and `parallel`
//! - `wav` - WAV input decoding via hound
//! - `parallel` - Stretch channels concurrently with rayon

/// Re-export of lento-core for direct access
pub use lento_core as core;

/// Re-export of lento-dsp for direct access to the stretch primitives
pub use lento_dsp as dsp;

/// Re-export of lento-export for container-level access
pub use lento_export as export;

// Core types
pub use lento_core::{AudioAsset, SampleBuffer, SpeedMode, StretchParameters, MAX_CHANNELS};

// Export types
pub use lento_export::{encode_wav, output_file_name, EncodedContainer, WavHeader, HEADER_LEN};

#[cfg(feature = "wav")]
pub use lento_export::decode_wav;

mod builder;
mod engine;
mod error;

pub use builder::ProcessorBuilder;
pub use engine::{
    process, process_with_progress, stretch, ProcessPhase, ProcessProgress, Processor,
};
pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{
        encode_wav, output_file_name, process, process_with_progress, stretch, AudioAsset,
        EncodedContainer, Error, ProcessPhase, ProcessProgress, Processor, ProcessorBuilder,
        Result, SpeedMode, StretchParameters,
    };

    #[cfg(feature = "wav")]
    pub use crate::decode_wav;
}
