//! The speed-change pipeline: rate conversion, normalization, encoding.

use crate::builder::ProcessorBuilder;
use crate::Result;
use lento_core::{AudioAsset, SampleBuffer, SpeedMode, StretchParameters};
use lento_dsp::{granular_stretch_with_window, resample_linear, GranularConfig, HannWindow};
use lento_export::{encode_wav, EncodedContainer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessProgress {
    pub phase: ProcessPhase,
    /// Progress within current phase (0.0 to 1.0).
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessPhase {
    /// Speed change, including per-channel normalization when pitch is kept.
    Stretching,
    Encoding,
}

/// Applies one set of [`StretchParameters`] to audio assets.
///
/// Holds no per-call state, so one processor can be shared across threads
/// and used for any number of files.
///
/// # Example
/// ```ignore
/// let processor = Processor::builder()
///     .speed(0.5)
///     .preserve_pitch(true)
///     .build()?;
///
/// let container = processor.process(&asset)?;
/// std::fs::write("lecture_slowed.wav", container.as_bytes())?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Processor {
    params: StretchParameters,
}

impl Processor {
    pub fn builder() -> ProcessorBuilder {
        ProcessorBuilder::default()
    }

    /// Fails with an invalid-parameter error when `speed <= 0` or not finite.
    pub fn new(params: StretchParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &StretchParameters {
        &self.params
    }

    /// Change the speed of every channel and return the new asset.
    ///
    /// The input is never modified. Pitch-preserving output is normalized per
    /// channel; resampled output is not.
    pub fn stretch(&self, asset: &AudioAsset) -> Result<AudioAsset> {
        self.stretch_impl(asset, &|_| {})
    }

    /// Stretch and encode as a 16-bit PCM WAV container.
    pub fn process(&self, asset: &AudioAsset) -> Result<EncodedContainer> {
        self.process_with_progress(asset, |_| {})
    }

    pub fn process_with_progress(
        &self,
        asset: &AudioAsset,
        on_progress: impl Fn(ProcessProgress),
    ) -> Result<EncodedContainer> {
        let stretched = self.stretch_impl(asset, &on_progress)?;

        report(&on_progress, ProcessPhase::Encoding, 0.0);
        let container = encode_wav(&stretched)?;
        report(&on_progress, ProcessPhase::Encoding, 1.0);

        Ok(container)
    }

    fn stretch_impl(
        &self,
        asset: &AudioAsset,
        on_progress: &dyn Fn(ProcessProgress),
    ) -> Result<AudioAsset> {
        self.params.validate_for(asset)?;
        let speed = self.params.speed;

        tracing::debug!(
            channels = asset.channel_count(),
            frames = asset.frames(),
            sample_rate = asset.sample_rate(),
            speed,
            mode = ?self.params.mode(),
            "stretching"
        );

        report(on_progress, ProcessPhase::Stretching, 0.0);
        let channels = match self.params.mode() {
            SpeedMode::Resample => map_channels(asset.channels(), |ch| resample_linear(ch, speed))?,
            SpeedMode::Granular => {
                let config = GranularConfig::default();
                let window = HannWindow::new(config.frame_size);
                map_channels(asset.channels(), |ch| {
                    granular_stretch_with_window(ch, speed, &config, &window)
                        .map(|(buffer, _)| buffer)
                })?
            }
        };
        report(on_progress, ProcessPhase::Stretching, 1.0);

        Ok(AudioAsset::new(channels, asset.sample_rate())?)
    }
}

/// Stretch an asset without encoding it.
pub fn stretch(asset: &AudioAsset, params: &StretchParameters) -> Result<AudioAsset> {
    Processor::new(*params)?.stretch(asset)
}

/// Stretch an asset and encode the result.
pub fn process(asset: &AudioAsset, params: &StretchParameters) -> Result<EncodedContainer> {
    Processor::new(*params)?.process(asset)
}

/// [`process`] with per-phase progress callbacks.
pub fn process_with_progress(
    asset: &AudioAsset,
    params: &StretchParameters,
    on_progress: impl Fn(ProcessProgress),
) -> Result<EncodedContainer> {
    Processor::new(*params)?.process_with_progress(asset, on_progress)
}

#[inline]
fn report(on_progress: &dyn Fn(ProcessProgress), phase: ProcessPhase, progress: f32) {
    on_progress(ProcessProgress { phase, progress });
}

/// Apply a per-channel transform, in parallel when the `parallel` feature is on.
/// Channel order is preserved.
fn map_channels<F>(channels: &[SampleBuffer], f: F) -> Result<Vec<SampleBuffer>>
where
    F: Fn(&[f32]) -> lento_dsp::Result<SampleBuffer> + Send + Sync,
{
    #[cfg(feature = "parallel")]
    let mapped = {
        use rayon::prelude::*;
        channels
            .par_iter()
            .map(|ch| f(ch))
            .collect::<lento_dsp::Result<Vec<_>>>()
    };

    #[cfg(not(feature = "parallel"))]
    let mapped = channels
        .iter()
        .map(|ch| f(ch))
        .collect::<lento_dsp::Result<Vec<_>>>();

    Ok(mapped?)
}
