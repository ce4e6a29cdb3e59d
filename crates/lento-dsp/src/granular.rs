//! Overlap-add granular time-stretching.
//!
//! Changes duration while keeping pitch by cutting the input into windowed
//! grains and laying them back down at a different spacing.
//!
//! ## Algorithm
//!
//! 1. **Grain extraction**: take `frame_size` samples every `analysis_hop`
//!    input samples and apply a Hann window
//! 2. **Smoothing**: a short moving average suppresses grain-boundary clicks
//! 3. **Overlap-add**: window again and accumulate every `synthesis_hop`
//!    output samples, where `synthesis_hop = floor(analysis_hop / speed)`
//! 4. **Normalization**: one gain per channel fixes clipping or lost energy
//!
//! Accumulation stops at the last grain that fits entirely in both the input
//! and the output. Output samples past that grain stay at zero.

use crate::normalize::{normalize, NormalizeAction};
use crate::smoothing::{smooth_with_radius, DEFAULT_SMOOTHING_RADIUS};
use crate::window::HannWindow;
use crate::{Error, Result};
use lento_core::{checked_output_frames, output_frames, SampleBuffer};

/// Grain geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GranularConfig {
    /// Grain length in samples.
    pub frame_size: usize,
    /// `analysis_hop = frame_size / analysis_hop_divisor` (75% overlap at 4).
    pub analysis_hop_divisor: usize,
    /// Moving-average radius applied to each grain.
    pub smoothing_radius: usize,
}

impl Default for GranularConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            analysis_hop_divisor: 4,
            smoothing_radius: DEFAULT_SMOOTHING_RADIUS,
        }
    }
}

impl GranularConfig {
    pub fn analysis_hop(&self) -> usize {
        self.frame_size
            .checked_div(self.analysis_hop_divisor)
            .unwrap_or(0)
    }

    /// Output step between grains. Zero for extreme speed-ups, in which case
    /// grains pile onto the same output position.
    pub fn synthesis_hop(&self, speed: f64) -> usize {
        (self.analysis_hop() as f64 / speed).floor() as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "frame_size must be at least 2, got {}",
                self.frame_size
            )));
        }
        if self.analysis_hop() == 0 {
            return Err(Error::InvalidConfig(format!(
                "analysis hop is zero (frame_size {} / divisor {})",
                self.frame_size, self.analysis_hop_divisor
            )));
        }
        Ok(())
    }
}

/// Placement of one grain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrainPosition {
    pub input: usize,
    pub output: usize,
}

/// Grain placements for one stretch, in order.
///
/// Yields while `input + frame_size < input_len` and
/// `output + frame_size < output_len`.
#[derive(Debug, Clone)]
pub struct GrainSchedule {
    frame_size: usize,
    analysis_hop: usize,
    synthesis_hop: usize,
    input_len: usize,
    output_len: usize,
    next: GrainPosition,
}

impl GrainSchedule {
    /// `config` must pass [`GranularConfig::validate`].
    pub fn new(input_len: usize, speed: f64, config: &GranularConfig) -> Self {
        Self {
            frame_size: config.frame_size,
            analysis_hop: config.analysis_hop(),
            synthesis_hop: config.synthesis_hop(speed),
            input_len,
            output_len: output_frames(input_len, speed),
            next: GrainPosition {
                input: 0,
                output: 0,
            },
        }
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn synthesis_hop(&self) -> usize {
        self.synthesis_hop
    }

    /// End of the region written by the last grain, or 0 when no grain fits.
    /// Output samples from here on are zero.
    pub fn covered_len(&self) -> usize {
        self.clone()
            .last()
            .map_or(0, |pos| pos.output + self.frame_size)
    }
}

impl Iterator for GrainSchedule {
    type Item = GrainPosition;

    fn next(&mut self) -> Option<GrainPosition> {
        let pos = self.next;
        if pos.input + self.frame_size >= self.input_len
            || pos.output + self.frame_size >= self.output_len
        {
            return None;
        }
        self.next = GrainPosition {
            input: pos.input + self.analysis_hop,
            output: pos.output + self.synthesis_hop,
        };
        Some(pos)
    }
}

/// Stretch one channel by `speed` with pitch preserved, then normalize it.
///
/// Output length is `floor(input.len() / speed)`.
pub fn granular_stretch(input: &[f32], speed: f64) -> Result<SampleBuffer> {
    granular_stretch_with_config(input, speed, &GranularConfig::default())
}

pub fn granular_stretch_with_config(
    input: &[f32],
    speed: f64,
    config: &GranularConfig,
) -> Result<SampleBuffer> {
    let window = HannWindow::new(config.frame_size);
    granular_stretch_with_window(input, speed, config, &window).map(|(output, _)| output)
}

/// Overlap-add followed by normalization, with a caller-provided window.
///
/// Every granular stretch goes through here. Returns the stretched buffer and
/// the gain decision applied to it.
pub fn granular_stretch_with_window(
    input: &[f32],
    speed: f64,
    config: &GranularConfig,
    window: &HannWindow,
) -> Result<(SampleBuffer, NormalizeAction)> {
    let (mut output, grains) = overlap_add(input, speed, config, window)?;
    let action = normalize(&mut output);
    tracing::debug!(
        input_len = input.len(),
        output_len = output.len(),
        speed,
        grains,
        ?action,
        "granular stretch"
    );
    Ok((output, action))
}

/// Overlap-add synthesis without normalization.
///
/// `window` must have `config.frame_size` coefficients; it is taken by
/// reference so callers stretching several channels build it once. Returns
/// the stretched buffer and the number of grains accumulated.
pub fn overlap_add(
    input: &[f32],
    speed: f64,
    config: &GranularConfig,
    window: &HannWindow,
) -> Result<(SampleBuffer, usize)> {
    let output_len = checked_output_frames(input.len(), speed, 1)?;
    config.validate()?;
    if input.is_empty() {
        return Err(Error::InvalidParameter(
            "granular stretch requires a non-empty input".into(),
        ));
    }
    if window.size() != config.frame_size {
        return Err(Error::InvalidConfig(format!(
            "window has {} coefficients, frame_size is {}",
            window.size(),
            config.frame_size
        )));
    }

    let schedule = GrainSchedule::new(input.len(), speed, config);
    debug_assert_eq!(schedule.output_len(), output_len);
    let mut output = vec![0.0_f32; output_len];
    let mut grain = vec![0.0_f32; config.frame_size];
    let mut grains = 0;

    for pos in schedule {
        let source = &input[pos.input..pos.input + config.frame_size];
        for ((g, &x), &w) in grain.iter_mut().zip(source).zip(window.iter()) {
            *g = x * w;
        }

        let smoothed = smooth_with_radius(&grain, config.smoothing_radius);

        // zip stops at the end of the output, so a grain never writes past it
        let target = &mut output[pos.output..];
        for ((out, &s), &w) in target.iter_mut().zip(&smoothed).zip(window.iter()) {
            *out += s * w;
        }
        grains += 1;
    }

    tracing::trace!(grains, output_len = output.len(), "overlap-add");
    Ok((output, grains))
}
