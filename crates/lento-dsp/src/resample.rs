//! Linear-interpolation resampling for speed change without pitch preservation.
//!
//! Reading the input at `speed` samples per output sample shortens or
//! lengthens the recording and shifts its pitch by the same factor.

use crate::Result;
use lento_core::{checked_output_frames, SampleBuffer};

/// Resample one channel by `speed`.
///
/// The output has `floor(input.len() / speed)` samples. Output sample `i`
/// reads the input at position `i * speed` and linearly interpolates between
/// the two neighbouring samples, so it never leaves their range.
///
/// Fails before allocating when the output would not fit a WAV container.
pub fn resample_linear(input: &[f32], speed: f64) -> Result<SampleBuffer> {
    let out_len = checked_output_frames(input.len(), speed, 1)?;
    let output = (0..out_len)
        .map(|i| sample_at(input, i as f64 * speed))
        .collect();

    tracing::trace!(
        input_len = input.len(),
        output_len = out_len,
        speed,
        "linear resample"
    );
    Ok(output)
}

/// Interpolated value at a fractional source position.
#[inline]
fn sample_at(input: &[f32], position: f64) -> f32 {
    let idx = position.floor() as usize;
    let frac = (position - idx as f64) as f32;

    if idx + 1 < input.len() {
        input[idx] * (1.0 - frac) + input[idx + 1] * frac
    } else if idx + 1 == input.len() {
        input[idx]
    } else {
        0.0
    }
}
