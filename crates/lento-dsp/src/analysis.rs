//! Signal level measurements.

/// Root-mean-square level. Zero for an empty buffer.
///
/// Accumulates in `f64` so long buffers of small samples do not lose energy
/// to rounding.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// Largest absolute sample value. Zero for an empty buffer.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
}
