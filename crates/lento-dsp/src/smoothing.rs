//! Moving-average smoothing for grains.

/// Neighbours averaged on each side of a sample.
pub const DEFAULT_SMOOTHING_RADIUS: usize = 3;

/// Centered moving average with the default radius (a span of 7).
pub fn smooth(grain: &[f32]) -> Vec<f32> {
    smooth_with_radius(grain, DEFAULT_SMOOTHING_RADIUS)
}

/// Centered moving average over `2 * radius + 1` samples.
///
/// The span is clipped at the buffer edges and the divisor shrinks with it,
/// so edge samples average over fewer neighbours. Uses a running sum, so the
/// cost does not depend on `radius`.
pub fn smooth_with_radius(grain: &[f32], radius: usize) -> Vec<f32> {
    let len = grain.len();
    if radius == 0 || len == 0 {
        return grain.to_vec();
    }

    let mut output = Vec::with_capacity(len);

    // Window [lo, hi) around the current sample
    let mut lo = 0;
    let mut hi = radius.min(len);
    let mut sum: f32 = grain[..hi].iter().sum();

    for i in 0..len {
        let new_hi = (i + radius + 1).min(len);
        while hi < new_hi {
            sum += grain[hi];
            hi += 1;
        }
        let new_lo = i.saturating_sub(radius);
        while lo < new_lo {
            sum -= grain[lo];
            lo += 1;
        }
        output.push(sum / (hi - lo) as f32);
    }

    output
}
