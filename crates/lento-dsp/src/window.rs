//! Analysis/synthesis windows.

use std::f32::consts::PI;
use std::ops::Deref;

/// Precomputed symmetric Hann window.
///
/// Built once per stretch call and shared read-only across grains and
/// channels. `w[i] = 0.5 * (1 - cos(2πi / (size - 1)))`, so both end
/// points are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct HannWindow {
    coefficients: Vec<f32>,
}

impl HannWindow {
    pub fn new(size: usize) -> Self {
        let coefficients = match size {
            0 => Vec::new(),
            1 => vec![1.0],
            _ => {
                let denom = (size - 1) as f32;
                (0..size)
                    .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / denom).cos()))
                    .collect()
            }
        };
        Self { coefficients }
    }

    pub fn size(&self) -> usize {
        self.coefficients.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.coefficients
    }
}

impl Deref for HannWindow {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.coefficients
    }
}
