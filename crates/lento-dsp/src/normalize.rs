//! Loudness correction after granular stretching.
//!
//! Overlap-add can both overshoot full scale (where grains reinforce) and
//! lose energy (where they cancel). One gain is applied to the whole buffer:
//! attenuate when the peak is too hot, otherwise boost when the RMS is too
//! quiet, otherwise leave it alone.

use crate::analysis::{peak, rms};

/// Thresholds and targets for [`normalize_with_policy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerPolicy {
    /// Peaks above this are pulled down.
    pub ceiling: f32,
    /// Peak level after attenuation.
    pub headroom_peak: f32,
    /// Non-silent signals with RMS below this are boosted.
    pub quiet_rms: f32,
    /// RMS level a quiet signal is boosted towards.
    pub target_rms: f32,
    /// Upper bound on the boost gain.
    pub max_gain: f32,
}

impl Default for NormalizerPolicy {
    fn default() -> Self {
        Self {
            ceiling: 0.95,
            headroom_peak: 0.85,
            quiet_rms: 0.1,
            target_rms: 0.3,
            max_gain: 2.0,
        }
    }
}

/// Gain decision for one buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizeAction {
    /// Peak exceeded the ceiling; scaled down by the gain.
    Attenuate(f32),
    /// Signal was quiet; scaled up by the gain.
    Boost(f32),
    Unchanged,
}

impl NormalizeAction {
    pub fn gain(&self) -> f32 {
        match *self {
            NormalizeAction::Attenuate(g) | NormalizeAction::Boost(g) => g,
            NormalizeAction::Unchanged => 1.0,
        }
    }
}

impl NormalizerPolicy {
    /// Decide the gain for a buffer with the given measurements.
    pub fn action(&self, peak: f32, rms: f32) -> NormalizeAction {
        if peak > self.ceiling {
            NormalizeAction::Attenuate(self.headroom_peak / peak)
        } else if rms > 0.0 && rms < self.quiet_rms {
            NormalizeAction::Boost((self.target_rms / rms).min(self.max_gain))
        } else {
            NormalizeAction::Unchanged
        }
    }
}

/// Normalize in place with the default policy.
pub fn normalize(samples: &mut [f32]) -> NormalizeAction {
    normalize_with_policy(samples, &NormalizerPolicy::default())
}

/// Normalize in place and report what was done.
///
/// Silence has zero RMS and zero peak and is left untouched.
pub fn normalize_with_policy(samples: &mut [f32], policy: &NormalizerPolicy) -> NormalizeAction {
    let action = policy.action(peak(samples), rms(samples));

    if let NormalizeAction::Attenuate(gain) | NormalizeAction::Boost(gain) = action {
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
    }

    tracing::trace!(?action, len = samples.len(), "normalize");
    action
}
