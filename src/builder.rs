//! Builder for [`Processor`].

use crate::engine::Processor;
use crate::Result;
use lento_core::StretchParameters;

/// Builder for configuring a [`Processor`].
///
/// Defaults to speed 1.0 with pitch preservation on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessorBuilder {
    params: StretchParameters,
}

impl ProcessorBuilder {
    /// Playback speed multiplier (> 0). Values below 1.0 slow down.
    pub fn speed(mut self, speed: f64) -> Self {
        self.params.speed = speed;
        self
    }

    /// Keep pitch constant with the granular stretcher (default: true).
    pub fn preserve_pitch(mut self, preserve: bool) -> Self {
        self.params.preserve_pitch = preserve;
        self
    }

    /// Replace all parameters at once, e.g. from a deserialized request.
    pub fn params(mut self, params: StretchParameters) -> Self {
        self.params = params;
        self
    }

    pub fn build(self) -> Result<Processor> {
        Processor::new(self.params)
    }
}
