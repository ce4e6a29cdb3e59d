//! Speed-change DSP: linear resampling, overlap-add granular stretching,
//! grain smoothing and loudness normalization.
//!
//! Every function takes its input by reference and returns a new buffer;
//! only [`normalize`] works in place, on a buffer the caller owns.

mod error;
pub use error::{Error, Result};

pub mod analysis;
pub use analysis::{peak, rms};

mod window;
pub use window::HannWindow;

mod smoothing;
pub use smoothing::{smooth, smooth_with_radius, DEFAULT_SMOOTHING_RADIUS};

mod normalize;
pub use normalize::{normalize, normalize_with_policy, NormalizeAction, NormalizerPolicy};

mod resample;
pub use resample::resample_linear;

mod granular;
pub use granular::{
    granular_stretch, granular_stretch_with_config, granular_stretch_with_window, overlap_add,
    GrainPosition, GrainSchedule, GranularConfig,
};
