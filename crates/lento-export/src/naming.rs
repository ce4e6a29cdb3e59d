//! Output file naming.

use std::path::Path;

/// Name for a processed recording: `<stem>_slowed.wav` when slowed down,
/// `<stem>_sped_up.wav` when sped up, `<stem>.wav` at unity speed.
///
/// Only the file name component of `input` is used.
pub fn output_file_name(input: &str, speed: f64) -> String {
    let stem = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("output");

    let suffix = if (speed - 1.0).abs() <= f64::EPSILON {
        ""
    } else if speed < 1.0 {
        "_slowed"
    } else {
        "_sped_up"
    };

    format!("{}{}.wav", stem, suffix)
}
