//! # Stretch a WAV file
//!
//! Slow down or speed up a recording, with or without pitch preservation.
//!
//! **Concepts:** `Processor::builder()`, `decode_wav`, progress callback, `output_file_name`
//!
//! ```bash
//! cargo run --example stretch_wav -- lecture.wav 0.75
//! cargo run --example stretch_wav -- lecture.wav 1.5 --no-pitch
//! ```
//!
//! Without an input path a two-second 440 Hz tone is synthesized.

use lento::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let preserve_pitch = !args.iter().any(|a| a == "--no-pitch");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let (input, asset) = match positional.first() {
        Some(path) => (PathBuf::from(path), decode_wav(&std::fs::read(path)?)?),
        None => (
            std::env::temp_dir().join("tone.wav"),
            synthesize_tone(440.0, 44100, 2.0)?,
        ),
    };
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let speed: f64 = match positional.get(1) {
        Some(s) => s.parse()?,
        None => 0.75,
    };

    println!(
        "Input: {} ({} ch, {} Hz, {:.2}s)",
        name,
        asset.channel_count(),
        asset.sample_rate(),
        asset.duration_seconds()
    );

    let processor = Processor::builder()
        .speed(speed)
        .preserve_pitch(preserve_pitch)
        .build()?;

    let container = processor.process_with_progress(&asset, |progress| {
        let phase = match progress.phase {
            ProcessPhase::Stretching => "Stretching",
            ProcessPhase::Encoding => "Encoding",
        };
        print!("\r{:<12} {:>3.0}%", phase, progress.progress * 100.0);
    })?;

    let output = input.with_file_name(output_file_name(&name, speed));
    std::fs::write(&output, container.as_bytes())?;

    let header = container.header()?;
    println!(
        "\nExported: {} ({} frames, {} bytes)",
        output.display(),
        header.frame_count(),
        container.len()
    );

    Ok(())
}

fn synthesize_tone(frequency: f32, sample_rate: u32, seconds: f32) -> lento::Result<AudioAsset> {
    let frames = (sample_rate as f32 * seconds) as usize;
    let samples = (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            0.5 * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect();
    Ok(AudioAsset::mono(samples, sample_rate)?)
}
