//! Pitch-preserving stretch integration tests

use crate::helpers::tolerances::{GAIN_EPSILON, GRAIN_SLACK};
use crate::helpers::*;
use lento::dsp::{granular_stretch, GrainSchedule, GranularConfig};
use lento::prelude::*;

fn expected_len(n: usize, speed: f64) -> usize {
    (n as f64 / speed).floor() as usize
}

/// Output length is floor(N / speed) for N >= frame size.
#[test]
fn test_length_is_floor_of_ratio() {
    let speeds = [0.3, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 3.7];
    let lengths = [FRAME_SIZE, FRAME_SIZE + 1, 5000, 22050];

    for &n in &lengths {
        let input = generate_sine(440.0, TEST_SAMPLE_RATE, n);
        for &speed in &speeds {
            let out = granular_stretch(&input, speed).unwrap();
            assert_eq!(
                out.len(),
                expected_len(n, speed),
                "N = {}, speed = {}",
                n,
                speed
            );
        }
    }
}

/// Everything past the last full grain is exactly zero.
#[test]
fn test_tail_is_exact_zero() {
    let config = GranularConfig::default();
    for &speed in &[0.5, 0.8, 1.0, 1.6] {
        let input = generate_noise(20000, 3);
        let out = granular_stretch(&input, speed).unwrap();

        let covered = GrainSchedule::new(input.len(), speed, &config).covered_len();
        assert!(covered <= out.len());
        assert!(covered > 0, "speed {} should fit at least one grain", speed);
        assert!(
            out[covered..].iter().all(|&s| s == 0.0),
            "non-zero tail at speed {}",
            speed
        );
        assert!(out.len() - covered <= 2 * FRAME_SIZE);
    }
}

/// 1 s of 1 kHz at half speed: ~88200 samples that keep their energy.
#[test]
fn test_one_second_sine_half_speed() {
    let input = generate_sine(1000.0, TEST_SAMPLE_RATE, 44100);
    let asset = mono(input.clone());
    let params = StretchParameters::new().speed(0.5).preserve_pitch(true);

    let out = stretch(&asset, &params).unwrap();
    let samples = out.channel(0).unwrap();

    let len = samples.len();
    assert!(
        len + GRAIN_SLACK >= 88200 && len <= 88200 + GRAIN_SLACK,
        "length {}",
        len
    );
    assert_eq!(len, 88200);

    let ratio = rms(samples) / rms(&input);
    assert!(ratio > 0.1 && ratio < 10.0, "RMS ratio {}", ratio);
    assert_has_audio(samples, 0.1);
    assert!(peak(samples) <= 0.95 + GAIN_EPSILON);
}

/// A pure tone keeps its pitch: zero-crossing rate matches the input.
#[test]
fn test_pitch_is_preserved() {
    let input = generate_sine(1000.0, TEST_SAMPLE_RATE, 44100);
    let out = granular_stretch(&input, 0.5).unwrap();

    // Middle of the output, away from the fade-in and zero tail
    let body = &out[8192..65536];
    let crossings = body
        .windows(2)
        .filter(|w| (w[0] < 0.0) != (w[1] < 0.0))
        .count();
    let frequency = crossings as f32 / 2.0 / (body.len() as f32 / TEST_SAMPLE_RATE as f32);

    // Grain seams add a few spurious crossings; the resampler would give 500 Hz
    assert!(
        (frequency - 1000.0).abs() < 150.0,
        "estimated {} Hz",
        frequency
    );
}

/// Input shorter than one frame produces silence of the right length.
#[test]
fn test_short_input_is_silent() {
    let input = generate_sine(440.0, TEST_SAMPLE_RATE, 1000);
    let out = granular_stretch(&input, 0.5).unwrap();
    assert_eq!(out.len(), 2000);
    assert_silence(&out, 0.0);
}

/// Silence in, silence out, with no division by zero.
#[test]
fn test_silence_stays_silent() {
    let asset = mono(generate_silence(10000));
    let out = stretch(&asset, &StretchParameters::new().speed(0.75)).unwrap();
    let samples = out.channel(0).unwrap();
    assert_eq!(samples.len(), 13333);
    assert!(samples.iter().all(|&s| s == 0.0));
}

/// Stereo channels are stretched independently.
#[test]
fn test_channels_are_independent() {
    let left = generate_sine(440.0, TEST_SAMPLE_RATE, 12000);
    let right = generate_scaled_sine(0.02, 660.0, TEST_SAMPLE_RATE, 12000);
    let asset = AudioAsset::stereo(left.clone(), right.clone(), TEST_SAMPLE_RATE).unwrap();
    let params = StretchParameters::new().speed(0.8);

    let out = stretch(&asset, &params).unwrap();
    let alone_left = stretch(&mono(left), &params).unwrap();
    let alone_right = stretch(&mono(right), &params).unwrap();

    assert_eq!(out.channel(0), alone_left.channel(0));
    assert_eq!(out.channel(1), alone_right.channel(0));
}
