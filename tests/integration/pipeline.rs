//! End-to-end pipeline tests: stretch, normalize, encode.

use crate::helpers::*;
use lento::prelude::*;
use std::sync::Mutex;

/// Slowed stereo speech-like input comes out as a valid, longer WAV.
#[test]
fn test_process_stereo_granular() {
    let left = generate_sine(220.0, TEST_SAMPLE_RATE, 22050);
    let right = generate_scaled_sine(0.3, 330.0, TEST_SAMPLE_RATE, 22050);
    let asset = AudioAsset::stereo(left, right, TEST_SAMPLE_RATE).unwrap();

    let container = process(&asset, &StretchParameters::new().speed(0.75)).unwrap();
    let header = container.header().unwrap();

    assert_eq!(header.channels, 2);
    assert_eq!(header.sample_rate, TEST_SAMPLE_RATE);
    assert_eq!(header.frame_count(), 29400);
    assert_eq!(container.len(), 44 + 29400 * 2 * 2);
}

/// Unity-speed resample of a 2 x 10 asset gives the 84-byte container.
#[test]
fn test_process_small_stereo() {
    let asset = AudioAsset::stereo(vec![0.0; 10], vec![0.0; 10], 44100).unwrap();
    let params = StretchParameters::new().preserve_pitch(false);
    let container = process(&asset, &params).unwrap();
    assert_eq!(container.len(), 84);
    assert_eq!(container.as_bytes()[22], 2);
}

/// The caller's asset is never modified.
#[test]
fn test_input_is_not_mutated() {
    let asset = mono(generate_sine(1000.0, TEST_SAMPLE_RATE, 10000));
    let snapshot = asset.clone();

    stretch(&asset, &StretchParameters::new().speed(0.5)).unwrap();
    stretch(&asset, &StretchParameters::new().speed(2.0).preserve_pitch(false)).unwrap();

    assert_eq!(asset, snapshot);
}

/// Same input and parameters always give the same bytes.
#[test]
fn test_deterministic_output() {
    let asset = mono(generate_noise(30000, 5));
    let processor = Processor::builder().speed(0.6).build().unwrap();
    let a = processor.process(&asset).unwrap();
    let b = processor.process(&asset).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_zero_and_negative_speed_rejected() {
    let asset = mono(generate_sine(440.0, TEST_SAMPLE_RATE, 4096));
    for &speed in &[0.0, -0.5, f64::NAN] {
        for &preserve in &[true, false] {
            let params = StretchParameters::new().speed(speed).preserve_pitch(preserve);
            let err = process(&asset, &params).unwrap_err();
            assert!(err.is_invalid_parameter(), "speed {}: {}", speed, err);
        }
    }
}

/// Speeds that would need an output longer than a WAV can hold fail cleanly.
#[test]
fn test_tiny_speed_rejected() {
    let asset = mono(vec![0.25; 100]);
    for &preserve in &[true, false] {
        let params = StretchParameters::new().speed(1e-30).preserve_pitch(preserve);
        let err = process(&asset, &params).unwrap_err();
        assert!(err.is_invalid_parameter(), "{}", err);
    }
}

/// One second of CD audio at the usual slow-down presets.
#[test]
fn test_preset_speed_lengths() {
    let asset = mono(generate_sine(440.0, TEST_SAMPLE_RATE, 44100));
    for &(speed, frames) in &[(0.3, 147000), (0.1, 441000), (0.6, 73500)] {
        let params = StretchParameters::new().speed(speed).preserve_pitch(false);
        assert_eq!(stretch(&asset, &params).unwrap().frames(), frames, "speed {}", speed);
    }

    let granular = stretch(&asset, &StretchParameters::new().speed(0.3)).unwrap();
    assert_eq!(granular.frames(), 147000);
}

#[test]
fn test_empty_input_with_pitch_preservation_rejected() {
    let asset = mono(Vec::new());
    let err = process(&asset, &StretchParameters::new().speed(0.8)).unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[test]
fn test_channel_mismatch_rejected() {
    let result = AudioAsset::stereo(vec![0.0; 100], vec![0.0; 99], 44100);
    let err: Error = result.unwrap_err().into();
    assert!(err.is_channel_mismatch());
    assert!(err.to_string().contains("100"));
    assert!(err.to_string().contains("99"));
}

/// Decoder failures surface unchanged and are distinguishable.
#[cfg(feature = "wav")]
#[test]
fn test_decode_failure_surfaces() {
    fn load(bytes: &[u8]) -> lento::Result<EncodedContainer> {
        let asset = decode_wav(bytes)?;
        process(&asset, &StretchParameters::new().speed(0.5))
    }

    let err = load(b"ID3\x04 this is an mp3, not a wav").unwrap_err();
    assert!(err.is_decode_failure());
    assert!(!err.is_invalid_parameter());
}

/// Decode, stretch and encode a WAV produced by another writer.
#[cfg(feature = "wav")]
#[test]
fn test_wav_in_wav_out() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(std::io::Cursor::new(&mut bytes), spec).unwrap();
        for s in generate_sine(300.0, 16000, 16000) {
            writer.write_sample((s * 16000.0) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    let asset = decode_wav(&bytes).unwrap();
    let container = process(&asset, &StretchParameters::new().speed(1.25)).unwrap();
    let (out_spec, frames, _) = read_with_hound(container.as_bytes());

    assert_eq!(out_spec.sample_rate, 16000);
    assert_eq!(frames, 12800);
}

/// Progress phases arrive in pipeline order, each from 0 to 1.
#[test]
fn test_progress_reporting() {
    let asset = mono(generate_sine(440.0, TEST_SAMPLE_RATE, 8192));
    let events = Mutex::new(Vec::new());

    process_with_progress(&asset, &StretchParameters::new().speed(0.5), |p| {
        events.lock().unwrap().push(p);
    })
    .unwrap();

    let events = events.into_inner().unwrap();
    let phases: Vec<ProcessPhase> = events.iter().map(|p| p.phase).collect();
    assert_eq!(
        phases,
        vec![
            ProcessPhase::Stretching,
            ProcessPhase::Stretching,
            ProcessPhase::Encoding,
            ProcessPhase::Encoding,
        ]
    );
    assert!(events.iter().all(|p| (0.0..=1.0).contains(&p.progress)));
    assert_eq!(events.last().map(|p| p.progress), Some(1.0));
}

/// Per-file settings arrive as JSON from the surrounding application.
#[test]
fn test_params_from_json() {
    let params: StretchParameters =
        serde_json::from_str(r#"{"speed": 0.5, "preservePitch": false}"#).unwrap();
    let processor = Processor::builder().params(params).build().unwrap();
    assert_eq!(processor.params().mode(), SpeedMode::Resample);

    let out = processor.stretch(&mono(vec![0.25; 100])).unwrap();
    assert_eq!(out.frames(), 200);

    let json = serde_json::to_string(&StretchParameters::new().speed(1.5)).unwrap();
    assert_eq!(json, r#"{"speed":1.5,"preservePitch":true}"#);
}
