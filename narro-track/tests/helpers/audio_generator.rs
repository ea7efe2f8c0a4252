//! Audio test data generation utilities
//!
//! Deterministic buffers and WAV files with known characteristics:
//! - Digital silence
//! - Sine tones at a given frequency and amplitude
//!
//! WAV files are written with hound directly so the reader under test is
//! checked against an independent writer.

#![allow(dead_code)]

use hound::{WavSpec, WavWriter};
use narro_track::{AudioBuffer, AudioFormat};
use std::f32::consts::PI;
use std::path::Path;

/// Standard test sample rate (24 kHz, a common synthesis output rate)
pub const TEST_SAMPLE_RATE: u32 = 24000;

/// Mono 16-bit test format
pub fn mono_format() -> AudioFormat {
    AudioFormat::new(TEST_SAMPLE_RATE, 1, 16).unwrap()
}

/// Frames in `duration_ms` at the test rate
pub fn calculate_frame_count(duration_ms: u64) -> usize {
    (TEST_SAMPLE_RATE as u64 * duration_ms / 1000) as usize
}

/// Silent buffer lasting `duration_ms`
pub fn silence_buffer(duration_ms: u64, format: AudioFormat) -> AudioBuffer {
    let frames = (format.sample_rate as u64 * duration_ms / 1000) as usize;
    AudioBuffer::silence(frames, format)
}

/// Sine tone buffer, same value on every channel
pub fn sine_buffer(
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
    format: AudioFormat,
) -> AudioBuffer {
    let frames = (format.sample_rate as u64 * duration_ms / 1000) as usize;
    let channels = format.channels as usize;
    let mut samples = Vec::with_capacity(frames * channels);

    for frame_idx in 0..frames {
        let t = frame_idx as f32 / format.sample_rate as f32;
        let value = (2.0 * PI * frequency_hz * t).sin() * amplitude;
        for _ in 0..channels {
            samples.push(value);
        }
    }

    AudioBuffer::new(samples, format).unwrap()
}

/// Generate a 16-bit stereo sine WAV file
pub fn generate_sine_wav<P: AsRef<Path>>(
    path: P,
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 2,
        sample_rate: TEST_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    let total_frames = TEST_SAMPLE_RATE as u64 * duration_ms / 1000;
    let amplitude_i16 = (amplitude * i16::MAX as f32) as i16;

    for frame_idx in 0..total_frames {
        let t = frame_idx as f32 / TEST_SAMPLE_RATE as f32;
        let sample_i16 = ((2.0 * PI * frequency_hz * t).sin() * amplitude_i16 as f32) as i16;

        // Write same value to both channels (stereo)
        writer.write_sample(sample_i16)?;
        writer.write_sample(sample_i16)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Generate a mono WAV file of silence at an arbitrary rate
pub fn generate_silent_wav<P: AsRef<Path>>(
    path: P,
    duration_ms: u64,
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for _ in 0..(sample_rate as u64 * duration_ms / 1000) {
        writer.write_sample(0i16)?;
    }

    writer.finalize()?;
    Ok(())
}
