//! Audio resampling using rubato
//!
//! Sample rate conversion and tape-style speed change. `change_speed` resamples
//! by `1/speed` and keeps the declared sample rate, so duration scales by
//! `1/speed` and pitch moves with it.

use crate::audio::types::AudioBuffer;
use crate::error::{Error, Result};
use rubato::{FastFixedIn, PolynomialDegree, Resampler as RubatoResampler};
use tracing::{debug, warn};

/// Speeds closer to 1.0 than this are treated as unchanged
pub const SPEED_EPSILON: f64 = 0.001;

/// Recommended speed range; values outside it are applied with a warning
pub const RECOMMENDED_SPEED_RANGE: (f64, f64) = (0.95, 1.05);

/// Smallest chunk handed to rubato; shorter inputs are zero-padded
const MIN_CHUNK_FRAMES: usize = 1024;

/// Flush rounds allowed before giving up on the delayed tail
const MAX_FLUSHES: usize = 16;

/// Audio resampler using rubato for sample rate conversion.
pub struct Resampler;

impl Resampler {
    /// Resample interleaved audio by `ratio` (output frames per input frame).
    pub fn resample_by_ratio(input: &[f32], ratio: f64, channels: u16) -> Result<Vec<f32>> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(Error::Resample(format!("invalid resample ratio {}", ratio)));
        }
        if channels == 0 {
            return Err(Error::Resample("channel count must be positive".to_string()));
        }

        // De-interleave samples for rubato (which expects planar format)
        let planar_input = Self::deinterleave(input, channels);
        let input_frames = planar_input[0].len();
        if input_frames == 0 {
            return Ok(Vec::new());
        }

        let expected_frames = (input_frames as f64 * ratio).round() as usize;
        let mut resampler =
            Self::create_resampler(ratio, channels, input_frames.max(MIN_CHUNK_FRAMES))?;
        let delay = resampler.output_delay();

        // A partial chunk is zero-padded up to the chunk size
        let mut planar_output = resampler
            .process_partial(Some(planar_input.as_slice()), None)
            .map_err(|e| Error::Resample(format!("Resampling failed: {}", e)))?;

        // Flush silence through the filter until the delayed tail is out
        let mut flushes = 0;
        while planar_output[0].len() < delay + expected_frames {
            if flushes == MAX_FLUSHES {
                return Err(Error::Resample(format!(
                    "resampler produced {} of {} frames",
                    planar_output[0].len(),
                    delay + expected_frames
                )));
            }
            let tail = resampler
                .process_partial::<Vec<f32>>(None, None)
                .map_err(|e| Error::Resample(format!("Resampler flush failed: {}", e)))?;
            for (channel, samples) in planar_output.iter_mut().zip(tail) {
                channel.extend(samples);
            }
            flushes += 1;
        }

        for channel in planar_output.iter_mut() {
            channel.drain(..delay);
            channel.truncate(expected_frames);
        }

        let interleaved_output = Self::interleave(planar_output);

        debug!(
            "Resampled {} input frames to {} output frames (ratio {:.4})",
            input_frames,
            interleaved_output.len() / channels as usize,
            ratio
        );

        Ok(interleaved_output)
    }

    /// Create a rubato resampler that takes `chunk_size` frames per call.
    fn create_resampler(ratio: f64, channels: u16, chunk_size: usize) -> Result<FastFixedIn<f32>> {
        FastFixedIn::<f32>::new(
            ratio,
            1.0, // max_relative_ratio (no runtime changes)
            PolynomialDegree::Septic,
            chunk_size,
            channels as usize,
        )
        .map_err(|e| Error::Resample(format!("Failed to create resampler: {}", e)))
    }

    /// Convert interleaved samples to planar format.
    ///
    /// Input:  [L, R, L, R, L, R, ...]
    /// Output: [[L, L, L, ...], [R, R, R, ...]]
    fn deinterleave(samples: &[f32], channels: u16) -> Vec<Vec<f32>> {
        let num_channels = channels as usize;
        let num_frames = samples.len() / num_channels;

        let mut planar = vec![Vec::with_capacity(num_frames); num_channels];

        for frame in samples.chunks_exact(num_channels) {
            for (ch_idx, sample) in frame.iter().enumerate() {
                planar[ch_idx].push(*sample);
            }
        }

        planar
    }

    /// Convert planar samples to interleaved format.
    ///
    /// Input:  [[L, L, L, ...], [R, R, R, ...]]
    /// Output: [L, R, L, R, L, R, ...]
    fn interleave(planar: Vec<Vec<f32>>) -> Vec<f32> {
        if planar.is_empty() {
            return Vec::new();
        }

        let num_channels = planar.len();
        let num_frames = planar.iter().map(Vec::len).min().unwrap_or(0);
        let mut interleaved = Vec::with_capacity(num_frames * num_channels);

        for frame_idx in 0..num_frames {
            for channel in &planar {
                interleaved.push(channel[frame_idx]);
            }
        }

        interleaved
    }
}

/// True when `speed` differs from 1.0 enough to resample
pub fn needs_speed_change(speed: f64) -> bool {
    (speed - 1.0).abs() > SPEED_EPSILON
}

/// Play `buffer` back `speed` times faster.
///
/// The samples are resampled from `rate` to `rate / speed` and the declared
/// rate is kept, so the result lasts `1/speed` as long and its pitch shifts by
/// the same factor.
pub fn change_speed(buffer: AudioBuffer, speed: f64) -> Result<AudioBuffer> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(Error::Config(format!(
            "speed must be a positive number, got {}",
            speed
        )));
    }
    if !needs_speed_change(speed) {
        return Ok(buffer);
    }

    let (low, high) = RECOMMENDED_SPEED_RANGE;
    if !(low..=high).contains(&speed) {
        warn!(
            "Speed {:.3} is outside the recommended range {:.2}-{:.2}; applying anyway",
            speed, low, high
        );
    }

    let format = buffer.format();
    let input_seconds = buffer.duration_seconds();
    let samples = Resampler::resample_by_ratio(buffer.samples(), 1.0 / speed, format.channels)?;
    let result = AudioBuffer::new(samples, format)?;

    debug!(
        "Speed {:.3}: {:.3}s -> {:.3}s",
        speed,
        input_seconds,
        result.duration_seconds()
    );
    Ok(result)
}
