//! Core audio data types
//!
//! Defines the sample buffer handed in per chunk and the assembled track handed
//! back to the caller.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample format shared by every buffer in one build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    /// Bit depth of the source/destination file (samples are always f32 in memory)
    pub bits_per_sample: u16,
}

impl AudioFormat {
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::Config("sample rate must be positive".to_string()));
        }
        if channels == 0 {
            return Err(Error::Config("channel count must be positive".to_string()));
        }
        if !matches!(bits_per_sample, 8 | 16 | 24 | 32) {
            return Err(Error::Config(format!(
                "unsupported bit depth {} (expected 8, 16, 24 or 32)",
                bits_per_sample
            )));
        }
        Ok(Self {
            sample_rate,
            channels,
            bits_per_sample,
        })
    }

    /// Number of frames covering `ms` milliseconds (rounded down)
    pub fn ms_to_frames(&self, ms: u32) -> usize {
        (ms as u64 * self.sample_rate as u64 / 1000) as usize
    }

    /// Number of frames covering `seconds` (rounded to nearest)
    pub fn seconds_to_frames(&self, seconds: f64) -> usize {
        (seconds.max(0.0) * self.sample_rate as f64).round() as usize
    }
}

/// Mono 16-bit at 44.1kHz, used for zero-length tracks that have no chunk to copy from
impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Hz/{}ch/{}bit",
            self.sample_rate, self.channels, self.bits_per_sample
        )
    }
}

/// AudioBuffer holds interleaved PCM samples for one chunk or one track.
///
/// **Format:**
/// - Samples are f32 (floating point -1.0 to 1.0)
/// - Interleaved by channel: [L, R, L, R, ...] for stereo
/// - Duration is derived from the frame count and sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    format: AudioFormat,
}

impl AudioBuffer {
    /// Create a buffer; the sample count must be a whole number of frames
    pub fn new(samples: Vec<f32>, format: AudioFormat) -> Result<Self> {
        if samples.len() % format.channels as usize != 0 {
            return Err(Error::FormatMismatch(format!(
                "{} samples is not a whole number of {}-channel frames",
                samples.len(),
                format.channels
            )));
        }
        Ok(Self { samples, format })
    }

    /// Zero-length buffer
    pub fn empty(format: AudioFormat) -> Self {
        Self {
            samples: Vec::new(),
            format,
        }
    }

    /// Buffer of digital silence lasting `frames` frames
    pub fn silence(frames: usize, format: AudioFormat) -> Self {
        Self {
            samples: vec![0.0; frames * format.channels as usize],
            format,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.format.channels
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.format.bits_per_sample
    }

    /// Number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.format.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.format.sample_rate as f64
    }

    /// Copy of frames `start..end` (clamped to the buffer)
    pub fn slice_frames(&self, start: usize, end: usize) -> AudioBuffer {
        let channels = self.format.channels as usize;
        let frames = self.frame_count();
        let start = start.min(frames);
        let end = end.clamp(start, frames);
        Self {
            samples: self.samples[start * channels..end * channels].to_vec(),
            format: self.format,
        }
    }
}

/// Track is the assembled result of a build.
///
/// Immutable after construction: it only hands out shared views of its buffer
/// or gives the buffer up entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    buffer: AudioBuffer,
    duration_sec: f64,
}

impl Track {
    pub fn new(buffer: AudioBuffer) -> Self {
        let duration_sec = buffer.duration_seconds();
        Self {
            buffer,
            duration_sec,
        }
    }

    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> AudioBuffer {
        self.buffer
    }

    /// Playback duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.duration_sec
    }

    pub fn format(&self) -> AudioFormat {
        self.buffer.format()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl From<AudioBuffer> for Track {
    fn from(buffer: AudioBuffer) -> Self {
        Track::new(buffer)
    }
}
