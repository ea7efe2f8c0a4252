//! Track measurement
//!
//! Duration, RMS and peak level, and the share of the track covered by
//! silence. Measurement is read-only.
//!
//! Silence detection slides a 100ms window in 10ms steps; a window whose RMS
//! is at or below -40 dBFS is silent. Runs of silent windows merge into one
//! interval from the first window's start to the last window's end.

use crate::audio::gain::{linear_to_dbfs, peak, rms};
use crate::audio::types::{AudioBuffer, Track};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Silence detection window
pub const SILENCE_WINDOW_MS: u32 = 100;

/// Silence detection step
pub const SILENCE_STEP_MS: u32 = 10;

/// Windows at or below this level are silent
pub const SILENCE_THRESHOLD_DBFS: f64 = -40.0;

/// Measured levels of one track, each rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub duration_sec: f64,
    pub rms_dbfs: f64,
    pub peak_dbfs: f64,
    pub silence_ratio_pct: f64,
}

/// A detected silence interval, in seconds from the start of the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceInterval {
    pub start_sec: f64,
    pub end_sec: f64,
}

impl SilenceInterval {
    pub fn duration_sec(&self) -> f64 {
        self.end_sec - self.start_sec
    }
}

/// Measure a finished track
pub fn measure(track: &Track) -> Metrics {
    measure_buffer(track.buffer())
}

/// Measure any buffer
pub fn measure_buffer(buffer: &AudioBuffer) -> Metrics {
    let duration_sec = buffer.duration_seconds();

    let silence_ratio_pct = if duration_sec > 0.0 {
        // fold from +0.0; an empty f64 sum is -0.0
        let silent = detect_silence(buffer)
            .iter()
            .fold(0.0, |acc, i| acc + i.duration_sec());
        (silent / duration_sec * 100.0).min(100.0)
    } else {
        0.0
    };

    let metrics = Metrics {
        duration_sec: round2(duration_sec),
        rms_dbfs: round2(rms_dbfs(buffer.samples())),
        peak_dbfs: round2(linear_to_dbfs(peak(buffer.samples()))),
        silence_ratio_pct: round2(silence_ratio_pct),
    };

    debug!(
        "Measured {:.2}s: rms={:.2} dBFS, peak={:.2} dBFS, silence={:.2}%",
        metrics.duration_sec, metrics.rms_dbfs, metrics.peak_dbfs, metrics.silence_ratio_pct
    );
    metrics
}

/// Unrounded RMS level in dBFS
pub fn rms_dbfs(samples: &[f32]) -> f64 {
    linear_to_dbfs(rms(samples))
}

/// Find silence intervals with the fixed window, step and threshold
///
/// Buffers shorter than one window have no silence intervals.
pub fn detect_silence(buffer: &AudioBuffer) -> Vec<SilenceInterval> {
    let format = buffer.format();
    let window = format.ms_to_frames(SILENCE_WINDOW_MS).max(1);
    let step = format.ms_to_frames(SILENCE_STEP_MS).max(1);
    let frames = buffer.frame_count();
    if frames < window {
        return Vec::new();
    }

    // Prefix sums of per-frame energy make every window O(1)
    let channels = format.channels as usize;
    let mut energy = Vec::with_capacity(frames + 1);
    energy.push(0.0f64);
    let mut running = 0.0f64;
    for frame in buffer.samples().chunks_exact(channels) {
        running += frame.iter().map(|&s| (s as f64) * (s as f64)).sum::<f64>();
        energy.push(running);
    }

    let samples_per_window = (window * channels) as f64;
    let rate = format.sample_rate as f64;
    let mut intervals = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    // The last window always ends on the final frame
    let last_start = frames - window;
    let starts = (0..=last_start)
        .step_by(step)
        .chain((last_start % step != 0).then_some(last_start));

    for start in starts {
        let mean_square = ((energy[start + window] - energy[start]) / samples_per_window).max(0.0);
        let silent = linear_to_dbfs(mean_square.sqrt()) <= SILENCE_THRESHOLD_DBFS;

        run = match (run, silent) {
            (Some((first, _)), true) => Some((first, start)),
            (None, true) => Some((start, start)),
            (Some((first, last)), false) => {
                intervals.push(interval(first, last + window, rate));
                None
            }
            (None, false) => None,
        };
    }
    if let Some((first, last)) = run {
        intervals.push(interval(first, last + window, rate));
    }

    intervals
}

fn interval(start_frame: usize, end_frame: usize, rate: f64) -> SilenceInterval {
    SilenceInterval {
        start_sec: start_frame as f64 / rate,
        end_sec: end_frame as f64 / rate,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
