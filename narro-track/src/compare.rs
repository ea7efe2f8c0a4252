//! Two-engine comparison
//!
//! Compares the metrics of the same text rendered by two synthesis engines,
//! and builds an A/B mix that alternates between them for listening tests.

use crate::analysis::Metrics;
use crate::audio::types::{AudioBuffer, Track};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// Differences between two measured tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Duration of A minus duration of B
    pub duration_diff_sec: f64,
    /// Duration of A over duration of B (3 decimals); absent when B is empty
    pub duration_ratio: Option<f64>,
    /// Absolute RMS difference
    pub rms_diff_db: f64,
    /// Label of the engine whose track is shorter (B on a tie)
    pub faster_engine: String,
}

impl ComparisonReport {
    pub fn new(label_a: &str, metrics_a: &Metrics, label_b: &str, metrics_b: &Metrics) -> Self {
        let duration_ratio = if metrics_b.duration_sec > 0.0 {
            Some(round_to(metrics_a.duration_sec / metrics_b.duration_sec, 3))
        } else {
            None
        };
        let faster_engine = if metrics_a.duration_sec < metrics_b.duration_sec {
            label_a
        } else {
            label_b
        };

        Self {
            duration_diff_sec: round_to(metrics_a.duration_sec - metrics_b.duration_sec, 2),
            duration_ratio,
            rms_diff_db: round_to((metrics_a.rms_dbfs - metrics_b.rms_dbfs).abs(), 2),
            faster_engine: faster_engine.to_string(),
        }
    }
}

/// One engine's entry in a [`CompareReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineMetrics {
    pub label: String,
    pub metrics: Metrics,
}

/// Settings the compared tracks were built with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareSettings {
    pub pause_profile: String,
    pub fade_ms: u32,
    pub crossfade_ms: u32,
    pub speed: f64,
    pub max_diff_db: f64,
}

/// Complete comparison report for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    /// `cmp_` followed by 8 hex digits
    pub id: String,
    /// Creation time (RFC 3339)
    pub timestamp: String,
    pub settings: CompareSettings,
    pub a: EngineMetrics,
    pub b: EngineMetrics,
    pub comparison: ComparisonReport,
}

impl CompareReport {
    pub fn new(settings: CompareSettings, a: EngineMetrics, b: EngineMetrics) -> Self {
        let comparison = ComparisonReport::new(&a.label, &a.metrics, &b.label, &b.metrics);
        Self {
            id: new_report_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            settings,
            a,
            b,
            comparison,
        }
    }

    /// Export report to a pretty-printed JSON file
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Import report from JSON file
    pub fn import_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

fn new_report_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("cmp_{}", &simple[..8])
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Alternate `segment_sec` slices of `a` and `b` over the shorter length
///
/// Output: a[0..s], b[0..s], a[s..2s], b[s..2s], ... Both tracks must share a
/// format.
pub fn ab_swap_mix(a: &Track, b: &Track, segment_sec: f64) -> Result<Track> {
    if !segment_sec.is_finite() || segment_sec <= 0.0 {
        return Err(Error::Config(format!(
            "segment length must be a positive number of seconds, got {}",
            segment_sec
        )));
    }
    if a.format() != b.format() {
        return Err(Error::FormatMismatch(format!(
            "A is {}, B is {}",
            a.format(),
            b.format()
        )));
    }

    let format = a.format();
    let step = format.seconds_to_frames(segment_sec).max(1);
    let frames = a.buffer().frame_count().min(b.buffer().frame_count());

    let mut samples = Vec::with_capacity(frames * 2 * format.channels as usize);
    let mut pos = 0;
    while pos < frames {
        let end = pos + step;
        samples.extend_from_slice(a.buffer().slice_frames(pos, end).samples());
        samples.extend_from_slice(b.buffer().slice_frames(pos, end).samples());
        pos = end;
    }

    debug!(
        "A/B mix of {} frames in {}-frame segments",
        frames, step
    );
    Ok(Track::new(AudioBuffer::new(samples, format)?))
}
