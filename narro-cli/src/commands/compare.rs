//! `narro compare`

use anyhow::{Context, Result};
use narro_common::PipelineConfig;
use narro_track::compare::{CompareSettings, EngineMetrics};
use narro_track::{
    ab_swap_mix, match_volume, measure, read_wav, write_wav, CompareReport, Track,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Inputs of one comparison run
#[derive(Debug)]
pub struct CompareRequest<'a> {
    pub a: &'a Path,
    pub b: &'a Path,
    pub label_a: &'a str,
    pub label_b: &'a str,
    pub outdir: &'a Path,
    pub ab_swap_sec: Option<f64>,
}

/// Measure both tracks, write loudness-matched copies and a JSON report
pub fn run(config: &PipelineConfig, request: &CompareRequest<'_>) -> Result<()> {
    let report = compare(config, request)?;
    let comparison = &report.comparison;
    info!(
        "{} vs {}: duration diff {:+.2}s, rms diff {:.2} dB, faster: {}",
        report.a.label,
        report.b.label,
        comparison.duration_diff_sec,
        comparison.rms_diff_db,
        comparison.faster_engine
    );
    Ok(())
}

fn compare(config: &PipelineConfig, request: &CompareRequest<'_>) -> Result<CompareReport> {
    std::fs::create_dir_all(request.outdir)
        .with_context(|| format!("Failed to create {}", request.outdir.display()))?;

    let a = load_track(request.a)?;
    let b = load_track(request.b)?;
    let metrics_a = measure(&a);
    let metrics_b = measure(&b);

    let (a, b) = match_volume(a, b, config.volume.max_diff_db)?;
    let matched_a = output_path(request.outdir, request.label_a, "matched");
    let matched_b = output_path(request.outdir, request.label_b, "matched");
    write_wav(&matched_a, a.buffer())
        .with_context(|| format!("Failed to write {}", matched_a.display()))?;
    write_wav(&matched_b, b.buffer())
        .with_context(|| format!("Failed to write {}", matched_b.display()))?;

    if let Some(segment_sec) = request.ab_swap_sec {
        let mix = ab_swap_mix(&a, &b, segment_sec)?;
        let path = request
            .outdir
            .join(format!("{}_vs_{}_ab.wav", request.label_a, request.label_b));
        write_wav(&path, mix.buffer())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("A/B mix written to {}", path.display());
    }

    let settings = CompareSettings {
        pause_profile: config.track.pause_profile.to_string(),
        fade_ms: config.track.fade_ms,
        crossfade_ms: config.track.crossfade_ms,
        speed: config.track.speed,
        max_diff_db: config.volume.max_diff_db,
    };
    let report = CompareReport::new(
        settings,
        EngineMetrics {
            label: request.label_a.to_string(),
            metrics: metrics_a,
        },
        EngineMetrics {
            label: request.label_b.to_string(),
            metrics: metrics_b,
        },
    );

    let report_path = request.outdir.join(format!("{}.json", report.id));
    report
        .export_json(&report_path)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;
    info!("Report written to {}", report_path.display());

    Ok(report)
}

fn load_track(path: &Path) -> Result<Track> {
    let buffer = read_wav(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Track::new(buffer))
}

fn output_path(outdir: &Path, label: &str, suffix: &str) -> PathBuf {
    outdir.join(format!("{}_{}.wav", label, suffix))
}
