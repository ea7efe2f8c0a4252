//! `narro measure`

use anyhow::{Context, Result};
use narro_track::{measure_buffer, read_wav, Metrics};
use std::path::Path;
use tracing::info;

/// Print the metrics of a WAV file as JSON on stdout
pub fn run(input: &Path) -> Result<()> {
    let metrics = measure_file(input)?;
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

pub fn measure_file(input: &Path) -> Result<Metrics> {
    let buffer =
        read_wav(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let metrics = measure_buffer(&buffer);
    info!(
        "{}: {:.2}s, rms {:.2} dBFS, silence {:.2}%",
        input.display(),
        metrics.duration_sec,
        metrics.rms_dbfs,
        metrics.silence_ratio_pct
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_measure_silent_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quiet.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..16000 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let metrics = measure_file(&path).unwrap();
        assert_eq!(metrics.duration_sec, 1.0);
        assert_eq!(metrics.rms_dbfs, -120.0);
        assert_eq!(metrics.silence_ratio_pct, 100.0);
    }

    #[test]
    fn test_measure_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(measure_file(&dir.path().join("gone.wav")).is_err());
    }
}
