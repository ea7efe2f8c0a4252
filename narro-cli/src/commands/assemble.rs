//! `narro assemble`

use anyhow::{Context, Result};
use narro_common::{PauseTag, PipelineConfig};
use narro_seg::{read_manifest, TextChunk};
use narro_track::{measure, read_wav, write_wav, AudioBuffer, Metrics, TrackBuilder};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the synthesized audio for chunk `idx`
pub fn chunk_file_name(idx: usize) -> String {
    format!("chunk_{:04}.wav", idx)
}

/// Build the track described by `manifest` from the WAV files in `chunks_dir`
pub fn run(
    config: &PipelineConfig,
    manifest: &Path,
    chunks_dir: &Path,
    output: &Path,
    metrics_path: Option<&Path>,
) -> Result<()> {
    let metrics = assemble(config, manifest, chunks_dir, output)?;

    let json = serde_json::to_string_pretty(&metrics)?;
    match metrics_path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write metrics {}", path.display()))?;
            info!("Metrics written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn assemble(
    config: &PipelineConfig,
    manifest: &Path,
    chunks_dir: &Path,
    output: &Path,
) -> Result<Metrics> {
    // Validate settings before touching any audio
    let builder = TrackBuilder::new(config.track.clone())?;

    let file = File::open(manifest)
        .with_context(|| format!("Failed to open manifest {}", manifest.display()))?;
    let entries = read_manifest(BufReader::new(file))
        .with_context(|| format!("Invalid manifest {}", manifest.display()))?;
    if entries.is_empty() {
        warn!("Manifest {} has no chunks, writing an empty track", manifest.display());
    }

    let (buffers, plan) = load_chunks(&entries, chunks_dir)?;
    let track = builder.build(buffers, &plan)?;

    write_wav(output, track.buffer())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Wrote {} ({:.2}s, {})",
        output.display(),
        track.duration_seconds(),
        track.format()
    );

    Ok(measure(&track))
}

fn load_chunks(entries: &[TextChunk], chunks_dir: &Path) -> Result<(Vec<AudioBuffer>, Vec<PauseTag>)> {
    let mut buffers = Vec::with_capacity(entries.len());
    let mut plan = Vec::with_capacity(entries.len());

    for entry in entries {
        let path: PathBuf = chunks_dir.join(chunk_file_name(entry.index));
        let buffer = read_wav(&path)
            .with_context(|| format!("Failed to read chunk {} ({})", entry.index, path.display()))?;
        debug!(
            "Chunk {}: {:.2}s, pause after {}",
            entry.index,
            buffer.duration_seconds(),
            entry.pause_after
        );
        buffers.push(buffer);
        plan.push(entry.pause_after);
    }

    Ok((buffers, plan))
}
