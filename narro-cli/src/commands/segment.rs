//! `narro segment`

use anyhow::{Context, Result};
use narro_common::PipelineConfig;
use narro_seg::{apply_style_prefix, write_manifest, PauseSummary, Segmenter, TextChunk};
use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::Path;
use tracing::info;

/// Segment `input` and write the manifest to `manifest` or stdout
pub fn run(
    config: &PipelineConfig,
    input: &Path,
    manifest: Option<&Path>,
    style_prefix: Option<&str>,
) -> Result<()> {
    let text = read_text(input)?;
    let chunks = segment(config, &text, style_prefix)?;

    match manifest {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create manifest {}", path.display()))?;
            write_manifest(BufWriter::new(file), &chunks)?;
            info!("Wrote {} chunks to {}", chunks.len(), path.display());
        }
        None => write_manifest(io::stdout().lock(), &chunks)?,
    }

    let summary = PauseSummary::from_chunks(&chunks);
    info!(
        "{} chunks in {} paragraphs (pauses: {} short, {} medium, {} long)",
        summary.chunks,
        summary.paragraphs(),
        summary.short,
        summary.medium,
        summary.long
    );
    Ok(())
}

fn segment(
    config: &PipelineConfig,
    text: &str,
    style_prefix: Option<&str>,
) -> Result<Vec<TextChunk>> {
    let segmenter = Segmenter::from_config(&config.segment)?;
    let text = apply_style_prefix(text, style_prefix);
    Ok(segmenter.segment(&text))
}

fn read_text(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))
}
