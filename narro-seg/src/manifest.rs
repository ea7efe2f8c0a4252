//! Chunk manifest in JSON Lines form
//!
//! One chunk per line: `{"idx": 1, "text": "...", "pause_after": "medium"}`.
//! Blank lines are skipped on read; indices must run 1, 2, 3, ...

use crate::error::{Error, Result};
use crate::segmenter::TextChunk;
use narro_common::PauseTag;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::debug;

/// Write chunks as JSON Lines
pub fn write_manifest<W: Write>(mut writer: W, chunks: &[TextChunk]) -> Result<()> {
    for chunk in chunks {
        serde_json::to_writer(&mut writer, chunk)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    debug!("Wrote manifest with {} chunks", chunks.len());
    Ok(())
}

/// Read chunks written by [`write_manifest`]
///
/// Errors carry the 1-based line number of the offending line.
pub fn read_manifest<R: BufRead>(reader: R) -> Result<Vec<TextChunk>> {
    let mut chunks: Vec<TextChunk> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let chunk: TextChunk = serde_json::from_str(&line).map_err(|e| Error::Manifest {
            line: line_no,
            reason: e.to_string(),
        })?;

        let expected = chunks.len() + 1;
        if chunk.index != expected {
            return Err(Error::Manifest {
                line: line_no,
                reason: format!("expected idx {}, found {}", expected, chunk.index),
            });
        }
        if chunk.text.trim().is_empty() {
            return Err(Error::Manifest {
                line: line_no,
                reason: "chunk text is empty".to_string(),
            });
        }

        chunks.push(chunk);
    }

    debug!("Read manifest with {} chunks", chunks.len());
    Ok(chunks)
}

/// Pause tag counts for a chunk sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PauseSummary {
    pub chunks: usize,
    pub none: usize,
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

impl PauseSummary {
    pub fn from_chunks(chunks: &[TextChunk]) -> Self {
        let mut summary = Self {
            chunks: chunks.len(),
            ..Self::default()
        };
        for chunk in chunks {
            match chunk.pause_after {
                PauseTag::None => summary.none += 1,
                PauseTag::Short => summary.short += 1,
                PauseTag::Medium => summary.medium += 1,
                PauseTag::Long => summary.long += 1,
            }
        }
        summary
    }

    /// Paragraph count: every `long` closes one paragraph, plus the last one
    pub fn paragraphs(&self) -> usize {
        if self.chunks == 0 {
            0
        } else {
            self.long + 1
        }
    }
}
