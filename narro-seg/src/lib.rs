//! # narro segmenter
//!
//! Splits prose into ordered, pause-tagged chunks sized for one
//! speech-synthesis call each:
//! - Whitespace normalization and paragraph splitting
//! - Abbreviation-aware sentence splitting
//! - Clause splitting and greedy packing under `max_chars`
//! - JSON Lines manifest I/O

pub mod abbreviations;
pub mod error;
pub mod manifest;
pub mod segmenter;
pub mod sentence;
pub mod text;

pub use abbreviations::AbbreviationTable;
pub use error::{Error, Result};
pub use manifest::{read_manifest, write_manifest, PauseSummary};
pub use segmenter::{drop_short_chunks, segment_text, Segmenter, TextChunk, SENTENCE_CEILING};
pub use text::apply_style_prefix;
