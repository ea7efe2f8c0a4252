//! Text segmentation into pause-annotated chunks
//!
//! Pipeline:
//! 1. Normalize whitespace and split paragraphs on blank lines
//! 2. Split paragraphs into sentences (abbreviation-aware)
//! 3. Split sentences over [`SENTENCE_CEILING`] characters at clause markers
//! 4. Pack sentences greedily up to `max_chars`
//! 5. Tag pauses: `medium` after sentences, `short` after clauses, the last
//!    chunk of a paragraph gets `long`, or `none` at the end of the document
//!
//! A packed chunk takes the pause tag of its last sentence.

use crate::abbreviations::AbbreviationTable;
use crate::error::Result;
use crate::sentence::{pack_clauses, split_clauses, split_sentences};
use crate::text::{char_len, split_paragraphs};
use narro_common::{PauseTag, SegmentConfig, SegmentMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Sentences longer than this are always split at clause markers
pub const SENTENCE_CEILING: usize = 600;

/// One unit of text for a single synthesis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// 1-based position in the document
    #[serde(rename = "idx")]
    pub index: usize,
    pub text: String,
    pub pause_after: PauseTag,
}

/// Intermediate piece before indices are assigned
#[derive(Debug)]
struct Piece {
    text: String,
    pause: PauseTag,
}

impl Piece {
    fn new(text: String, pause: PauseTag) -> Self {
        Self { text, pause }
    }
}

/// Greedy sentence accumulator for one paragraph
struct SentencePack {
    sentences: Vec<String>,
    len: usize,
}

impl SentencePack {
    fn new() -> Self {
        Self {
            sentences: Vec::new(),
            len: 0,
        }
    }

    fn fits(&self, len: usize, max_chars: usize) -> bool {
        self.sentences.is_empty() || self.len + 1 + len <= max_chars
    }

    fn push(&mut self, sentence: String) {
        let len = char_len(&sentence);
        self.len = if self.sentences.is_empty() { len } else { self.len + 1 + len };
        self.sentences.push(sentence);
    }

    fn flush_into(&mut self, out: &mut Vec<Piece>) {
        if !self.sentences.is_empty() {
            out.push(Piece::new(self.sentences.join(" "), PauseTag::Medium));
            self.sentences.clear();
            self.len = 0;
        }
    }
}

/// Configured segmenter
///
/// Holds validated limits and the abbreviation table. `segment` is a pure
/// function of its input and never fails.
#[derive(Debug, Clone)]
pub struct Segmenter {
    max_chars: usize,
    mode: SegmentMode,
    min_chars: usize,
    abbreviations: AbbreviationTable,
}

impl Segmenter {
    /// Create a segmenter with the built-in abbreviation table
    pub fn new(max_chars: usize, mode: SegmentMode) -> Result<Self> {
        Self::from_config(&SegmentConfig {
            max_chars,
            mode,
            ..SegmentConfig::default()
        })
    }

    /// Create a segmenter from resolved configuration
    pub fn from_config(config: &SegmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_chars: config.max_chars,
            mode: config.mode,
            min_chars: config.min_chars,
            abbreviations: AbbreviationTable::builtin()
                .with_extra(&config.extra_abbreviations),
        })
    }

    /// Replace the abbreviation table
    pub fn with_abbreviations(mut self, abbreviations: AbbreviationTable) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// Split text into ordered, pause-tagged chunks
    ///
    /// Empty or whitespace-only text yields an empty vector.
    pub fn segment(&self, text: &str) -> Vec<TextChunk> {
        let paragraphs = split_paragraphs(text);
        let paragraph_count = paragraphs.len();
        let mut pieces = Vec::new();

        for (i, paragraph) in paragraphs.iter().enumerate() {
            let mut para_pieces = self.segment_paragraph(paragraph);

            if let Some(last) = para_pieces.last_mut() {
                last.pause = if i + 1 < paragraph_count {
                    PauseTag::Long
                } else {
                    PauseTag::None
                };
            }
            pieces.extend(para_pieces);
        }

        let chunks: Vec<TextChunk> = pieces
            .into_iter()
            .enumerate()
            .map(|(i, piece)| TextChunk {
                index: i + 1,
                text: piece.text,
                pause_after: piece.pause,
            })
            .collect();

        debug!(
            "Segmented {} paragraphs into {} chunks (mode={}, max_chars={})",
            paragraph_count,
            chunks.len(),
            self.mode,
            self.max_chars
        );

        if self.min_chars > 0 {
            drop_short_chunks(chunks, self.min_chars)
        } else {
            chunks
        }
    }

    fn segment_paragraph(&self, paragraph: &str) -> Vec<Piece> {
        if self.mode == SegmentMode::Paragraph && char_len(paragraph) <= self.max_chars {
            return vec![Piece::new(paragraph.to_string(), PauseTag::Medium)];
        }

        let mut pieces = Vec::new();
        let mut pack = SentencePack::new();

        for sentence in split_sentences(paragraph, &self.abbreviations) {
            let len = char_len(&sentence);

            if len > SENTENCE_CEILING {
                pack.flush_into(&mut pieces);
                push_clause_pieces(&mut pieces, split_clauses(&sentence));
            } else if len > self.max_chars {
                pack.flush_into(&mut pieces);
                let groups = pack_clauses(split_clauses(&sentence), self.max_chars);
                push_clause_pieces(&mut pieces, groups);
            } else {
                if !pack.fits(len, self.max_chars) {
                    pack.flush_into(&mut pieces);
                }
                pack.push(sentence);
            }
        }

        pack.flush_into(&mut pieces);
        pieces
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            max_chars: narro_common::config::DEFAULT_MAX_CHARS,
            mode: SegmentMode::Sentence,
            min_chars: 0,
            abbreviations: AbbreviationTable::builtin(),
        }
    }
}

/// Clauses of one sentence: `short` between them, `medium` after the last
fn push_clause_pieces(out: &mut Vec<Piece>, clauses: Vec<String>) {
    let count = clauses.len();
    for (i, clause) in clauses.into_iter().enumerate() {
        let pause = if i + 1 < count {
            PauseTag::Short
        } else {
            PauseTag::Medium
        };
        out.push(Piece::new(clause, pause));
    }
}

/// Segment `text` with the built-in abbreviation table
pub fn segment_text(text: &str, max_chars: usize, mode: SegmentMode) -> Result<Vec<TextChunk>> {
    Ok(Segmenter::new(max_chars, mode)?.segment(text))
}

/// Remove chunks shorter than `min_chars` (after trimming) and re-index
///
/// If a dropped chunk closed a paragraph, its `long` pause moves to the chunk
/// before it so the paragraph break survives.
pub fn drop_short_chunks(chunks: Vec<TextChunk>, min_chars: usize) -> Vec<TextChunk> {
    let before = chunks.len();
    let mut kept: Vec<TextChunk> = Vec::with_capacity(before);

    for chunk in chunks {
        if char_len(chunk.text.trim()) >= min_chars {
            kept.push(chunk);
        } else if chunk.pause_after == PauseTag::Long {
            if let Some(prev) = kept.last_mut() {
                prev.pause_after = PauseTag::Long;
            }
        }
    }

    if let Some(last) = kept.last_mut() {
        last.pause_after = PauseTag::None;
    }
    for (i, chunk) in kept.iter_mut().enumerate() {
        chunk.index = i + 1;
    }

    if kept.len() < before {
        warn!(
            "Dropped {} chunks shorter than {} characters",
            before - kept.len(),
            min_chars
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(chunks: &[TextChunk]) -> Vec<PauseTag> {
        chunks.iter().map(|c| c.pause_after).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(segment_text("", 100, SegmentMode::Sentence).unwrap().is_empty());
        assert!(segment_text("   \n\n  ", 100, SegmentMode::Sentence)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_zero_max_chars_rejected() {
        assert!(segment_text("Hello.", 0, SegmentMode::Sentence).is_err());
    }

    #[test]
    fn test_sentences_pack_under_limit() {
        let chunks =
            segment_text("This is a test. It has sentences. It works.", 100, SegmentMode::Sentence)
                .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "This is a test. It has sentences. It works.");
        assert_eq!(chunks[0].pause_after, PauseTag::None);
    }

    #[test]
    fn test_sentences_split_when_limit_reached() {
        let chunks = segment_text("One two three. Four five six. Seven.", 20, SegmentMode::Sentence)
            .unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["One two three.", "Four five six.", "Seven."]);
        assert_eq!(tags(&chunks), vec![PauseTag::Medium, PauseTag::Medium, PauseTag::None]);
    }

    #[test]
    fn test_paragraph_tags() {
        let chunks = segment_text(
            "First para. Still first.\n\nSecond para.",
            12,
            SegmentMode::Sentence,
        )
        .unwrap();
        assert_eq!(
            tags(&chunks),
            vec![PauseTag::Medium, PauseTag::Long, PauseTag::None]
        );
        let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_paragraph_mode_keeps_paragraphs() {
        let chunks =
            segment_text("Short para one.\n\nShort para two.", 200, SegmentMode::Paragraph).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(tags(&chunks), vec![PauseTag::Long, PauseTag::None]);
    }

    #[test]
    fn test_paragraph_mode_falls_back_when_too_long() {
        let text = "Alpha beta gamma. Delta epsilon zeta.";
        let chunks = segment_text(text, 20, SegmentMode::Paragraph).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "Alpha beta gamma.");
    }

    #[test]
    fn test_sentence_over_limit_split_by_clauses() {
        let text = "This is a very long sentence, with multiple clauses, that should be split.";
        let chunks = segment_text(text, 35, SegmentMode::Sentence).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(
            tags(&chunks),
            vec![PauseTag::Short, PauseTag::Short, PauseTag::None]
        );
        assert!(chunks.iter().all(|c| c.text.chars().count() <= 35));
    }

    #[test]
    fn test_merged_chunk_takes_last_tag() {
        let text = "Alpha, beta, gamma delta epsilon. Next one. Last one.\n\nEnd.";
        let chunks = segment_text(text, 25, SegmentMode::Sentence).unwrap();
        let last_of_first_para = chunks.iter().rev().nth(1).unwrap();
        assert_eq!(last_of_first_para.text, "Next one. Last one.");
        assert_eq!(last_of_first_para.pause_after, PauseTag::Long);
    }

    #[test]
    fn test_drop_short_chunks_reindexes() {
        let chunks = vec![
            TextChunk { index: 1, text: "Long enough text.".into(), pause_after: PauseTag::Medium },
            TextChunk { index: 2, text: "Hi.".into(), pause_after: PauseTag::Long },
            TextChunk { index: 3, text: "Another long one.".into(), pause_after: PauseTag::None },
        ];
        let kept = drop_short_chunks(chunks, 10);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].index, 1);
        assert_eq!(kept[0].pause_after, PauseTag::Long);
        assert_eq!(kept[1].index, 2);
        assert_eq!(kept[1].pause_after, PauseTag::None);
    }

    #[test]
    fn test_min_chars_from_config() {
        let config = SegmentConfig {
            max_chars: 10,
            min_chars: 5,
            ..SegmentConfig::default()
        };
        let segmenter = Segmenter::from_config(&config).unwrap();
        let chunks = segmenter.segment("Right now. Hi. Not yet.");
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Right now.", "Not yet."]);
        assert_eq!(chunks[1].index, 2);
    }

    #[test]
    fn test_custom_abbreviation_table() {
        let segmenter = Segmenter::new(5, SegmentMode::Sentence)
            .unwrap()
            .with_abbreviations(AbbreviationTable::empty().with_extra(["Dept"]));
        let chunks = segmenter.segment("See Dept. Two. Dr. Who.");
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        // "Dr" is not in the replacement table, so it ends a sentence
        assert_eq!(texts, vec!["See Dept. Two.", "Dr.", "Who."]);
    }
}
