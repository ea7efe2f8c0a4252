//! Sentence and clause splitting
//!
//! Sentences end at `.`, `!` or `?`, optionally followed by closing quotes or
//! brackets, and then whitespace. Periods are vetted by the
//! [`AbbreviationTable`]. Clauses end at commas, semicolons, colons and dashes;
//! a comma directly followed by a digit is a thousands separator and never a
//! clause boundary.

use crate::abbreviations::AbbreviationTable;
use crate::text::char_len;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence-final mark, optional closers, then whitespace
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([.!?])(["')\]”’»]*)\s+"#).unwrap());

/// Characters that end a clause
const CLAUSE_MARKERS: &[char] = &[',', ';', ':', '\u{2014}', '\u{2013}'];

/// Split one paragraph into sentences, in order
///
/// Each sentence keeps its closing punctuation and is trimmed. Text after the
/// last boundary becomes the final sentence even without a closing mark.
pub fn split_sentences(paragraph: &str, abbreviations: &AbbreviationTable) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last_end = 0;

    for caps in SENTENCE_END.captures_iter(paragraph) {
        let (Some(whole), Some(mark)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if mark.as_str() == "." {
            let before = &paragraph[last_end..mark.start()];
            if !abbreviations.is_sentence_terminal_period(before) {
                continue;
            }
        }

        push_trimmed(&mut sentences, &paragraph[last_end..whole.end()]);
        last_end = whole.end();
    }

    push_trimmed(&mut sentences, &paragraph[last_end..]);
    sentences
}

/// Split text at clause markers, keeping each marker on the clause it ends
///
/// Returns the trimmed text as a single clause when there is nothing to split.
pub fn split_clauses(text: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !CLAUSE_MARKERS.contains(&c) {
            continue;
        }
        if c == ',' && matches!(chars.peek(), Some((_, next)) if next.is_ascii_digit()) {
            continue;
        }

        let cut = idx + c.len_utf8();
        push_trimmed(&mut clauses, &text[start..cut]);
        start = cut;
    }

    push_trimmed(&mut clauses, &text[start..]);
    clauses
}

/// Greedily join clauses with single spaces while they fit `max_chars`
///
/// A clause longer than `max_chars` on its own is kept whole.
pub fn pack_clauses(clauses: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut packed = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for clause in clauses {
        let len = char_len(&clause);
        if current_len > 0 && current_len + 1 + len > max_chars {
            packed.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&clause);
        current_len += len;
    }

    if !current.is_empty() {
        packed.push(current);
    }
    packed
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}
