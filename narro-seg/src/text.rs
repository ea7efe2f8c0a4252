//! Shared text utilities
//!
//! Whitespace normalization, paragraph splitting and style prefixes. All
//! functions are pure.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of horizontal whitespace (everything except line feed)
static HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").unwrap());

/// One or more blank lines
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Any whitespace run, line breaks included
static ANY_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize line endings and horizontal whitespace
///
/// CRLF and lone CR become LF, tabs and other horizontal whitespace runs
/// collapse to one space. Line feeds are kept so paragraph breaks survive.
pub fn normalize_whitespace(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    HORIZONTAL_WS.replace_all(&text, " ").into_owned()
}

/// Collapse every whitespace run (including line breaks) to one space and trim
pub fn fold_whitespace(text: &str) -> String {
    ANY_WS.replace_all(text.trim(), " ").into_owned()
}

/// Split text into paragraphs separated by blank lines
///
/// Paragraphs that are empty after trimming are dropped. Line breaks inside a
/// paragraph are folded into single spaces.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    PARAGRAPH_BREAK
        .split(&normalized)
        .map(fold_whitespace)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Length in characters (Unicode scalar values), the unit `max_chars` uses
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Prepend a style instruction as its own paragraph
///
/// A missing or blank prefix returns the text unchanged.
pub fn apply_style_prefix(text: &str, style_prefix: Option<&str>) -> String {
    match style_prefix.map(str::trim) {
        Some(prefix) if !prefix.is_empty() => format!("{}\n\n{}", prefix, text),
        _ => text.to_string(),
    }
}
