//! Period classification for sentence splitting
//!
//! A period followed by whitespace normally ends a sentence. It does not when
//! the token in front of it is a known abbreviation, an initial, a decimal
//! number or a dotted shorthand such as `e.g`. The table is data and may be
//! extended from configuration; the structural predicates are pure functions.

use std::collections::HashSet;

/// Built-in abbreviations (compared case-insensitively, without the final dot)
const BUILTIN_ABBREVIATIONS: &[&str] = &[
    // Latin shorthands
    "e.g", "i.e", "vs", "etc", "cf", "approx", "est", "al",
    // Titles and honorifics
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sr", "Jr", "Rev", "Hon", "St",
    "Gen", "Col", "Capt", "Lt", "Sgt",
    // Degrees and countries
    "U.S", "U.K", "Ph.D", "M.D", "B.A", "M.A", "D.D.S",
    // Organisations and references
    "Inc", "Ltd", "Co", "Corp", "Fig", "Vol", "Ver", "Ed", "p", "pp",
    // Ordinal and number markers
    "No", "Nos", "Nr",
    // Addresses
    "Ave", "Blvd", "Rd",
    // Months
    "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep", "Sept", "Oct", "Nov", "Dec",
    // Weekdays
    "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun",
    // Units
    "ft", "oz", "lb", "lbs", "hr", "hrs", "sec", "kg", "km", "cm", "mm",
];

/// Characters that may open a token and are ignored when classifying it
const OPENING_PUNCTUATION: &[char] = &['"', '\'', '(', '[', '{', '“', '‘', '«'];

/// Case-insensitive set of abbreviation tokens
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    entries: HashSet<String>,
}

impl AbbreviationTable {
    /// Empty table; only the structural predicates apply
    pub fn empty() -> Self {
        Self {
            entries: HashSet::new(),
        }
    }

    /// Table holding the built-in abbreviations
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.extend(BUILTIN_ABBREVIATIONS.iter().copied());
        table
    }

    /// Add abbreviations; a trailing dot on an entry is ignored
    pub fn extend<I, S>(&mut self, abbreviations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for abbreviation in abbreviations {
            let key = normalize_key(abbreviation.as_ref());
            if !key.is_empty() {
                self.entries.insert(key);
            }
        }
    }

    /// Builder-style variant of [`AbbreviationTable::extend`]
    pub fn with_extra<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(abbreviations);
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains(&normalize_key(token))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `token` (the word in front of a period) keeps the sentence open
    pub fn is_non_terminal_token(&self, token: &str) -> bool {
        let token = token.trim_start_matches(OPENING_PUNCTUATION);
        if token.is_empty() {
            return false;
        }

        self.contains(token)
            || is_single_initial(token)
            || is_decimal_number(token)
            || is_multi_dot_token(token)
    }

    /// Decide whether a period ends a sentence
    ///
    /// `before` is the text preceding the period, without the period itself.
    pub fn is_sentence_terminal_period(&self, before: &str) -> bool {
        let token = before.split_whitespace().next_back().unwrap_or("");
        !self.is_non_terminal_token(token)
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_key(token: &str) -> String {
    token.trim().trim_end_matches('.').to_lowercase()
}

/// A single uppercase letter, as in `J. Smith` or `Plan A.`
pub fn is_single_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// A number with a decimal point, such as `3.14` or `1,000.5`
pub fn is_decimal_number(token: &str) -> bool {
    match token.split_once('.') {
        Some((whole, fraction)) => {
            !whole.is_empty()
                && !fraction.is_empty()
                && whole.starts_with(|c: char| c.is_ascii_digit())
                && whole.chars().all(|c| c.is_ascii_digit() || c == ',')
                && fraction.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// A dotted shorthand made of short letter groups, such as `e.g`, `U.S`, `Ph.D`
pub fn is_multi_dot_token(token: &str) -> bool {
    if !token.contains('.') {
        return false;
    }

    token.split('.').all(|part| {
        let len = part.chars().count();
        (1..=2).contains(&len) && part.chars().all(char::is_alphabetic)
    })
}
