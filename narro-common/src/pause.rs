//! Pause tags and pause profiles
//!
//! A `PauseTag` is attached to every text chunk by the segmenter and tells the
//! track builder how much silence follows that chunk. A `PauseProfile` maps the
//! three non-zero tags to seconds.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest pause any profile may configure, in seconds
pub const MAX_PAUSE_SECONDS: f64 = 3.0;

/// Pause that follows a chunk of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseTag {
    /// No pause (end of document, or end of a paragraph-internal run)
    #[default]
    None,
    /// Clause boundary (comma, semicolon, colon, dash)
    Short,
    /// Sentence boundary
    Medium,
    /// Paragraph boundary
    Long,
}

impl PauseTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PauseTag::None => "none",
            PauseTag::Short => "short",
            PauseTag::Medium => "medium",
            PauseTag::Long => "long",
        }
    }

    /// All tags in ascending pause length
    pub fn all_variants() -> &'static [PauseTag] {
        &[PauseTag::None, PauseTag::Short, PauseTag::Medium, PauseTag::Long]
    }
}

impl fmt::Display for PauseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PauseTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(PauseTag::None),
            "short" => Ok(PauseTag::Short),
            "medium" => Ok(PauseTag::Medium),
            "long" => Ok(PauseTag::Long),
            other => Err(Error::InvalidInput(format!("unknown pause tag '{}'", other))),
        }
    }
}

/// Validated pause durations in seconds
///
/// Every value lies in `[0.0, 3.0]`. The only way to build one is through
/// [`PauseProfile::new`] or a named preset, so a profile held by the track
/// builder is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PauseProfile {
    short: f64,
    medium: f64,
    long: f64,
}

impl PauseProfile {
    /// Create a profile, rejecting values outside `[0.0, 3.0]`
    pub fn new(short: f64, medium: f64, long: f64) -> Result<Self> {
        for (name, value) in [("short", short), ("medium", medium), ("long", long)] {
            if !value.is_finite() || !(0.0..=MAX_PAUSE_SECONDS).contains(&value) {
                return Err(Error::Config(format!(
                    "pause.{}={} is out of range (must be 0.0..={})",
                    name, value, MAX_PAUSE_SECONDS
                )));
            }
        }

        Ok(Self { short, medium, long })
    }

    /// Look up a built-in profile by name
    ///
    /// - `natural`: 0.25 / 0.50 / 0.80 (default)
    /// - `broadcast`: 0.30 / 0.60 / 1.00
    /// - `tight`: 0.15 / 0.35 / 0.60
    pub fn named(name: &str) -> Option<Self> {
        let (short, medium, long) = match name.trim().to_lowercase().as_str() {
            "natural" => (0.25, 0.50, 0.80),
            "broadcast" => (0.30, 0.60, 1.00),
            "tight" => (0.15, 0.35, 0.60),
            _ => return None,
        };
        Some(Self { short, medium, long })
    }

    /// Names accepted by [`PauseProfile::named`]
    pub fn builtin_names() -> &'static [&'static str] {
        &["natural", "broadcast", "tight"]
    }

    pub fn short(&self) -> f64 {
        self.short
    }

    pub fn medium(&self) -> f64 {
        self.medium
    }

    pub fn long(&self) -> f64 {
        self.long
    }

    /// Silence length in seconds for a pause tag (`none` is always zero)
    pub fn seconds_for(&self, tag: PauseTag) -> f64 {
        match tag {
            PauseTag::None => 0.0,
            PauseTag::Short => self.short,
            PauseTag::Medium => self.medium,
            PauseTag::Long => self.long,
        }
    }
}

impl Default for PauseProfile {
    fn default() -> Self {
        Self {
            short: 0.25,
            medium: 0.50,
            long: 0.80,
        }
    }
}

impl fmt::Display for PauseProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}/{:.2}/{:.2}", self.short, self.medium, self.long)
    }
}
