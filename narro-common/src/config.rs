//! Configuration model and resolution
//!
//! A run is driven by one fully resolved [`PipelineConfig`]. It is assembled
//! once, in this priority order:
//! 1. Command-line overrides (highest priority)
//! 2. Named narration preset
//! 3. TOML config file
//! 4. Compiled defaults (fallback)
//!
//! Resolution validates every value, so a config error surfaces before any
//! text is segmented or any audio is touched. Nothing here reads environment
//! variables; the binary decides which file to load.

use crate::fade_curves::FadeCurve;
use crate::pause::PauseProfile;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Default maximum characters per chunk
pub const DEFAULT_MAX_CHARS: usize = 800;

/// Default fade applied to each chunk edge (milliseconds)
pub const DEFAULT_FADE_MS: u32 = 20;

/// Default crossfade between chunks (milliseconds)
pub const DEFAULT_CROSSFADE_MS: u32 = 50;

/// Default RMS tolerance before volume matching kicks in (dB)
pub const DEFAULT_MAX_DIFF_DB: f64 = 1.5;

/// Segmentation granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// Pack sentences greedily up to `max_chars`
    #[default]
    Sentence,
    /// Keep whole paragraphs when they fit, otherwise fall back to sentences
    Paragraph,
}

impl SegmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentMode::Sentence => "sentence",
            SegmentMode::Paragraph => "paragraph",
        }
    }
}

impl FromStr for SegmentMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sentence" => Ok(SegmentMode::Sentence),
            "paragraph" => Ok(SegmentMode::Paragraph),
            other => Err(Error::Config(format!(
                "unknown segment mode '{}' (expected sentence or paragraph)",
                other
            ))),
        }
    }
}

impl fmt::Display for SegmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Segmenter settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentConfig {
    pub max_chars: usize,
    pub mode: SegmentMode,
    /// Chunks shorter than this are dropped after segmentation (0 disables)
    pub min_chars: usize,
    /// Abbreviations added to the built-in table
    pub extra_abbreviations: Vec<String>,
}

impl SegmentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::Config("max_chars must be a positive integer".to_string()));
        }
        Ok(())
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            mode: SegmentMode::Sentence,
            min_chars: 0,
            extra_abbreviations: Vec::new(),
        }
    }
}

/// Track assembly settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackOptions {
    pub pause_profile: PauseProfile,
    /// Fade-in/out applied to every chunk (0 disables)
    pub fade_ms: u32,
    /// Overlap between consecutive chunks (0 inserts pauses instead)
    pub crossfade_ms: u32,
    /// Playback speed multiplier; 0.95..=1.05 is the recommended range
    pub speed: f64,
    /// Peak-normalize to -0.1 dBFS as the final step
    pub normalize: bool,
    pub fade_curve: FadeCurve,
    pub crossfade_curve: FadeCurve,
}

impl TrackOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(Error::Config(format!(
                "speed must be a positive number, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            pause_profile: PauseProfile::default(),
            fade_ms: DEFAULT_FADE_MS,
            crossfade_ms: DEFAULT_CROSSFADE_MS,
            speed: 1.0,
            normalize: true,
            fade_curve: FadeCurve::Linear,
            crossfade_curve: FadeCurve::EqualPower,
        }
    }
}

/// Volume matching settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeConfig {
    pub max_diff_db: f64,
}

impl VolumeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.max_diff_db.is_finite() || self.max_diff_db < 0.0 {
            return Err(Error::Config(format!(
                "max_diff_db must be a non-negative number, got {}",
                self.max_diff_db
            )));
        }
        Ok(())
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            max_diff_db: DEFAULT_MAX_DIFF_DB,
        }
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineConfig {
    pub segment: SegmentConfig,
    pub track: TrackOptions,
    pub volume: VolumeConfig,
}

/// Named bundle of pacing settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrationPreset {
    pub pause_profile: Option<String>,
    pub speed: Option<f64>,
    pub fade_ms: Option<u32>,
    pub crossfade_ms: Option<u32>,
    pub description: Option<String>,
}

/// Built-in narration presets
pub fn builtin_presets() -> BTreeMap<String, NarrationPreset> {
    let mut presets = BTreeMap::new();
    presets.insert(
        "natural".to_string(),
        NarrationPreset {
            pause_profile: Some("natural".to_string()),
            speed: Some(1.0),
            fade_ms: Some(DEFAULT_FADE_MS),
            crossfade_ms: Some(DEFAULT_CROSSFADE_MS),
            description: Some("Natural breathing pace (default)".to_string()),
        },
    );
    presets.insert(
        "fast".to_string(),
        NarrationPreset {
            pause_profile: Some("tight".to_string()),
            speed: Some(1.02),
            description: Some("Fast narration for quick briefings".to_string()),
            ..Default::default()
        },
    );
    presets.insert(
        "broadcast".to_string(),
        NarrationPreset {
            pause_profile: Some("broadcast".to_string()),
            speed: Some(0.98),
            description: Some("Measured broadcast pacing".to_string()),
            ..Default::default()
        },
    );
    presets.insert(
        "warm".to_string(),
        NarrationPreset {
            pause_profile: Some("natural".to_string()),
            speed: Some(0.99),
            description: Some("Slightly slower, relaxed delivery".to_string()),
            ..Default::default()
        },
    );
    presets
}

/// `[segment]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlSegment {
    pub max_chars: Option<usize>,
    pub mode: Option<String>,
    pub min_chars: Option<usize>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

/// `[track.pause]` table; any missing value keeps the selected profile's value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlPause {
    pub short: Option<f64>,
    pub medium: Option<f64>,
    pub long: Option<f64>,
}

/// `[track]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlTrack {
    pub pause_profile: Option<String>,
    pub pause: Option<TomlPause>,
    pub fade_ms: Option<u32>,
    pub crossfade_ms: Option<u32>,
    pub speed: Option<f64>,
    pub normalize: Option<bool>,
    pub fade_curve: Option<String>,
    pub crossfade_curve: Option<String>,
}

/// `[volume]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlVolume {
    pub max_diff_db: Option<f64>,
}

/// Contents of a narro TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub segment: Option<TomlSegment>,
    pub track: Option<TomlTrack>,
    pub volume: Option<TomlVolume>,
    #[serde(default)]
    pub presets: BTreeMap<String, NarrationPreset>,
}

impl FromStr for TomlConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_chars: Option<usize>,
    pub mode: Option<SegmentMode>,
    pub min_chars: Option<usize>,
    pub pause_profile: Option<String>,
    pub fade_ms: Option<u32>,
    pub crossfade_ms: Option<u32>,
    pub speed: Option<f64>,
    pub normalize: Option<bool>,
    pub max_diff_db: Option<f64>,
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = content.parse::<TomlConfig>()?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Per-user config file location (`<config dir>/narro/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("narro").join("config.toml"))
}

fn named_profile(name: &str) -> Result<PauseProfile> {
    PauseProfile::named(name).ok_or_else(|| {
        Error::Config(format!(
            "unknown pause profile '{}' (expected one of: {})",
            name,
            PauseProfile::builtin_names().join(", ")
        ))
    })
}

impl PipelineConfig {
    /// Resolve defaults, TOML, preset and overrides into one validated config
    pub fn resolve(
        toml: Option<&TomlConfig>,
        preset: Option<&str>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let mut segment = SegmentConfig::default();
        let mut volume = VolumeConfig::default();
        let defaults = TrackOptions::default();

        let mut profile_name: Option<String> = None;
        let mut pause_table: Option<&TomlPause> = None;
        let mut fade_ms = defaults.fade_ms;
        let mut crossfade_ms = defaults.crossfade_ms;
        let mut speed = defaults.speed;
        let mut normalize = defaults.normalize;
        let mut fade_curve = defaults.fade_curve;
        let mut crossfade_curve = defaults.crossfade_curve;

        // Priority 3: TOML config file
        if let Some(toml) = toml {
            if let Some(seg) = &toml.segment {
                if let Some(max_chars) = seg.max_chars {
                    segment.max_chars = max_chars;
                }
                if let Some(mode) = &seg.mode {
                    segment.mode = mode.parse()?;
                }
                if let Some(min_chars) = seg.min_chars {
                    segment.min_chars = min_chars;
                }
                segment.extra_abbreviations = seg.abbreviations.clone();
            }
            if let Some(track) = &toml.track {
                profile_name = track.pause_profile.clone();
                pause_table = track.pause.as_ref();
                fade_ms = track.fade_ms.unwrap_or(fade_ms);
                crossfade_ms = track.crossfade_ms.unwrap_or(crossfade_ms);
                speed = track.speed.unwrap_or(speed);
                normalize = track.normalize.unwrap_or(normalize);
                if let Some(curve) = &track.fade_curve {
                    fade_curve = curve.parse()?;
                }
                if let Some(curve) = &track.crossfade_curve {
                    crossfade_curve = curve.parse()?;
                }
            }
            if let Some(vol) = &toml.volume {
                volume.max_diff_db = vol.max_diff_db.unwrap_or(volume.max_diff_db);
            }
        }

        // Priority 2: named preset (file presets shadow built-ins)
        if let Some(name) = preset {
            let preset = toml
                .and_then(|t| t.presets.get(name).cloned())
                .or_else(|| builtin_presets().remove(name))
                .ok_or_else(|| Error::Config(format!("unknown preset '{}'", name)))?;
            debug!("Applying preset '{}'", name);

            if preset.pause_profile.is_some() {
                profile_name = preset.pause_profile;
                pause_table = None;
            }
            fade_ms = preset.fade_ms.unwrap_or(fade_ms);
            crossfade_ms = preset.crossfade_ms.unwrap_or(crossfade_ms);
            speed = preset.speed.unwrap_or(speed);
        }

        // Priority 1: command-line overrides
        if let Some(max_chars) = overrides.max_chars {
            segment.max_chars = max_chars;
        }
        if let Some(mode) = overrides.mode {
            segment.mode = mode;
        }
        if let Some(min_chars) = overrides.min_chars {
            segment.min_chars = min_chars;
        }
        if overrides.pause_profile.is_some() {
            profile_name = overrides.pause_profile.clone();
            pause_table = None;
        }
        fade_ms = overrides.fade_ms.unwrap_or(fade_ms);
        crossfade_ms = overrides.crossfade_ms.unwrap_or(crossfade_ms);
        speed = overrides.speed.unwrap_or(speed);
        normalize = overrides.normalize.unwrap_or(normalize);
        volume.max_diff_db = overrides.max_diff_db.unwrap_or(volume.max_diff_db);

        let base = match &profile_name {
            Some(name) => named_profile(name)?,
            None => PauseProfile::default(),
        };
        let pause_profile = match pause_table {
            Some(p) => PauseProfile::new(
                p.short.unwrap_or(base.short()),
                p.medium.unwrap_or(base.medium()),
                p.long.unwrap_or(base.long()),
            )?,
            None => base,
        };

        let track = TrackOptions {
            pause_profile,
            fade_ms,
            crossfade_ms,
            speed,
            normalize,
            fade_curve,
            crossfade_curve,
        };

        segment.validate()?;
        track.validate()?;
        volume.validate()?;

        Ok(Self {
            segment,
            track,
            volume,
        })
    }
}
