//! # narro common library
//!
//! Shared code for the narro crates:
//! - Pause tags and validated pause profiles
//! - Fade curve definitions
//! - Configuration model, presets and TOML loading
//! - Common error type

pub mod config;
pub mod error;
pub mod fade_curves;
pub mod pause;

pub use config::{PipelineConfig, SegmentConfig, SegmentMode, TrackOptions, VolumeConfig};
pub use error::{Error, Result};
pub use fade_curves::FadeCurve;
pub use pause::{PauseProfile, PauseTag};
