//! # narro track assembly library (narro-track)
//!
//! Turns independently synthesized chunk audio into one narration track.
//!
//! **Purpose:** Fade, join (crossfade or pause gap), speed-adjust and
//! normalize chunk buffers; measure the result; match loudness between two
//! tracks and compare them.
//!
//! **Architecture:** Synchronous in-memory transforms over f32 buffers, using
//! rubato for resampling and hound for WAV files

pub mod analysis;
pub mod audio;
pub mod builder;
pub mod compare;
pub mod error;
pub mod volume;

pub use analysis::{measure, measure_buffer, Metrics};
pub use audio::{change_speed, read_wav, write_wav, AudioBuffer, AudioFormat, Track};
pub use builder::{build_track, TrackBuilder};
pub use compare::{ab_swap_mix, CompareReport, ComparisonReport};
pub use error::{Error, Result};
pub use volume::{match_volume, plan_gain, GainAdjustment, TrackSide};
