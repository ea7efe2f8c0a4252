//! # Audio Module
//!
//! Sample buffers and the per-buffer operations track assembly is built from:
//! edge fades, crossfade/gap joining, gain, resampling and WAV I/O.

pub mod fade;
pub mod gain;
pub mod mixer;
pub mod resampler;
pub mod types;
pub mod wav;

pub use resampler::{change_speed, Resampler};
pub use types::{AudioBuffer, AudioFormat, Track};
pub use wav::{read_wav, write_wav};
