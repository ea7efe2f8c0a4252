//! Test helper modules for narro-track integration tests
//!
//! Provides reusable test infrastructure components:
//! - Audio generation: sine/silence buffers and WAV files
//! - Level assertions for measured tracks

pub mod audio_analysis;
pub mod audio_generator;

pub use audio_analysis::{assert_close, rms_db};
pub use audio_generator::{
    calculate_frame_count, generate_silent_wav, generate_sine_wav, mono_format, silence_buffer,
    sine_buffer, TEST_SAMPLE_RATE,
};
