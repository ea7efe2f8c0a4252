//! Error types for narro-track
//!
//! Defines module-specific error types using thiserror for clear error propagation.

use thiserror::Error;

/// Main error type for narro-track
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid options (speed, gain tolerance, segment length, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Track assembly failed while processing the chunk at `index` (1-based)
    #[error("Build failed at chunk {index}: {reason}")]
    Build { index: usize, reason: String },

    /// Sample rate conversion errors
    #[error("Resample error: {0}")]
    Resample(String),

    /// Two buffers that must share a format do not
    #[error("Format mismatch: {0}")]
    FormatMismatch(String),

    /// WAV encode/decode errors
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// JSON export errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<narro_common::Error> for Error {
    fn from(err: narro_common::Error) -> Self {
        match err {
            narro_common::Error::Io(e) => Error::Io(e),
            other => Error::Config(other.to_string()),
        }
    }
}

/// Convenience Result type using narro-track Error
pub type Result<T> = std::result::Result<T, Error>;
