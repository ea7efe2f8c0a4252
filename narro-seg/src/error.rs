//! Error types for narro-seg

use thiserror::Error;

/// Main error type for narro-seg
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or shared-type errors from narro-common
    #[error(transparent)]
    Common(#[from] narro_common::Error),

    /// Malformed manifest line
    #[error("Manifest error at line {line}: {reason}")]
    Manifest { line: usize, reason: String },

    /// JSON encoding errors while writing a manifest
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using narro-seg Error
pub type Result<T> = std::result::Result<T, Error>;
