//! Common error types for narro

use thiserror::Error;

/// Common result type for narro operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by every narro crate
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration value out of range or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
