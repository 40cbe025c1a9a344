//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment value could not be parsed.
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value as found.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
