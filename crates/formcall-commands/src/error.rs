//! Error types for command dispatch.

use thiserror::Error;

/// Errors a command call can reject with.
///
/// The `Display` form is what a form view shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No handler is registered under this name.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument was not supplied.
    #[error("Missing {0} argument")]
    MissingArgument(String),

    /// An argument was supplied but could not be used.
    #[error("Invalid {name} argument: {reason}")]
    InvalidArgument {
        /// Argument key.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The handler ran and failed.
    #[error("Command failed: {0}")]
    Failed(String),

    /// The call never settled normally (the task panicked or was dropped).
    #[error("Command aborted: {0}")]
    Aborted(String),
}

impl CommandError {
    /// Shorthand for [`CommandError::InvalidArgument`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, CommandError>;
