//! Error types for Tumble generation, sampling and replay.

use thiserror::Error;

/// Main error type for Tumble.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TumbleError {
    /// Invalid run configuration (parameters, replay path, engine tag).
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Invalid generator construction.
    #[error("Invalid generator: {message}")]
    InvalidGenerator { message: String },

    /// A replay path asked for a shrink candidate that does not exist.
    #[error("Unable to replay path {path}: round {round} has no candidate at index {requested}")]
    ReplayExhausted {
        path: String,
        round: usize,
        requested: usize,
    },

    /// A property predicate rejected a value.
    #[error("Property failed: {counterexample}")]
    PropertyFailed { counterexample: String },
}

impl TumbleError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        TumbleError::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn generator(message: impl Into<String>) -> Self {
        TumbleError::InvalidGenerator {
            message: message.into(),
        }
    }

    /// Whether this error comes from a malformed configuration or generator
    /// definition rather than from running anything.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TumbleError::InvalidConfig { .. } | TumbleError::InvalidGenerator { .. }
        )
    }
}

/// Result type for Tumble operations.
pub type Result<T> = std::result::Result<T, TumbleError>;
