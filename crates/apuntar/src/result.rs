//! Result and error types for Apuntar.

use thiserror::Error;

/// Result type for Apuntar operations
pub type ApuntarResult<T> = Result<T, ApuntarError>;

/// Errors that can occur at the boundaries of the engine.
///
/// Resolution, hittability and ranking never fail; a missing element is a
/// value, not an error. These variants cover parsing inputs and calling an
/// operation in a state where it makes no sense.
#[derive(Debug, Error)]
pub enum ApuntarError {
    /// A target could not be built from its textual or wire form
    #[error("Invalid target: {message}")]
    InvalidTarget {
        /// Error message
        message: String,
    },

    /// A predicate expression uses syntax outside the supported grammar
    #[error("Invalid predicate: {message}")]
    InvalidPredicate {
        /// Error message
        message: String,
    },

    /// Invalid state error (operation called in wrong state)
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ApuntarError {
    /// Create an invalid target error
    #[must_use]
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    /// Create an invalid predicate error
    #[must_use]
    pub fn invalid_predicate(message: impl Into<String>) -> Self {
        Self::InvalidPredicate {
            message: message.into(),
        }
    }

    /// Create an invalid state error
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
