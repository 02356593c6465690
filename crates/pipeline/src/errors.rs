//! Error types for the IssueLens search domain.
//!
//! [`LookupError`] is what a remote collaborator reports when it cannot answer.
//! It never reaches the output boundary: the chains collapse it into an empty
//! result at the stage where it occurred (see [`crate::normalize`]).
//!
//! [`ConfigurationError`] covers runtime configuration that must be rejected
//! before any task starts.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Lookup failures
// ---------------------------------------------------------------------------

/// A remote lookup could not produce an answer.
///
/// "Not found" is not an error; repository lookups report it as
/// [`crate::RepositoryRef::NotFound`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    /// The request could not complete (connection refused, timeout, TLS).
    #[error("Transport failure during {operation}: {message}")]
    Transport {
        /// Short label of the remote operation, e.g. `"lookup repository"`.
        operation: String,
        message: String,
    },

    /// The remote system answered with a non-success status.
    #[error("{operation} returned HTTP {status}")]
    Status { operation: String, status: u16 },

    /// The remote system answered with a body the collaborator could not interpret.
    #[error("Could not decode response of {operation}: {message}")]
    Deserialization { operation: String, message: String },

    /// The query text cannot be expressed as a lookup against the remote system.
    #[error("'{name}' is not a valid lookup name")]
    InvalidName { name: String },
}

impl LookupError {
    /// Stable label recorded as the `error.kind` field when the failure is logged.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Transport { .. } => "transport",
            LookupError::Status { .. } => "status",
            LookupError::Deserialization { .. } => "deserialization",
            LookupError::InvalidName { .. } => "invalid_name",
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// The runtime configuration is invalid.
///
/// Produced at startup; the pipeline never starts with an invalid config.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Configuration error: {message}")]
pub struct ConfigurationError {
    /// Description of the configuration problem.
    pub message: String,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_kind_labels() {
        let err = LookupError::Status {
            operation: "lookup issues".into(),
            status: 502,
        };
        assert_eq!(err.kind(), "status");
        assert_eq!(err.to_string(), "lookup issues returned HTTP 502");
    }
}
