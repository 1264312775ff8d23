//! Error types for fusion operations.

use thiserror::Error;

/// Result type for fusion operations.
pub type FusionResult<T> = Result<T, FusionError>;

/// Errors that can occur during analysis fusion.
///
/// Every variant is a deterministic function of input shape; nothing here is
/// transient, so callers have nothing to retry. A component either returns a
/// complete result or one of these.
#[derive(Debug, Error)]
pub enum FusionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing dependency: {0} must be supplied before synthesis")]
    MissingDependency(&'static str),
}

impl FusionError {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
