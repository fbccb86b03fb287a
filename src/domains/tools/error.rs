//! Tool-specific error types.

use thiserror::Error;

use crate::domains::spotify::{IdError, SpotifyError};

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The remote call behind the tool failed.
    #[error("{0}")]
    ExecutionFailed(#[from] SpotifyError),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

impl From<IdError> for ToolError {
    fn from(err: IdError) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}
