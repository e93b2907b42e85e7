//! Error handling for the review service

use progress_core::{GroupId, ProgressError, SessionId, WordId};
use thiserror::Error;

/// Service error types
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Progress(#[from] ProgressError),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Word not found: {0}")]
    WordNotFound(WordId),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// Stable machine-readable kind for the transport layer to map.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Progress(_) | ServiceError::Config(_) => "invalid_input",
            ServiceError::WordNotFound(_)
            | ServiceError::SessionNotFound(_)
            | ServiceError::GroupNotFound(_) => "not_found",
            ServiceError::Storage(_) => "storage_error",
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;
