//! Error types for the Pulse Agent

use thiserror::Error;

/// Agent errors
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Disk collection failed for {path}: {reason}")]
    CollectionError { path: String, reason: String },

    #[error("No metrics snapshot available yet")]
    NotReady,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AgentError {
    pub fn collection(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AgentError::CollectionError {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
