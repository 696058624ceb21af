//! Error taxonomy shared by every tutor operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Status classification carried by every failure result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required input missing or empty. Nothing was sent upstream.
    Validation,
    /// The generative or speech provider returned an error.
    UpstreamFailure,
    /// Unexpected failure while shaping a reply.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::UpstreamFailure => write!(f, "upstream_failure"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TutorError {
    #[error("{0}")]
    Validation(String),
    /// Provider message, passed through untouched.
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Internal(String),
}

impl TutorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TutorError::Validation(_) => ErrorKind::Validation,
            TutorError::Upstream(_) => ErrorKind::UpstreamFailure,
            TutorError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Wraps a capability failure, keeping the provider's top-level message.
    pub fn upstream(err: anyhow::Error) -> Self {
        TutorError::Upstream(err.to_string())
    }
}
