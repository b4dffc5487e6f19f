//! Error type for roster operations

use thiserror::Error;

use crate::store::StoreError;

/// Result type for roster operations
pub type RosterResult<T> = Result<T, RosterError>;

/// Stable classification of a [`RosterError`], for the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidTransition,
    Validation,
    Storage,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidTransition => "INVALID_TRANSITION",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Storage => "STORAGE_ERROR",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Player not found")]
    NotFound { id: u64 },

    #[error("{0}")]
    InvalidTransition(String),

    #[error("Invalid player name: {0}")]
    InvalidName(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    /// A staged change broke a roster invariant and was rolled back
    #[error("Roster invariant violated: {0}")]
    InvariantViolation(String),
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::NotFound { .. } => ErrorKind::NotFound,
            RosterError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            RosterError::InvalidName(_) => ErrorKind::Validation,
            RosterError::Storage(_) => ErrorKind::Storage,
            RosterError::InvariantViolation(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn transition(message: impl Into<String>) -> Self {
        RosterError::InvalidTransition(message.into())
    }
}
