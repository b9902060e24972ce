//! Store error types.

use quill_core::ValidationError;

/// Errors from record store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// A patch would leave the record in an invalid state; nothing was written.
    #[error("Rejected: {0}")]
    Rejected(#[from] ValidationError),
}
