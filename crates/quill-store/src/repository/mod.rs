//! Repository facades.
//!
//! Each facade validates its payload with the identity and model rules, then
//! hands the mutation to a [`RecordRepository`](crate::RecordRepository)
//! backend. Transports call these, never the store directly.

mod messages;
mod posts;
mod users;

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests;

use quill_core::ValidationError;

use crate::error::StoreError;

pub use messages::MessageRepository;
pub use posts::PostRepository;
pub use users::UserRepository;

/// Coarse failure category for mapping onto transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    EmptyInput,
    InvalidInput,
}

/// Errors returned by the repository facades.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Rejected(v) => Self::Invalid(v),
            other => Self::Store(other),
        }
    }
}

impl RepositoryError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(ValidationError::EmptyInput { .. }) => ErrorKind::EmptyInput,
            Self::Invalid(_) | Self::Store(StoreError::Rejected(_)) => ErrorKind::InvalidInput,
            Self::Store(StoreError::NotFound(_)) => ErrorKind::NotFound,
            Self::Store(StoreError::AlreadyExists(_)) => ErrorKind::AlreadyExists,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }
}
