//! Auth error types.

use quill_core::ValidationError;

/// Errors from password hashing.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Password cannot be empty")]
    EmptyInput,

    #[error("Password rejected: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Errors from session token construction, issuance and verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token secret key cannot be empty")]
    EmptyKey,

    #[error("Token subject must have a positive id and a non-empty email")]
    InvalidSubject,

    #[error("Token is empty")]
    EmptyToken,

    #[error("Token is malformed")]
    MalformedToken,

    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token claims are invalid")]
    InvalidClaims,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}
