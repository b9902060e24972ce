//! Error types for Quill core library.

use thiserror::Error;

/// Result type alias using Quill Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Quill operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
