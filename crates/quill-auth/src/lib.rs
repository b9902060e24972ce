//! Quill authentication library.
//!
//! Provides password hashing (argon2id) and signed session tokens (HS256 JWT).

pub mod claims;
pub mod error;
pub mod jwt;
pub mod password;

pub use claims::Claims;
pub use error::{CredentialError, TokenError};
pub use jwt::{TOKEN_TTL_SECS, TokenService};
pub use password::{check_login_password, hash_password, verify_password};
