//! Bearer token check for transports.
//!
//! The transport hands over the raw `Authorization` header value; the gate
//! strips the scheme and asks the token service for the claims.

use quill_auth::{Claims, TokenError, TokenService};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, TokenError> {
    let token = header
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .ok_or(TokenError::EmptyToken)?;
    if token.is_empty() {
        return Err(TokenError::EmptyToken);
    }
    Ok(token)
}

/// Validate the bearer token in `header` and return its claims.
pub fn authorize(tokens: &TokenService, header: Option<&str>) -> Result<Claims, TokenError> {
    tokens.verify(bearer_token(header)?)
}
