//! JWT claims structure for Quill session tokens.

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// JWT claims embedded in session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// JWT ID (unique per token).
    pub jti: String,
    /// Subject (user ID, decimal).
    pub sub: String,
    /// Subject email at issue time.
    pub email: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, TokenError> {
        match self.sub.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(TokenError::InvalidClaims),
        }
    }

    /// Whether the token is expired at `now` (expiry is exclusive).
    pub const fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            jti: "j".into(),
            sub: sub.into(),
            email: "a@b.co".into(),
            iat: 100,
            exp: 200,
        }
    }

    #[test]
    fn user_id_parses_positive_subjects_only() {
        assert_eq!(claims("42").user_id(), Ok(42));
        assert_eq!(claims("0").user_id(), Err(TokenError::InvalidClaims));
        assert_eq!(claims("-3").user_id(), Err(TokenError::InvalidClaims));
        assert_eq!(claims("alice").user_id(), Err(TokenError::InvalidClaims));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let c = claims("1");
        assert!(!c.is_expired_at(199));
        assert!(c.is_expired_at(200));
        assert!(c.is_expired_at(201));
    }
}
