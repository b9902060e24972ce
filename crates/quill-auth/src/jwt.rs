//! Session token issuance and validation.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use quill_core::{Clock, SystemClock};
use tracing::debug;

use crate::claims::Claims;
use crate::error::TokenError;

/// Lifetime of a session token: 24 hours.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and verifies HS256 session tokens signed with a process secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a `TokenService` reading time from the system clock.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    /// Create a `TokenService` with an explicit clock.
    pub fn with_clock(secret: &[u8], clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptyKey);
        }

        // Expiry is checked against the injected clock, not jsonwebtoken's.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        })
    }

    /// Issue a session token for the given user.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        if user_id <= 0 || email.trim().is_empty() {
            return Err(TokenError::InvalidSubject);
        }

        let now = self.clock.now();
        let claims = Claims {
            jti: uuid::Uuid::new_v4().to_string(),
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        let token = jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        debug!(user_id, jti = %claims.jti, exp = claims.exp, "Session token issued");
        Ok(token)
    }

    /// Validate a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::EmptyToken);
        }

        let header = jsonwebtoken::decode_header(token).map_err(|_| TokenError::MalformedToken)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::MalformedToken);
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?;
        let claims = data.claims;

        claims.user_id()?;
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::InvalidAlgorithm => {
            TokenError::MalformedToken
        }
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::InvalidClaims,
    }
}
