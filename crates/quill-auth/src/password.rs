//! Password hashing and verification using argon2id.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use quill_core::validation::validate_login_password;

use crate::error::CredentialError;

/// Hash a password using argon2id with a random salt.
///
/// The result is a PHC string carrying algorithm, version, cost parameters,
/// salt and digest, so [`verify_password`] needs nothing else.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    if password.is_empty() {
        return Err(CredentialError::EmptyInput);
    }
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2id hash.
///
/// Returns `false` for empty inputs and for hashes that do not parse; a
/// mismatch is an ordinary negative answer, not an error. The digest
/// comparison inside `argon2` is constant-time.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if password.is_empty() || hash.is_empty() {
        return false;
    }
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Shape check applied to passwords on the login path before hashing or
/// verifying.
pub fn check_login_password(password: &str) -> Result<(), CredentialError> {
    if password.is_empty() {
        return Err(CredentialError::EmptyInput);
    }
    validate_login_password(password)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("mysecret").unwrap();
        assert!(verify_password("mysecret", &hash));
        assert!(!verify_password("wrongpassword", &hash));
    }

    #[test]
    fn hash_is_self_describing() {
        let hash = hash_password("mysecret").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m="));
        assert!(!hash.contains("mysecret"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let h1 = hash_password("password1").unwrap();
        let h2 = hash_password("password1").unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password("password1", &h1));
        assert!(verify_password("password1", &h2));
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(matches!(hash_password(""), Err(CredentialError::EmptyInput)));
    }

    #[test]
    fn any_non_empty_password_round_trips() {
        let long = "x".repeat(200);
        for pw in ["a", " ", "пароль", long.as_str()] {
            let hash = hash_password(pw).unwrap();
            assert!(verify_password(pw, &hash), "{pw:?} should verify");
        }
    }

    #[test]
    fn verify_is_false_for_empty_or_garbage() {
        let hash = hash_password("mysecret").unwrap();
        assert!(!verify_password("", &hash));
        assert!(!verify_password("mysecret", ""));
        assert!(!verify_password("mysecret", "not-a-phc-string"));
    }

    #[test]
    fn login_check_uses_loose_rule() {
        assert!(check_login_password("abc123").is_ok());
        assert!(matches!(
            check_login_password(""),
            Err(CredentialError::EmptyInput)
        ));
        assert!(matches!(
            check_login_password("abcdef"),
            Err(CredentialError::Invalid(_))
        ));
    }
}
