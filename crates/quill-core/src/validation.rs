//! Identity validation rules.
//!
//! Pure predicates over user-supplied identity fields. Two password rules
//! exist on purpose: [`validate_password`] is the domain rule applied when an
//! account is created or a password is changed, [`validate_login_password`]
//! is the looser shape check applied before hashing or verifying on the
//! login path.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static regex is valid")
});

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const LOGIN_PASSWORD_MIN_CHARS: usize = 6;

/// A character class a password is required to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Letter,
    Lowercase,
    Uppercase,
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Digit => "number",
            Self::Letter => "letter",
            Self::Lowercase => "lowercase letter",
            Self::Uppercase => "uppercase letter",
        };
        f.write_str(s)
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("{field} is invalid: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    #[error("{field} must be {}", describe_bounds(.min, .max))]
    InvalidLength {
        field: &'static str,
        min: usize,
        max: Option<usize>,
    },

    #[error("password must contain at least one {missing}")]
    WeakPassword { missing: CharClass },
}

fn describe_bounds(min: &usize, max: &Option<usize>) -> String {
    match max {
        Some(max) => format!("between {min} and {max} characters long"),
        None => format!("at least {min} characters long"),
    }
}

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check that `email` looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyInput { field: "email" });
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "expected local@domain.tld",
        });
    }
    Ok(())
}

/// Check that the trimmed display name is 2 to 50 characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(ValidationError::InvalidLength {
            field: "name",
            min: NAME_MIN_CHARS,
            max: Some(NAME_MAX_CHARS),
        });
    }
    Ok(())
}

/// Domain password rule: 8+ characters with a digit, a lowercase and an
/// uppercase letter.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::InvalidLength {
            field: "password",
            min: PASSWORD_MIN_CHARS,
            max: None,
        });
    }
    require_class(password, CharClass::Digit, |c| c.is_ascii_digit())?;
    require_class(password, CharClass::Lowercase, |c| c.is_ascii_lowercase())?;
    require_class(password, CharClass::Uppercase, |c| c.is_ascii_uppercase())?;
    Ok(())
}

/// Login password rule: 6+ characters with at least one letter and one digit.
pub fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    require_class(password, CharClass::Digit, |c| c.is_ascii_digit())?;
    require_class(password, CharClass::Letter, |c| c.is_ascii_alphabetic())?;
    if password.chars().count() < LOGIN_PASSWORD_MIN_CHARS {
        return Err(ValidationError::InvalidLength {
            field: "password",
            min: LOGIN_PASSWORD_MIN_CHARS,
            max: None,
        });
    }
    Ok(())
}

/// Reject values that are blank after trimming.
pub fn validate_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyInput { field });
    }
    Ok(())
}

fn require_class(
    password: &str,
    class: CharClass,
    pred: impl Fn(char) -> bool,
) -> Result<(), ValidationError> {
    if password.chars().any(pred) {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword { missing: class })
    }
}
