//! Operator subcommands: password hashing and token inspection.
//!
//! User-facing output uses writeln! to the given writer (stdout in the
//! binary), not debug output.

use std::io::Write;

use anyhow::Context;
use quill_auth::{TokenService, hash_password, verify_password};

/// Admin subcommand actions.
#[derive(clap::Subcommand)]
pub enum AdminAction {
    /// Hash a password and print the PHC string.
    HashPassword {
        /// Plaintext password.
        password: String,
    },
    /// Check a password against a stored hash.
    VerifyPassword {
        /// Plaintext password.
        password: String,
        /// PHC hash string.
        hash: String,
    },
    /// Issue a 24h session token.
    IssueToken {
        /// Numeric user id.
        user_id: i64,
        /// Email embedded in the token.
        email: String,
    },
    /// Verify a session token and print its claims.
    VerifyToken {
        /// Token to verify.
        token: String,
    },
}

/// Execute an admin subcommand. Returns `false` when the command ran but
/// the answer is negative (password mismatch, token rejected).
pub fn run(action: AdminAction, jwt_secret: &str, out: &mut impl Write) -> anyhow::Result<bool> {
    match action {
        AdminAction::HashPassword { password } => {
            let hash = hash_password(&password)?;
            writeln!(out, "{hash}")?;
            Ok(true)
        }
        AdminAction::VerifyPassword { password, hash } => {
            let matched = verify_password(&password, &hash);
            writeln!(out, "{}", if matched { "match" } else { "no match" })?;
            Ok(matched)
        }
        AdminAction::IssueToken { user_id, email } => {
            let tokens = token_service(jwt_secret)?;
            let token = tokens.issue(user_id, &email)?;
            writeln!(out, "{token}")?;
            Ok(true)
        }
        AdminAction::VerifyToken { token } => {
            let tokens = token_service(jwt_secret)?;
            match tokens.verify(&token) {
                Ok(claims) => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&claims)?)?;
                    Ok(true)
                }
                Err(e) => {
                    writeln!(out, "rejected: {e}")?;
                    Ok(false)
                }
            }
        }
    }
}

fn token_service(jwt_secret: &str) -> anyhow::Result<TokenService> {
    TokenService::new(jwt_secret.as_bytes()).with_context(|| {
        format!(
            "No JWT secret configured (set {} or auth.jwt_secret)",
            quill_core::config::ENV_JWT_SECRET
        )
    })
}
