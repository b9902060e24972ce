//! Account registration, login and token authentication.

use std::sync::Arc;

use quill_auth::{
    CredentialError, TokenError, TokenService, check_login_password, hash_password,
    verify_password,
};
use quill_core::ValidationError;
use quill_core::validation::{validate_email, validate_name, validate_password};
use quill_store::{
    RecordId, RecordRepository, RecordStore, RepositoryError, StoreError, User, UserRepository,
};
use tracing::{info, instrument, warn};

/// Errors from account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Unknown email or wrong password. The two are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

pub struct AccountService<S = RecordStore<User>> {
    users: UserRepository<S>,
    tokens: Arc<TokenService>,
}

impl<S: RecordRepository<User>> AccountService<S> {
    pub const fn new(users: UserRepository<S>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub const fn users(&self) -> &UserRepository<S> {
        &self.users
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an account and log it in.
    #[instrument(skip(self, name, password), fields(op = "register"))]
    pub fn register(&self, email: &str, name: &str, password: &str) -> Result<Session, AccountError> {
        validate_email(email)?;
        validate_name(name)?;
        validate_password(password)?;

        // Skip the expensive hash for an obvious duplicate; the store still
        // enforces uniqueness atomically on create.
        if self.users.get_by_email(email).is_ok() {
            return Err(RepositoryError::Store(StoreError::AlreadyExists(format!(
                "user with email {}",
                email.trim().to_lowercase()
            )))
            .into());
        }

        let hash = hash_password(password)?;
        let user = self.users.create(email, name, &hash)?;
        let token = self.tokens.issue(user.id, &user.email)?;

        info!(user_id = user.id, "User registered");
        Ok(Session { user, token })
    }

    /// Exchange email and password for a session token.
    #[instrument(skip(self, password), fields(op = "login"))]
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        check_login_password(password)?;

        let user = match self.users.get_by_email(email) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                warn!("Failed login attempt for unknown email");
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !verify_password(password, &user.password_hash) {
            warn!(user_id = user.id, "Failed login attempt");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        info!(user_id = user.id, "User logged in");
        Ok(Session { user, token })
    }

    /// Resolve a session token to the user it was issued for.
    ///
    /// Fails if the user has since been deleted or changed email.
    pub fn authenticate(&self, token: &str) -> Result<User, AccountError> {
        let claims = self.tokens.verify(token)?;
        let user = match self.users.get(claims.user_id()?) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => return Err(AccountError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        };
        if user.email != claims.email {
            return Err(TokenError::InvalidClaims.into());
        }
        Ok(user)
    }

    /// Replace a password after checking the current one.
    #[instrument(skip(self, current, new), fields(op = "change_password"))]
    pub fn change_password(
        &self,
        user_id: RecordId,
        current: &str,
        new: &str,
    ) -> Result<User, AccountError> {
        let user = self.users.get(user_id)?;
        if !verify_password(current, &user.password_hash) {
            warn!(user_id, "Password change with wrong current password");
            return Err(AccountError::InvalidCredentials);
        }
        validate_password(new)?;

        let hash = hash_password(new)?;
        let user = self.users.set_password_hash(user_id, &hash)?;
        info!(user_id, "Password changed");
        Ok(user)
    }
}
