//! User repository.

use quill_core::validation::{normalize_email, validate_email};
use tracing::info;

use crate::memory::RecordStore;
use crate::models::{User, UserPatch};
use crate::record::{RecordId, RecordRepository};

use super::RepositoryError;

/// Validating facade over the user collection. Email uniqueness is enforced
/// by the backend's unique-key index, so two racing registrations for the
/// same address cannot both succeed.
pub struct UserRepository<S = RecordStore<User>> {
    store: S,
}

impl UserRepository {
    pub fn in_memory() -> Self {
        Self::new(RecordStore::new())
    }
}

impl<S: RecordRepository<User>> UserRepository<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a user from raw email and name plus an already-hashed password.
    pub fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = User::new(email, name, password_hash)?;
        let user = self.store.create(user)?;
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub fn get(&self, id: RecordId) -> Result<User, RepositoryError> {
        Ok(self.store.get_by_id(id)?)
    }

    /// Look up a user by email, ignoring case and surrounding whitespace.
    pub fn get_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        validate_email(email)?;
        Ok(self.store.get_by_key(&normalize_email(email))?)
    }

    pub fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.store.get_all()?)
    }

    pub fn update(&self, id: RecordId, patch: UserPatch) -> Result<User, RepositoryError> {
        patch.validate()?;
        Ok(self.store.update(id, patch)?)
    }

    pub fn update_name(&self, id: RecordId, name: &str) -> Result<User, RepositoryError> {
        self.update(
            id,
            UserPatch {
                name: Some(name.to_string()),
                ..UserPatch::default()
            },
        )
    }

    pub fn update_email(&self, id: RecordId, email: &str) -> Result<User, RepositoryError> {
        self.update(
            id,
            UserPatch {
                email: Some(email.to_string()),
                ..UserPatch::default()
            },
        )
    }

    /// Replace the stored password hash.
    pub fn set_password_hash(&self, id: RecordId, hash: &str) -> Result<User, RepositoryError> {
        self.update(
            id,
            UserPatch {
                password_hash: Some(hash.to_string()),
                ..UserPatch::default()
            },
        )
    }

    pub fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        self.store.delete(id)?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.store.count()?)
    }
}
