//! Chat message repository.

use crate::memory::RecordStore;
use crate::models::{Message, MessagePatch};
use crate::record::{RecordId, RecordRepository};

use super::RepositoryError;

/// Validating facade over a message collection.
pub struct MessageRepository<S = RecordStore<Message>> {
    store: S,
}

impl MessageRepository {
    /// Repository over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(RecordStore::new())
    }
}

impl<S: RecordRepository<Message>> MessageRepository<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create(&self, username: &str, content: &str) -> Result<Message, RepositoryError> {
        let message = Message::new(username, content)?;
        Ok(self.store.create(message)?)
    }

    pub fn get(&self, id: RecordId) -> Result<Message, RepositoryError> {
        Ok(self.store.get_by_id(id)?)
    }

    pub fn list(&self) -> Result<Vec<Message>, RepositoryError> {
        Ok(self.store.get_all()?)
    }

    /// Messages sent by `username`; `NotFound` if there are none.
    pub fn list_by_user(&self, username: &str) -> Result<Vec<Message>, RepositoryError> {
        Ok(self.store.get_by_owner(username)?)
    }

    pub fn update(&self, id: RecordId, content: &str) -> Result<Message, RepositoryError> {
        let patch = MessagePatch {
            content: content.to_string(),
        };
        Ok(self.store.update(id, patch)?)
    }

    pub fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        Ok(self.store.delete(id)?)
    }

    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.store.count()?)
    }
}
