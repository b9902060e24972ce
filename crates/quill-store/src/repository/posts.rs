//! Blog post repository.

use crate::memory::RecordStore;
use crate::models::{NewPost, Post, PostPatch};
use crate::record::{RecordId, RecordRepository};

use super::RepositoryError;

/// Validating facade over a post collection.
pub struct PostRepository<S = RecordStore<Post>> {
    store: S,
}

impl PostRepository {
    pub fn in_memory() -> Self {
        Self::new(RecordStore::new())
    }
}

impl<S: RecordRepository<Post>> PostRepository<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create(&self, new: NewPost) -> Result<Post, RepositoryError> {
        let post = Post::new(new)?;
        Ok(self.store.create(post)?)
    }

    pub fn get(&self, id: RecordId) -> Result<Post, RepositoryError> {
        Ok(self.store.get_by_id(id)?)
    }

    pub fn list(&self) -> Result<Vec<Post>, RepositoryError> {
        Ok(self.store.get_all()?)
    }

    /// Posts written by `user_id`; `NotFound` if there are none.
    pub fn list_by_user(&self, user_id: RecordId) -> Result<Vec<Post>, RepositoryError> {
        Ok(self.store.get_by_owner(&user_id.to_string())?)
    }

    /// Merge `patch` into the post; the merged post must still be valid.
    pub fn update(&self, id: RecordId, patch: PostPatch) -> Result<Post, RepositoryError> {
        Ok(self.store.update(id, patch)?)
    }

    pub fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        Ok(self.store.delete(id)?)
    }

    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.store.count()?)
    }
}
