//! The record abstraction shared by every collection.

use std::borrow::Cow;

use quill_core::ValidationError;

use crate::error::StoreError;

/// Store-assigned identifier. Positive, strictly increasing from 1.
pub type RecordId = i64;

/// An entity that can live in a [`RecordStore`](crate::RecordStore).
pub trait Record: Clone + Send + Sync {
    /// Partial or whole-field replacement applied by `update`.
    type Patch: Send;

    /// Human-readable kind used in error messages (`"message"`, `"user"`).
    const KIND: &'static str;

    /// Owner or author used by `get_by_owner`.
    fn owner(&self) -> Cow<'_, str>;

    /// Value that must be unique across the collection, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Assign the identifier and creation timestamps.
    fn stamp(&mut self, id: RecordId, now: i64);

    /// Apply `patch` and refresh `updated_at`. On error `self` may be
    /// partially modified; the store only commits copies that succeed.
    fn apply(&mut self, patch: Self::Patch, now: i64) -> Result<(), ValidationError>;
}

/// Storage contract implemented by the in-memory store and by any other
/// backend (e.g. a SQL table) that wants to sit behind the repositories.
pub trait RecordRepository<R: Record>: Send + Sync {
    fn create(&self, record: R) -> Result<R, StoreError>;
    fn get_by_id(&self, id: RecordId) -> Result<R, StoreError>;
    fn get_by_key(&self, key: &str) -> Result<R, StoreError>;
    fn get_all(&self) -> Result<Vec<R>, StoreError>;
    fn update(&self, id: RecordId, patch: R::Patch) -> Result<R, StoreError>;
    fn delete(&self, id: RecordId) -> Result<(), StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
    fn get_by_owner(&self, owner: &str) -> Result<Vec<R>, StoreError>;
}
