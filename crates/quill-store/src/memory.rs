//! In-memory record store.
//!
//! One `RwLock` guards the whole collection: reads share it, every mutation
//! takes it exclusively. Nothing inside the critical section does I/O or
//! calls caller-supplied code, and every record handed out is a clone.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use quill_core::{Clock, SystemClock};
use tracing::debug;

use crate::error::StoreError;
use crate::record::{Record, RecordId, RecordRepository};

struct Inner<R> {
    records: BTreeMap<RecordId, R>,
    /// unique key -> id
    keys: HashMap<String, RecordId>,
    next_id: RecordId,
}

impl<R: Record> Inner<R> {
    fn not_found(id: RecordId) -> StoreError {
        StoreError::NotFound(format!("{} {id}", R::KIND))
    }

    fn key_taken(key: &str) -> StoreError {
        StoreError::AlreadyExists(format!("{} with key {key}", R::KIND))
    }
}

/// Thread-safe, identifier-indexed collection of records.
#[derive(Clone)]
pub struct RecordStore<R: Record> {
    inner: Arc<RwLock<Inner<R>>>,
    clock: Arc<dyn Clock>,
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: BTreeMap::new(),
                keys: HashMap::new(),
                next_id: 1,
            })),
            clock,
        }
    }

    /// Store `record` under the next identifier and return the stored copy.
    pub fn create(&self, mut record: R) -> Result<R, StoreError> {
        let now = self.clock.now();
        let mut inner = self.inner.write();

        if let Some(key) = record.unique_key() {
            if inner.keys.contains_key(key) {
                return Err(Inner::<R>::key_taken(key));
            }
        }

        let id = inner.next_id;
        inner.next_id += 1;
        record.stamp(id, now);

        if let Some(key) = record.unique_key() {
            inner.keys.insert(key.to_owned(), id);
        }
        inner.records.insert(id, record.clone());
        drop(inner);

        debug!(kind = R::KIND, id, "Record created");
        Ok(record)
    }

    pub fn get_by_id(&self, id: RecordId) -> Result<R, StoreError> {
        self.inner
            .read()
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| Inner::<R>::not_found(id))
    }

    /// Look up a record through its unique key.
    pub fn get_by_key(&self, key: &str) -> Result<R, StoreError> {
        let inner = self.inner.read();
        inner
            .keys
            .get(key)
            .and_then(|id| inner.records.get(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{} with key {key}", R::KIND)))
    }

    /// Snapshot of every live record in ascending identifier order.
    pub fn get_all(&self) -> Vec<R> {
        self.inner.read().records.values().cloned().collect()
    }

    /// Apply `patch` to the record with `id` and return the updated copy.
    ///
    /// The patch is applied to a copy; the stored record only changes if the
    /// patch validates and no unique key collides.
    pub fn update(&self, id: RecordId, patch: R::Patch) -> Result<R, StoreError> {
        let now = self.clock.now();
        let mut inner = self.inner.write();

        let current = inner
            .records
            .get(&id)
            .ok_or_else(|| Inner::<R>::not_found(id))?;
        let old_key = current.unique_key().map(str::to_owned);
        let mut updated = current.clone();
        updated.apply(patch, now)?;

        let new_key = updated.unique_key().map(str::to_owned);
        if new_key != old_key {
            if let Some(key) = &new_key {
                if inner.keys.get(key).is_some_and(|&owner| owner != id) {
                    return Err(Inner::<R>::key_taken(key));
                }
            }
            if let Some(key) = &old_key {
                inner.keys.remove(key);
            }
            if let Some(key) = new_key {
                inner.keys.insert(key, id);
            }
        }

        inner.records.insert(id, updated.clone());
        drop(inner);

        debug!(kind = R::KIND, id, "Record updated");
        Ok(updated)
    }

    /// Remove the record with `id`. Its identifier is never handed out again.
    pub fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let removed = inner
            .records
            .remove(&id)
            .ok_or_else(|| Inner::<R>::not_found(id))?;
        if let Some(key) = removed.unique_key() {
            inner.keys.remove(key);
        }
        drop(inner);

        debug!(kind = R::KIND, id, "Record deleted");
        Ok(())
    }

    /// Number of live records.
    pub fn count(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Every record owned by `owner`, in ascending identifier order.
    ///
    /// An owner with no records is reported as `NotFound` rather than an
    /// empty list; existing callers distinguish the two cases by it.
    pub fn get_by_owner(&self, owner: &str) -> Result<Vec<R>, StoreError> {
        let found: Vec<R> = self
            .inner
            .read()
            .records
            .values()
            .filter(|r| r.owner() == owner)
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(StoreError::NotFound(format!(
                "no {} records for owner {owner}",
                R::KIND
            )));
        }
        Ok(found)
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordRepository<R> for RecordStore<R> {
    fn create(&self, record: R) -> Result<R, StoreError> {
        Self::create(self, record)
    }

    fn get_by_id(&self, id: RecordId) -> Result<R, StoreError> {
        Self::get_by_id(self, id)
    }

    fn get_by_key(&self, key: &str) -> Result<R, StoreError> {
        Self::get_by_key(self, key)
    }

    fn get_all(&self) -> Result<Vec<R>, StoreError> {
        Ok(Self::get_all(self))
    }

    fn update(&self, id: RecordId, patch: R::Patch) -> Result<R, StoreError> {
        Self::update(self, id, patch)
    }

    fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        Self::delete(self, id)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(Self::count(self))
    }

    fn get_by_owner(&self, owner: &str) -> Result<Vec<R>, StoreError> {
        Self::get_by_owner(self, owner)
    }
}
