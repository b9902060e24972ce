//! Quill record store.
//!
//! - `RecordStore`: reader/writer-locked, identifier-indexed collection with
//!   monotonic ids that are never reused
//! - Message, user and post models with their validated constructors
//! - Repository facades that validate payloads before touching the store

pub mod error;
pub mod memory;
pub mod models;
pub mod record;
pub mod repository;


pub use error::StoreError;
pub use memory::RecordStore;
pub use models::*;
pub use record::{Record, RecordId, RecordRepository};
pub use repository::{
    ErrorKind, MessageRepository, PostRepository, RepositoryError, UserRepository,
};
