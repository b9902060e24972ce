//! Quill Core Library
//!
//! Shared functionality for Quill components:
//! - Identity validation (email, name, password rules)
//! - Configuration resolution and hierarchy
//! - Wall clock abstraction for timestamps and token expiry
//! - Common error types

pub mod clock;
pub mod config;
pub mod error;
pub mod tracing_init;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock, unix_timestamp};
pub use config::Config;
pub use error::{Error, Result};
pub use validation::ValidationError;
