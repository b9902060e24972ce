//! Quill Server Library
//!
//! Glue between the record store and the auth primitives:
//! - Account registration, login and token authentication
//! - Bearer token extraction for transports
//! - Operator commands behind the `quill` binary

pub mod accounts;
pub mod admin_cmd;
pub mod gate;


pub use accounts::{AccountError, AccountService, Session};
pub use gate::{authorize, bearer_token};
