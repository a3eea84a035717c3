//! # Resguard Core
//!
//! Shared identifier types and error handling for the Resguard ACL oracle.
//! This package owns the primitive newtypes so the ledger, engine, and any
//! future transport crates agree on one representation.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{ActionSelector, Identity, ResourceId};
