//! Error types for the ACL oracle

use resguard_core::ResourceId;
use thiserror::Error;

/// ACL oracle errors
///
/// Every error is terminal for the call that produced it: a failed call
/// leaves all persisted state exactly as it was, and the caller decides
/// whether to resubmit with corrected input.
#[derive(Debug, Error)]
pub enum AclError {
    /// Invalid input (empty required string, null identity, rejected payload)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Caller is not the required authority for the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Registration collision on an already-registered resource
    #[error("Resource already registered: {0}")]
    AlreadyExists(ResourceId),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AclError {
    /// Create an invalid-input error
    pub fn invalid(msg: impl Into<String>) -> Self {
        AclError::InvalidInput(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        AclError::Forbidden(msg.into())
    }
}

/// Result type for ACL operations
pub type Result<T> = std::result::Result<T, AclError>;
