//! Error types shared across the Resguard crates

use thiserror::Error;

/// Core errors for identifier parsing and validation
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// Hex decoding failed
    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

impl CoreError {
    /// Create an invalid-input error from any displayable message
    pub fn invalid(msg: impl Into<String>) -> Self {
        CoreError::Invalid(msg.into())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
