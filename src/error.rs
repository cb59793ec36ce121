//! RECSTORE - Custom Error Types
//! Defines the error hierarchy for the in-memory record store.

use thiserror::Error;

use crate::types::Key;

/// Custom Result type for the record store.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for the record store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// An operation required an existing record but none was present.
    #[error("Error Code 2: Key not found: {0}")]
    NotFound(Key),

    /// A compound mutation found a stored value of the wrong type.
    #[error("Error Code 12: Bin type: bin '{bin}' expected {expected}, found {found}")]
    TypeMismatch {
        bin: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The operation belongs to the wider client surface this store does not implement.
    #[error("{0} is not supported by this implementation")]
    Unsupported(&'static str),

    /// Node lookup on a store that has no cluster nodes.
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Numeric result code carried by data-layer errors.
    /// Returns `None` for errors that are not produced by record data.
    pub fn result_code(&self) -> Option<u8> {
        match self {
            StoreError::NotFound(_) => Some(2),
            StoreError::TypeMismatch { .. } => Some(12),
            _ => None,
        }
    }

    /// Returns true if the caller used an operation outside the supported set.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, StoreError::Unsupported(_))
    }
}
