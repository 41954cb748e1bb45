use std::fmt;

use crate::record::RecordId;

/// Error type for record store operations.
///
/// Every variant is a local, recoverable condition; the store remains
/// usable after any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store has not been opened yet.
    NotInitialized,
    /// A required field is missing or empty, or an import document is malformed.
    Validation(String),
    /// A uniqueness constraint would be violated. Names the offending field.
    Conflict { field: String },
    /// No record with the given id.
    NotFound { id: RecordId },
    /// Backend-level fault (lock poisoned, serialization failure).
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotInitialized => write!(f, "store not initialized"),
            StoreError::Validation(msg) => write!(f, "validation error: {}", msg),
            StoreError::Conflict { field } => {
                write!(f, "duplicate value for unique field: {}", field)
            }
            StoreError::NotFound { id } => write!(f, "record not found: {}", id),
            StoreError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}
