//! # Store Errors
//!
//! Failures surfaced by the storage collaborator. They are propagated
//! unchanged by the search layer; nothing here is retried.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not serve the round trip (connectivity, poisoned lock)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A write would break referential or value constraints
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "ROSTER_STORE_UNAVAILABLE",
            StoreError::Constraint(_) => "ROSTER_STORE_CONSTRAINT",
        }
    }

    /// Returns true if the caller may retry later
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
