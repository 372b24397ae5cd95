//! # Search Errors
//!
//! Validation errors are raised before any store call. Store errors pass
//! through unchanged.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Search layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    // ==================
    // Validation
    // ==================
    /// Lower age bound above upper age bound
    #[error("Invalid age range: ageGoe {lower} is greater than ageLoe {upper}")]
    InvalidAgeRange { lower: i32, upper: i32 },

    /// Non-positive page size
    #[error("Limit must be positive, got {0}")]
    InvalidLimit(i64),

    /// Negative page start
    #[error("Offset must not be negative, got {0}")]
    InvalidOffset(i64),

    /// Page size above the configured maximum
    #[error("Limit {limit} exceeds maximum {max}")]
    LimitExceeded { limit: i64, max: u64 },

    /// Malformed sort specification
    #[error("Invalid sort: {0}")]
    InvalidSort(String),

    /// Bulk update without anything to assign
    #[error("Bulk update requires at least one assignment")]
    EmptyAssignments,

    // ==================
    // Store
    // ==================
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SearchError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::InvalidAgeRange { .. } => "ROSTER_INVALID_AGE_RANGE",
            SearchError::InvalidLimit(_) => "ROSTER_INVALID_LIMIT",
            SearchError::InvalidOffset(_) => "ROSTER_INVALID_OFFSET",
            SearchError::LimitExceeded { .. } => "ROSTER_LIMIT_EXCEEDED",
            SearchError::InvalidSort(_) => "ROSTER_INVALID_SORT",
            SearchError::EmptyAssignments => "ROSTER_EMPTY_ASSIGNMENTS",
            SearchError::Store(err) => err.code(),
        }
    }

    /// Returns true if the request itself was malformed
    pub fn is_validation(&self) -> bool {
        !matches!(self, SearchError::Store(_))
    }

    /// Returns true if the store reported a transient failure
    pub fn is_transient(&self) -> bool {
        matches!(self, SearchError::Store(err) if err.is_transient())
    }
}
