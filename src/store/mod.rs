//! Storage collaborator for the search layer
//!
//! The search layer reaches storage only through `MemberStore`: a joined,
//! filtered, sorted, paged fetch; a count; bulk update and delete; and two
//! aggregates. Each call is one round trip.
//!
//! `InMemoryStore` is the engine used by the server, the CLI and the tests.
//!
//! # Read Flow
//!
//! 1. Resolve the team relation per join kind (inner drops teamless members)
//! 2. Filter rows strictly according to the condition
//! 3. Sort by the given keys, nulls placed explicitly
//! 4. Apply offset, then limit

mod backend;
mod errors;
mod evaluator;
mod memory;
mod mutation;
mod sorter;
mod stats;

pub use backend::MemberStore;
pub use errors::{StoreError, StoreResult};
pub use evaluator::ConditionEvaluator;
pub use memory::InMemoryStore;
pub use mutation::Assignment;
pub use sorter::RowSorter;
pub use stats::{AgeStats, TeamAgeAverage};
