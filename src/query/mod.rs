//! Query representation shared by the search layer and the store
//!
//! # Design Principles
//!
//! - Typed: predicates compare `Value`s of one kind, no coercion
//! - Conjunctive: a `Condition` is an ordered AND of predicates
//! - Identity: the empty condition matches every row
//! - Null-safe: a predicate on an absent value never matches
//!
//! Sort keys carry an explicit nulls ordering so that placement of absent
//! values never depends on the storage engine.

mod ast;
mod sort;

pub use ast::{Condition, Field, FilterOp, JoinKind, Predicate, Value};
pub use sort::{NullsOrder, SortDirection, SortKey};
