//! # Store Backend Trait
//!
//! The narrow query interface the search layer depends on. Every method is a
//! single round trip.

use std::sync::Arc;

use crate::model::MemberWithTeam;
use crate::query::{Condition, JoinKind, SortKey};

use super::errors::StoreResult;
use super::mutation::Assignment;
use super::stats::{AgeStats, TeamAgeAverage};

/// Backend trait for member/team storage
pub trait MemberStore: Send + Sync {
    /// Joined, filtered, sorted, paged read.
    ///
    /// The team relation is resolved in the same call according to `join`.
    fn fetch(
        &self,
        join: JoinKind,
        condition: &Condition,
        sort: &[SortKey],
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<MemberWithTeam>>;

    /// Number of members matching `condition`, ignoring paging
    fn count(&self, condition: &Condition) -> StoreResult<u64>;

    /// Applies every assignment to every matching member. Returns affected rows.
    fn bulk_update(&self, condition: &Condition, assignments: &[Assignment]) -> StoreResult<u64>;

    /// Deletes every matching member. Returns affected rows.
    fn bulk_delete(&self, condition: &Condition) -> StoreResult<u64>;

    /// Count/sum/avg/min/max of ages over matching members
    fn age_stats(&self, condition: &Condition) -> StoreResult<AgeStats>;

    /// Average age per team over matching members that have a team
    fn team_age_averages(&self, condition: &Condition) -> StoreResult<Vec<TeamAgeAverage>>;
}

impl<S: MemberStore + ?Sized> MemberStore for Arc<S> {
    fn fetch(
        &self,
        join: JoinKind,
        condition: &Condition,
        sort: &[SortKey],
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<MemberWithTeam>> {
        (**self).fetch(join, condition, sort, offset, limit)
    }

    fn count(&self, condition: &Condition) -> StoreResult<u64> {
        (**self).count(condition)
    }

    fn bulk_update(&self, condition: &Condition, assignments: &[Assignment]) -> StoreResult<u64> {
        (**self).bulk_update(condition, assignments)
    }

    fn bulk_delete(&self, condition: &Condition) -> StoreResult<u64> {
        (**self).bulk_delete(condition)
    }

    fn age_stats(&self, condition: &Condition) -> StoreResult<AgeStats> {
        (**self).age_stats(condition)
    }

    fn team_age_averages(&self, condition: &Condition) -> StoreResult<Vec<TeamAgeAverage>> {
        (**self).team_age_averages(condition)
    }
}
