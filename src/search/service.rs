//! # Paginated Search Service
//!
//! Composes the filter, issues exactly one joined fetch and, only when the
//! page does not already determine it, one count.
//!
//! # Count Policy
//!
//! With `offset == 0` and fewer rows than `limit`, the fetched page holds
//! every match, so `total` is the row count and no count query runs. In every
//! other case (including a short page at `offset > 0`) the count is queried
//! with the same condition.

use crate::query::{Condition, Field, JoinKind, SortKey};
use crate::store::MemberStore;

use super::errors::SearchResult;
use super::filter::SearchFilter;
use super::page::{PageLimits, PageRequest, PageResult};
use super::projection::MemberTeamRow;

/// Search over a member store. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct SearchService<S> {
    store: S,
    limits: PageLimits,
}

impl<S: MemberStore> SearchService<S> {
    /// Creates a service with default paging limits
    pub fn new(store: S) -> Self {
        Self::with_limits(store, PageLimits::default())
    }

    pub fn with_limits(store: S, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    /// One page of members matching `filter`, with the total match count.
    ///
    /// Validation runs before the store is touched.
    pub fn search(&self, filter: &SearchFilter, page: &PageRequest) -> SearchResult<PageResult> {
        let (offset, limit) = page.validate(&self.limits)?;
        let condition = filter.compose()?;
        let sort = effective_sort(&page.sort);

        let rows: Vec<MemberTeamRow> = self
            .store
            .fetch(JoinKind::Left, &condition, &sort, offset, limit)?
            .into_iter()
            .map(MemberTeamRow::from)
            .collect();

        let fetched = rows.len() as u64;
        let total = if offset == 0 && fetched < limit {
            fetched
        } else {
            self.store.count(&condition)?
        };

        Ok(PageResult {
            rows,
            total,
            offset,
            limit,
        })
    }

    /// Every member matching `filter`, ordered by member id. One fetch, no count.
    pub fn list(&self, filter: &SearchFilter) -> SearchResult<Vec<MemberTeamRow>> {
        let condition = filter.compose()?;
        let sort = effective_sort(&[]);

        let rows = self
            .store
            .fetch(JoinKind::Left, &condition, &sort, 0, u64::MAX)?
            .into_iter()
            .map(MemberTeamRow::from)
            .collect();
        Ok(rows)
    }

    /// Condition for `filter`, for callers that go on to mutate
    pub fn condition_for(&self, filter: &SearchFilter) -> SearchResult<Condition> {
        filter.compose()
    }
}

/// Caller keys followed by `memberId ASC` unless member id is already a key
fn effective_sort(keys: &[SortKey]) -> Vec<SortKey> {
    let mut sort = keys.to_vec();
    if !sort.iter().any(|key| key.field == Field::MemberId) {
        sort.push(SortKey::asc(Field::MemberId));
    }
    sort
}
