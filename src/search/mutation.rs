//! # Bulk Mutation
//!
//! Conditional update and delete, one store round trip each. Rows are never
//! loaded before they are changed.
//!
//! # Staleness
//!
//! After a bulk mutation every previously fetched `MemberTeamRow` or `Member`
//! for an affected row is stale. Callers must fetch again before relying on
//! that data. Nothing here caches rows, so nothing is invalidated.
//!
//! A store error from a mutation leaves the affected count unknown.

use crate::query::Condition;
use crate::store::{Assignment, MemberStore};

use super::errors::{SearchError, SearchResult};
use super::service::SearchService;

impl<S: MemberStore> SearchService<S> {
    /// Applies every assignment to every member matching `condition`.
    ///
    /// Returns the number of affected members. Previously fetched copies of
    /// those members are stale once this returns.
    pub fn bulk_update(
        &self,
        condition: &Condition,
        assignments: &[Assignment],
    ) -> SearchResult<u64> {
        if assignments.is_empty() {
            return Err(SearchError::EmptyAssignments);
        }
        Ok(self.store().bulk_update(condition, assignments)?)
    }

    /// Deletes every member matching `condition`. Returns the number deleted.
    ///
    /// Previously fetched copies of deleted members are stale once this
    /// returns.
    pub fn bulk_delete(&self, condition: &Condition) -> SearchResult<u64> {
        Ok(self.store().bulk_delete(condition)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberId;
    use crate::query::{Field, Predicate};
    use crate::search::{PageRequest, SearchFilter};
    use crate::store::{InMemoryStore, StoreError};
    use std::sync::Arc;

    fn service() -> SearchService<Arc<InMemoryStore>> {
        let store = Arc::new(InMemoryStore::new());
        let team = store.insert_team("teamA").unwrap();
        store.insert_member(Some("member1"), 10, Some(team)).unwrap();
        store.insert_member(Some("member2"), 20, Some(team)).unwrap();
        store.insert_member(Some("member3"), 30, None).unwrap();
        SearchService::new(store)
    }

    #[test]
    fn test_bulk_update_is_one_round_trip() {
        let service = service();
        let before = service.store().metrics().snapshot();

        let affected = service
            .bulk_update(
                &Condition::single(Predicate::lt(Field::Age, 25)),
                &[Assignment::SetUsername(Some("junior".into()))],
            )
            .unwrap();

        let delta = service.store().metrics().snapshot().since(&before);
        assert_eq!(affected, 2);
        assert_eq!(delta.round_trips(), 1);
        assert_eq!(delta.bulk_updates, 1);
    }

    #[test]
    fn test_stale_rows_need_refetch() {
        let service = service();
        let filter = SearchFilter::new();
        let stale = service.search(&filter, &PageRequest::first(10)).unwrap();

        service
            .bulk_update(&Condition::all(), &[Assignment::AddAge(1)])
            .unwrap();

        assert_eq!(stale.rows[0].age, 10);
        let fresh = service.search(&filter, &PageRequest::first(10)).unwrap();
        assert_eq!(fresh.rows[0].age, 11);
    }

    #[test]
    fn test_empty_assignments_rejected() {
        let service = service();
        let before = service.store().metrics().snapshot();

        let err = service.bulk_update(&Condition::all(), &[]).unwrap_err();

        assert_eq!(err, SearchError::EmptyAssignments);
        let delta = service.store().metrics().snapshot().since(&before);
        assert_eq!(delta.round_trips(), 0);
    }

    #[test]
    fn test_bulk_delete() {
        let service = service();
        let deleted = service
            .bulk_delete(&Condition::single(Predicate::gt(Field::Age, 15)))
            .unwrap();

        assert_eq!(deleted, 2);
        assert!(service.store().member(MemberId(1)).unwrap().is_some());
        assert!(service.store().member(MemberId(2)).unwrap().is_none());
    }

    #[test]
    fn test_store_error_leaves_rows_untouched() {
        let service = service();
        service
            .store()
            .fail_next(StoreError::Unavailable("timeout".into()));

        let err = service.bulk_delete(&Condition::all()).unwrap_err();

        assert!(err.is_transient());
        assert_eq!(service.store().member_count().unwrap(), 3);
    }
}
