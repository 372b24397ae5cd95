//! Search and Pagination Tests
//!
//! Tests for:
//! - Composition: absent fields place no constraint, fragments are pure
//! - Paging: concatenated pages reproduce the full ordered result
//! - Count skipping on a short first page
//! - Teamless members and absent usernames

use std::collections::HashSet;
use std::sync::Arc;

use roster::model::TeamId;
use roster::query::{Condition, Field, SortKey};
use roster::search::{
    age_goe, age_loe, compose, team_name_eq, username_eq, MemberTeamRow, PageRequest,
    SearchError, SearchFilter, SearchService,
};
use roster::seed::seed_demo;
use roster::store::InMemoryStore;

// =============================================================================
// Test Utilities
// =============================================================================

/// Ages 10, 20 in team "A"; ages 30, 40 in team "B"
fn four_members() -> SearchService<Arc<InMemoryStore>> {
    let store = Arc::new(InMemoryStore::new());
    let a = store.insert_team("A").unwrap();
    let b = store.insert_team("B").unwrap();
    store.insert_member(Some("member1"), 10, Some(a)).unwrap();
    store.insert_member(Some("member2"), 20, Some(a)).unwrap();
    store.insert_member(Some("member3"), 30, Some(b)).unwrap();
    store.insert_member(Some("member4"), 40, Some(b)).unwrap();
    SearchService::new(store)
}

fn seeded(count: usize) -> SearchService<Arc<InMemoryStore>> {
    let store = Arc::new(InMemoryStore::new());
    seed_demo(&store, count).unwrap();
    SearchService::new(store)
}

fn ages(rows: &[MemberTeamRow]) -> Vec<i32> {
    rows.iter().map(|r| r.age).collect()
}

// =============================================================================
// Example Scenario
// =============================================================================

#[test]
fn test_team_filter_first_page() {
    let service = four_members();

    let page = service
        .search(&SearchFilter::new().team_name("A"), &PageRequest::first(2))
        .unwrap();

    assert_eq!(ages(&page.rows), vec![10, 20]);
    assert!(page.rows.iter().all(|r| r.team_name.as_deref() == Some("A")));
    assert_eq!(page.total, 2);
}

#[test]
fn test_age_filter_single_row_page() {
    let service = four_members();

    let page = service
        .search(
            &SearchFilter::new().age_goe(25),
            &PageRequest::first(1).with_sort(SortKey::asc(Field::Age)),
        )
        .unwrap();

    assert_eq!(ages(&page.rows), vec![30]);
    assert_eq!(page.total, 2);
    assert!(page.has_next());
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn test_empty_filter_matches_everything() {
    let service = seeded(30);

    assert_eq!(compose(&SearchFilter::new()).unwrap(), Condition::all());

    let page = service
        .search(&SearchFilter::new(), &PageRequest::first(7))
        .unwrap();
    assert_eq!(page.len(), 7);
    assert_eq!(page.total, 30);
    assert_eq!(ages(&page.rows), (0..7).collect::<Vec<i32>>());
}

#[test]
fn test_fragments_are_independent() {
    let full = SearchFilter::new()
        .username("member3")
        .team_name("B")
        .age_goe(1)
        .age_loe(99);
    let condition = compose(&full).unwrap();

    let expected: Vec<_> = [
        username_eq(Some("member3")),
        team_name_eq(Some("B")),
        age_goe(Some(1)),
        age_loe(Some(99)),
    ]
    .into_iter()
    .flatten()
    .collect();
    assert_eq!(condition.predicates(), expected.as_slice());

    let partial = compose(&SearchFilter::new().age_goe(1)).unwrap();
    assert_eq!(partial.predicates(), &expected[2..3]);
}

#[test]
fn test_inverted_range_rejected() {
    let service = four_members();
    let err = service
        .search(
            &SearchFilter::new().age_goe(30).age_loe(20),
            &PageRequest::first(10),
        )
        .unwrap_err();
    assert_eq!(err, SearchError::InvalidAgeRange { lower: 30, upper: 20 });
}

#[test]
fn test_equal_bounds_allowed() {
    let service = four_members();
    let page = service
        .search(
            &SearchFilter::new().age_goe(20).age_loe(20),
            &PageRequest::first(10),
        )
        .unwrap();
    assert_eq!(ages(&page.rows), vec![20]);
}

// =============================================================================
// Paging
// =============================================================================

#[test]
fn test_pages_concatenate_without_gaps() {
    let service = seeded(23);
    let filter = SearchFilter::new().team_name("teamB");
    let expected = service.list(&filter).unwrap();

    let mut collected = Vec::new();
    let mut page = PageRequest::first(4).with_sort(SortKey::desc(Field::TeamName));
    loop {
        let result = service.search(&filter, &page).unwrap();
        assert_eq!(result.total, expected.len() as u64);
        if result.is_empty() {
            break;
        }
        collected.extend(result.rows);
        page = page.next();
    }

    assert_eq!(collected, expected);
    let ids: HashSet<_> = collected.iter().map(|r| r.member_id).collect();
    assert_eq!(ids.len(), collected.len());
}

#[test]
fn test_search_is_idempotent() {
    let service = seeded(12);
    let filter = SearchFilter::new().age_goe(3);
    let page = PageRequest::new(2, 5).with_sort(SortKey::desc(Field::Age));

    let first = service.search(&filter, &page).unwrap();
    let second = service.search(&filter, &page).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_offset_past_end_is_empty() {
    let service = four_members();
    let page = service
        .search(&SearchFilter::new(), &PageRequest::new(10, 5))
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total, 4);
}

#[test]
fn test_no_match_is_not_an_error() {
    let service = four_members();
    let page = service
        .search(&SearchFilter::new().username("ghost"), &PageRequest::first(5))
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total, 0);
}

// =============================================================================
// Count Skipping
// =============================================================================

#[test]
fn test_count_skipped_on_short_first_page() {
    let service = four_members();
    let before = service.store().metrics().snapshot();

    let page = service
        .search(&SearchFilter::new().team_name("B"), &PageRequest::first(5))
        .unwrap();

    let delta = service.store().metrics().snapshot().since(&before);
    assert_eq!(page.total, page.len() as u64);
    assert_eq!(delta.round_trips(), 1);
}

#[test]
fn test_count_runs_when_page_is_full() {
    let service = four_members();
    let before = service.store().metrics().snapshot();

    service
        .search(&SearchFilter::new(), &PageRequest::first(4))
        .unwrap();

    let delta = service.store().metrics().snapshot().since(&before);
    assert_eq!(delta.fetches, 1);
    assert_eq!(delta.counts, 1);
}

// =============================================================================
// Absent Values
// =============================================================================

#[test]
fn test_teamless_member_row() {
    let service = four_members();
    service.store().insert_member(Some("loner"), 50, None).unwrap();

    let all = service
        .search(&SearchFilter::new(), &PageRequest::first(10))
        .unwrap();
    let loner = all.rows.iter().find(|r| r.age == 50).unwrap();
    assert_eq!(loner.team_id, None);
    assert_eq!(loner.team_name, None);

    let team_a = service
        .search(&SearchFilter::new().team_name("A"), &PageRequest::first(10))
        .unwrap();
    assert!(team_a.rows.iter().all(|r| r.age != 50));
}

#[test]
fn test_username_nulls_last() {
    let service = four_members();
    let store = service.store();
    store.insert_member(None, 15, Some(TeamId(1))).unwrap();
    store.insert_member(None, 35, Some(TeamId(2))).unwrap();

    let page = service
        .search(
            &SearchFilter::new(),
            &PageRequest::first(10).with_sort(SortKey::desc(Field::Username)),
        )
        .unwrap();

    let names: Vec<_> = page.rows.iter().map(|r| r.username.as_deref()).collect();
    assert_eq!(
        names,
        vec![
            Some("member4"),
            Some("member3"),
            Some("member2"),
            Some("member1"),
            None,
            None
        ]
    );
}

#[test]
fn test_nulls_last_within_primary_ties() {
    let service = four_members();
    service
        .store()
        .insert_member(None, 12, Some(TeamId(1)))
        .unwrap();

    let page = service
        .search(
            &SearchFilter::new(),
            &PageRequest::first(10)
                .with_sort(SortKey::asc(Field::TeamName))
                .with_sort(SortKey::asc(Field::Username).nulls_last()),
        )
        .unwrap();

    let names: Vec<_> = page.rows.iter().map(|r| r.username.as_deref()).collect();
    assert_eq!(
        names,
        vec![
            Some("member1"),
            Some("member2"),
            None,
            Some("member3"),
            Some("member4")
        ]
    );
}

#[test]
fn test_nulls_first_override() {
    let service = four_members();
    service.store().insert_member(None, 12, None).unwrap();

    let page = service
        .search(
            &SearchFilter::new(),
            &PageRequest::first(10).with_sort(SortKey::asc(Field::TeamName).nulls_first()),
        )
        .unwrap();

    assert_eq!(page.rows[0].age, 12);
    assert_eq!(page.rows[0].team_name, None);
}
