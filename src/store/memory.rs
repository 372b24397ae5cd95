//! In-memory member/team store
//!
//! Holds both tables under one lock so that each round trip observes a
//! single consistent state. Every trait method counts as one round trip in
//! `StoreMetrics`.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::{Member, MemberId, MemberWithTeam, Team, TeamId};
use crate::observability::StoreMetrics;
use crate::query::{Condition, JoinKind, SortKey};

use super::backend::MemberStore;
use super::errors::{StoreError, StoreResult};
use super::evaluator::ConditionEvaluator;
use super::mutation::Assignment;
use super::sorter::RowSorter;
use super::stats::{AgeStats, TeamAgeAverage};

#[derive(Debug, Default)]
struct Tables {
    teams: BTreeMap<TeamId, Team>,
    members: BTreeMap<MemberId, Member>,
    next_team: u64,
    next_member: u64,
}

impl Tables {
    fn team_of(&self, member: &Member) -> Option<&Team> {
        member.team.and_then(|id| self.teams.get(&id))
    }

    /// Members matching `condition`, resolving teams only when needed
    fn matching_members<'a>(
        &'a self,
        condition: &'a Condition,
    ) -> impl Iterator<Item = &'a Member> + 'a {
        let needs_team = condition.requires_join();
        self.members.values().filter(move |member| {
            let team = if needs_team {
                self.team_of(member)
            } else {
                None
            };
            ConditionEvaluator::matches_parts(member, team, condition)
        })
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    metrics: StoreMetrics,
    injected_failure: Mutex<Option<StoreError>>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Round-trip counters
    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    /// Makes the next round trip fail with `err`, once
    pub fn fail_next(&self, err: StoreError) {
        if let Ok(mut slot) = self.injected_failure.lock() {
            *slot = Some(err);
        }
    }

    /// Inserts a team and returns its id
    pub fn insert_team(&self, name: impl Into<String>) -> StoreResult<TeamId> {
        let mut tables = self.write()?;
        tables.next_team += 1;
        let id = TeamId(tables.next_team);
        tables.teams.insert(id, Team::new(id, name));
        Ok(id)
    }

    /// Inserts a member. The team, if given, must exist.
    pub fn insert_member(
        &self,
        username: Option<&str>,
        age: i32,
        team: Option<TeamId>,
    ) -> StoreResult<MemberId> {
        let mut tables = self.write()?;
        if let Some(team_id) = team {
            if !tables.teams.contains_key(&team_id) {
                return Err(StoreError::Constraint(format!("unknown team {}", team_id)));
            }
        }
        tables.next_member += 1;
        let id = MemberId(tables.next_member);
        tables.members.insert(
            id,
            Member::new(id, username.map(str::to_string), age, team),
        );
        Ok(id)
    }

    /// Point read of one member by id
    pub fn member(&self, id: MemberId) -> StoreResult<Option<Member>> {
        Ok(self.read()?.members.get(&id).cloned())
    }

    /// Point read of one team by id
    pub fn team(&self, id: TeamId) -> StoreResult<Option<Team>> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    /// Total number of members
    pub fn member_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.members.len())
    }

    /// Total number of teams
    pub fn team_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.teams.len())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("member tables lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("member tables lock poisoned".to_string()))
    }

    fn take_injected_failure(&self) -> StoreResult<()> {
        let mut slot = self
            .injected_failure
            .lock()
            .map_err(|_| StoreError::Unavailable("fault slot lock poisoned".to_string()))?;
        match slot.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl MemberStore for InMemoryStore {
    fn fetch(
        &self,
        join: JoinKind,
        condition: &Condition,
        sort: &[SortKey],
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<MemberWithTeam>> {
        self.metrics.increment_fetches();
        self.take_injected_failure()?;

        let tables = self.read()?;
        let mut rows: Vec<MemberWithTeam> = tables
            .members
            .values()
            .filter_map(|member| {
                let team = tables.team_of(member).cloned();
                if join == JoinKind::Inner && team.is_none() {
                    return None;
                }
                let row = MemberWithTeam::new(member.clone(), team);
                ConditionEvaluator::matches(&row, condition).then_some(row)
            })
            .collect();
        drop(tables);

        RowSorter::sort(&mut rows, sort);

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    fn count(&self, condition: &Condition) -> StoreResult<u64> {
        self.metrics.increment_counts();
        self.take_injected_failure()?;

        let tables = self.read()?;
        Ok(tables.matching_members(condition).count() as u64)
    }

    fn bulk_update(&self, condition: &Condition, assignments: &[Assignment]) -> StoreResult<u64> {
        self.metrics.increment_bulk_updates();
        self.take_injected_failure()?;

        let mut tables = self.write()?;

        for team_id in assignments.iter().filter_map(Assignment::target_team) {
            if !tables.teams.contains_key(&team_id) {
                return Err(StoreError::Constraint(format!("unknown team {}", team_id)));
            }
        }

        // Stage every change first so a failing assignment leaves no partial update.
        let mut staged = Vec::new();
        for member in tables.matching_members(condition) {
            let mut updated = member.clone();
            for assignment in assignments {
                assignment.apply(&mut updated)?;
            }
            staged.push(updated);
        }

        let affected = staged.len() as u64;
        for member in staged {
            tables.members.insert(member.id, member);
        }
        self.metrics.add_rows_affected(affected);
        Ok(affected)
    }

    fn bulk_delete(&self, condition: &Condition) -> StoreResult<u64> {
        self.metrics.increment_bulk_deletes();
        self.take_injected_failure()?;

        let mut tables = self.write()?;
        let doomed: HashSet<MemberId> = tables
            .matching_members(condition)
            .map(|m| m.id)
            .collect();

        tables.members.retain(|id, _| !doomed.contains(id));

        let affected = doomed.len() as u64;
        self.metrics.add_rows_affected(affected);
        Ok(affected)
    }

    fn age_stats(&self, condition: &Condition) -> StoreResult<AgeStats> {
        self.metrics.increment_aggregates();
        self.take_injected_failure()?;

        let tables = self.read()?;
        Ok(AgeStats::from_ages(
            tables.matching_members(condition).map(|m| m.age),
        ))
    }

    fn team_age_averages(&self, condition: &Condition) -> StoreResult<Vec<TeamAgeAverage>> {
        self.metrics.increment_aggregates();
        self.take_injected_failure()?;

        let tables = self.read()?;
        let mut groups: BTreeMap<TeamId, (u64, i64)> = BTreeMap::new();
        for member in tables.members.values() {
            let team = match tables.team_of(member) {
                Some(t) => t,
                None => continue,
            };
            if !ConditionEvaluator::matches_parts(member, Some(team), condition) {
                continue;
            }
            let entry = groups.entry(team.id).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += member.age as i64;
        }

        let mut averages: Vec<TeamAgeAverage> = groups
            .into_iter()
            .filter_map(|(team_id, (members, sum))| {
                tables.teams.get(&team_id).map(|team| TeamAgeAverage {
                    team_id,
                    team_name: team.name.clone(),
                    members,
                    avg_age: sum as f64 / members as f64,
                })
            })
            .collect();
        averages.sort_by(|a, b| {
            a.team_name
                .cmp(&b.team_name)
                .then_with(|| a.team_id.cmp(&b.team_id))
        });
        Ok(averages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Field, Predicate};

    /// member1..member4 aged 10..40, first two in teamA, last two in teamB
    fn four_members() -> InMemoryStore {
        let store = InMemoryStore::new();
        let team_a = store.insert_team("teamA").unwrap();
        let team_b = store.insert_team("teamB").unwrap();
        store.insert_member(Some("member1"), 10, Some(team_a)).unwrap();
        store.insert_member(Some("member2"), 20, Some(team_a)).unwrap();
        store.insert_member(Some("member3"), 30, Some(team_b)).unwrap();
        store.insert_member(Some("member4"), 40, Some(team_b)).unwrap();
        store
    }

    fn usernames(rows: &[MemberWithTeam]) -> Vec<&str> {
        rows.iter()
            .map(|r| r.member.username.as_deref().unwrap_or("<null>"))
            .collect()
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = InMemoryStore::new();
        assert_eq!(store.insert_team("teamA").unwrap(), TeamId(1));
        assert_eq!(store.insert_team("teamB").unwrap(), TeamId(2));
        assert_eq!(store.insert_member(Some("m"), 1, None).unwrap(), MemberId(1));
    }

    #[test]
    fn test_insert_member_unknown_team() {
        let store = InMemoryStore::new();
        let err = store.insert_member(Some("m"), 1, Some(TeamId(9))).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.member_count().unwrap(), 0);
    }

    #[test]
    fn test_inner_join_filters_by_team() {
        let store = four_members();
        let cond = Condition::single(Predicate::eq(Field::TeamName, "teamA"));

        let rows = store
            .fetch(JoinKind::Inner, &cond, &[], 0, 10)
            .unwrap();
        assert_eq!(usernames(&rows), vec!["member1", "member2"]);
    }

    #[test]
    fn test_left_join_keeps_teamless_members() {
        let store = four_members();
        store.insert_member(Some("loner"), 50, None).unwrap();

        let left = store
            .fetch(JoinKind::Left, &Condition::all(), &[], 0, 10)
            .unwrap();
        assert_eq!(left.len(), 5);
        assert_eq!(left[4].team, None);

        let inner = store
            .fetch(JoinKind::Inner, &Condition::all(), &[], 0, 10)
            .unwrap();
        assert_eq!(inner.len(), 4);
    }

    #[test]
    fn test_offset_and_limit() {
        let store = four_members();
        let rows = store
            .fetch(
                JoinKind::Left,
                &Condition::all(),
                &[SortKey::desc(Field::Username)],
                1,
                2,
            )
            .unwrap();
        assert_eq!(usernames(&rows), vec!["member3", "member2"]);
    }

    #[test]
    fn test_count_ignores_paging() {
        let store = four_members();
        let cond = Condition::single(Predicate::gte(Field::Age, 25));
        assert_eq!(store.count(&cond).unwrap(), 2);
        assert_eq!(store.count(&Condition::all()).unwrap(), 4);
    }

    #[test]
    fn test_bulk_update_matching_only() {
        let store = four_members();
        let cond = Condition::single(Predicate::lt(Field::Age, 28));

        let affected = store
            .bulk_update(&cond, &[Assignment::SetUsername(Some("guest".into()))])
            .unwrap();
        assert_eq!(affected, 2);

        let rows = store
            .fetch(JoinKind::Left, &Condition::all(), &[], 0, 10)
            .unwrap();
        assert_eq!(usernames(&rows), vec!["guest", "guest", "member3", "member4"]);
    }

    #[test]
    fn test_bulk_update_unknown_team_applies_nothing() {
        let store = four_members();
        let err = store
            .bulk_update(
                &Condition::all(),
                &[Assignment::AddAge(1), Assignment::SetTeam(Some(TeamId(99)))],
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));

        let stats = store.age_stats(&Condition::all()).unwrap();
        assert_eq!(stats.sum, 100);
    }

    #[test]
    fn test_bulk_update_overflow_applies_nothing() {
        let store = four_members();
        store.insert_member(Some("old"), i32::MAX, None).unwrap();

        let err = store
            .bulk_update(&Condition::all(), &[Assignment::AddAge(1)])
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.member(MemberId(1)).unwrap().unwrap().age, 10);
    }

    #[test]
    fn test_bulk_delete() {
        let store = four_members();
        let cond = Condition::single(Predicate::gt(Field::Age, 18));

        assert_eq!(store.bulk_delete(&cond).unwrap(), 3);
        assert_eq!(store.member_count().unwrap(), 1);
        assert_eq!(store.team_count().unwrap(), 2);
    }

    #[test]
    fn test_age_stats() {
        let store = four_members();
        let stats = store.age_stats(&Condition::all()).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.sum, 100);
        assert_eq!(stats.avg, Some(25.0));
        assert_eq!(stats.min, Some(10));
        assert_eq!(stats.max, Some(40));
    }

    #[test]
    fn test_team_age_averages() {
        let store = four_members();
        store.insert_member(Some("loner"), 99, None).unwrap();

        let averages = store.team_age_averages(&Condition::all()).unwrap();
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].team_name, "teamA");
        assert_eq!(averages[0].avg_age, 15.0);
        assert_eq!(averages[1].team_name, "teamB");
        assert_eq!(averages[1].avg_age, 35.0);
    }

    #[test]
    fn test_injected_failure_fires_once() {
        let store = four_members();
        store.fail_next(StoreError::Unavailable("connection reset".into()));

        let err = store.count(&Condition::all()).unwrap_err();
        assert!(err.is_transient());
        assert_eq!(store.count(&Condition::all()).unwrap(), 4);
    }

    #[test]
    fn test_round_trips_counted() {
        let store = four_members();
        store
            .fetch(JoinKind::Left, &Condition::all(), &[], 0, 10)
            .unwrap();
        store.count(&Condition::all()).unwrap();

        let snapshot = store.metrics().snapshot();
        assert_eq!(snapshot.fetches, 1);
        assert_eq!(snapshot.counts, 1);
    }
}
