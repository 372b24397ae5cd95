//! Demo dataset
//!
//! Two teams, `teamA` and `teamB`, and `count` members named `member{i}`
//! aged `i`. Even-numbered members join teamA, odd-numbered ones teamB.

use crate::observability::{log_event_with_fields, Event};
use crate::store::{InMemoryStore, StoreResult};

/// Team and member totals written by `seed_demo`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub teams: usize,
    pub members: usize,
}

/// Loads the demo dataset into `store`
pub fn seed_demo(store: &InMemoryStore, count: usize) -> StoreResult<SeedSummary> {
    let team_a = store.insert_team("teamA")?;
    let team_b = store.insert_team("teamB")?;

    for i in 0..count {
        let team = if i % 2 == 0 { team_a } else { team_b };
        let username = format!("member{}", i);
        let age = i32::try_from(i).unwrap_or(i32::MAX);
        store.insert_member(Some(&username), age, Some(team))?;
    }

    let summary = SeedSummary {
        teams: 2,
        members: count,
    };
    log_event_with_fields(
        Event::SeedComplete,
        &[
            ("members", &summary.members.to_string()),
            ("teams", &summary.teams.to_string()),
        ],
    );
    Ok(summary)
}
