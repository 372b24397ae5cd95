//! Member entity and its joined form

use std::fmt;

use serde::{Deserialize, Serialize};

use super::team::{Team, TeamId};

/// Opaque member identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl MemberId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member row as the store keeps it.
///
/// `username` may be absent; `team` is a nullable reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub username: Option<String>,
    pub age: i32,
    pub team: Option<TeamId>,
}

impl Member {
    pub fn new(id: MemberId, username: Option<String>, age: i32, team: Option<TeamId>) -> Self {
        Self {
            id,
            username,
            age,
            team,
        }
    }

    /// Returns true if the member belongs to a team
    pub fn has_team(&self) -> bool {
        self.team.is_some()
    }
}

/// A member with its team resolved in the same read.
///
/// `team` is `None` when the member has no team (left-join semantics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberWithTeam {
    pub member: Member,
    pub team: Option<Team>,
}

impl MemberWithTeam {
    pub fn new(member: Member, team: Option<Team>) -> Self {
        Self { member, team }
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.team.as_ref().map(|t| t.id)
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team.as_ref().map(|t| t.name.as_str())
    }
}
