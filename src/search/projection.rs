//! Transport projection of a member joined to its team

use serde::{Deserialize, Serialize};

use crate::model::{MemberId, MemberWithTeam, TeamId};

/// Flat row returned to callers.
///
/// Team fields are `None` for members without a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamRow {
    pub member_id: MemberId,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}

impl MemberTeamRow {
    /// A row for a member without a team
    pub fn detached(member_id: u64, username: Option<&str>, age: i32) -> Self {
        Self {
            member_id: MemberId(member_id),
            username: username.map(str::to_string),
            age,
            team_id: None,
            team_name: None,
        }
    }
}

impl From<MemberWithTeam> for MemberTeamRow {
    fn from(row: MemberWithTeam) -> Self {
        let (team_id, team_name) = match row.team {
            Some(team) => (Some(team.id), Some(team.name)),
            None => (None, None),
        };
        Self {
            member_id: row.member.id,
            username: row.member.username,
            age: row.member.age,
            team_id,
            team_name,
        }
    }
}
