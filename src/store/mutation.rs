//! Field assignments applied by bulk updates

use crate::model::{Member, TeamId};

use super::errors::{StoreError, StoreResult};

/// A single column transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// username = value (None clears it)
    SetUsername(Option<String>),
    /// age = value
    SetAge(i32),
    /// age = age + delta (negative delta subtracts)
    AddAge(i32),
    /// age = age * factor
    MultiplyAge(i32),
    /// team = value (None detaches the member)
    SetTeam(Option<TeamId>),
}

impl Assignment {
    /// Team this assignment points at, if any
    pub fn target_team(&self) -> Option<TeamId> {
        match self {
            Assignment::SetTeam(team) => *team,
            _ => None,
        }
    }

    /// Applies the assignment to a copy of `member`.
    ///
    /// Age arithmetic is checked; overflow is a constraint violation.
    pub fn apply(&self, member: &mut Member) -> StoreResult<()> {
        match self {
            Assignment::SetUsername(username) => member.username = username.clone(),
            Assignment::SetAge(age) => member.age = *age,
            Assignment::AddAge(delta) => {
                member.age = member.age.checked_add(*delta).ok_or_else(|| {
                    StoreError::Constraint(format!("age overflow on member {}", member.id))
                })?;
            }
            Assignment::MultiplyAge(factor) => {
                member.age = member.age.checked_mul(*factor).ok_or_else(|| {
                    StoreError::Constraint(format!("age overflow on member {}", member.id))
                })?;
            }
            Assignment::SetTeam(team) => member.team = *team,
        }
        Ok(())
    }
}
