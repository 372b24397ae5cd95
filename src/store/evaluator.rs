//! Condition evaluation for store reads
//!
//! Evaluates conditions strictly: typed comparison, no coercion, and absent
//! values never match.

use crate::model::{Member, MemberWithTeam, Team};
use crate::query::{Condition, Field, Value};

/// Reads field values off joined rows and evaluates conditions against them
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Checks if a joined row matches all predicates (AND semantics)
    pub fn matches(row: &MemberWithTeam, condition: &Condition) -> bool {
        Self::matches_parts(&row.member, row.team.as_ref(), condition)
    }

    /// Checks a member against a condition with an optionally resolved team.
    ///
    /// When `team` is `None`, team-name predicates do not match.
    pub fn matches_parts(member: &Member, team: Option<&Team>, condition: &Condition) -> bool {
        condition.matches(|field| Self::value_of(member, team, field))
    }

    /// Returns the value of `field`, or `None` when it is absent
    pub fn value_of(member: &Member, team: Option<&Team>, field: Field) -> Option<Value> {
        match field {
            Field::MemberId => Some(Value::from(member.id.get())),
            Field::Username => member.username.clone().map(Value::Text),
            Field::Age => Some(Value::from(member.age)),
            Field::TeamId => member.team.map(|id| Value::from(id.get())),
            Field::TeamName => team.map(|t| Value::Text(t.name.clone())),
        }
    }

    /// Field value on a joined row
    pub fn row_value(row: &MemberWithTeam, field: Field) -> Option<Value> {
        Self::value_of(&row.member, row.team.as_ref(), field)
    }
}
