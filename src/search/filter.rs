//! Search filter and predicate composition
//!
//! Each filter field maps to at most one predicate through its own pure
//! fragment function. `compose` keeps the present fragments in field
//! declaration order and ANDs them; with no fragments the result is
//! `Condition::all()`.

use serde::{Deserialize, Serialize};

use crate::query::{Condition, Field, Predicate};

use super::errors::{SearchError, SearchResult};

/// Optional search criteria. An absent field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(default)]
    pub username_eq: Option<String>,
    #[serde(default)]
    pub team_name_eq: Option<String>,
    #[serde(default)]
    pub age_goe: Option<i32>,
    #[serde(default)]
    pub age_loe: Option<i32>,
}

impl SearchFilter {
    /// A filter with every field absent
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username_eq = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name_eq = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Returns true if no field is present
    pub fn is_empty(&self) -> bool {
        self.username_eq.is_none()
            && self.team_name_eq.is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }

    /// Shorthand for [`compose`]
    pub fn compose(&self) -> SearchResult<Condition> {
        compose(self)
    }
}

/// username = value
pub fn username_eq(username: Option<&str>) -> Option<Predicate> {
    username.map(|u| Predicate::eq(Field::Username, u))
}

/// team.name = value
pub fn team_name_eq(team_name: Option<&str>) -> Option<Predicate> {
    team_name.map(|t| Predicate::eq(Field::TeamName, t))
}

/// age >= value
pub fn age_goe(age: Option<i32>) -> Option<Predicate> {
    age.map(|a| Predicate::gte(Field::Age, a))
}

/// age <= value
pub fn age_loe(age: Option<i32>) -> Option<Predicate> {
    age.map(|a| Predicate::lte(Field::Age, a))
}

/// Composes the filter into one condition.
///
/// An inverted age range is rejected here rather than left to match nothing.
pub fn compose(filter: &SearchFilter) -> SearchResult<Condition> {
    if let (Some(lower), Some(upper)) = (filter.age_goe, filter.age_loe) {
        if lower > upper {
            return Err(SearchError::InvalidAgeRange { lower, upper });
        }
    }

    let fragments = [
        username_eq(filter.username_eq.as_deref()),
        team_name_eq(filter.team_name_eq.as_deref()),
        age_goe(filter.age_goe),
        age_loe(filter.age_loe),
    ];

    Ok(fragments
        .into_iter()
        .flatten()
        .fold(Condition::all(), Condition::and_predicate))
}
