//! Aggregates over member ages

use serde::Serialize;

use crate::model::TeamId;

/// count/sum/avg/min/max of ages.
///
/// `avg`, `min` and `max` are absent when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeStats {
    pub count: u64,
    pub sum: i64,
    pub avg: Option<f64>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl AgeStats {
    pub fn empty() -> Self {
        Self {
            count: 0,
            sum: 0,
            avg: None,
            min: None,
            max: None,
        }
    }

    /// Folds a sequence of ages
    pub fn from_ages(ages: impl IntoIterator<Item = i32>) -> Self {
        let mut stats = Self::empty();
        for age in ages {
            stats.count += 1;
            stats.sum += age as i64;
            stats.min = Some(stats.min.map_or(age, |m| m.min(age)));
            stats.max = Some(stats.max.map_or(age, |m| m.max(age)));
        }
        if stats.count > 0 {
            stats.avg = Some(stats.sum as f64 / stats.count as f64);
        }
        stats
    }
}

/// Average age of one team's matching members
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAgeAverage {
    pub team_id: TeamId,
    pub team_name: String,
    pub members: u64,
    pub avg_age: f64,
}
