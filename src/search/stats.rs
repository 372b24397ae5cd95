//! Age aggregates over a composed filter

use crate::store::{AgeStats, MemberStore, TeamAgeAverage};

use super::errors::SearchResult;
use super::filter::SearchFilter;
use super::service::SearchService;

impl<S: MemberStore> SearchService<S> {
    /// Count, sum, average, min and max age of members matching `filter`
    pub fn age_stats(&self, filter: &SearchFilter) -> SearchResult<AgeStats> {
        let condition = filter.compose()?;
        Ok(self.store().age_stats(&condition)?)
    }

    /// Average age per team of matching members. Teamless members are skipped.
    pub fn team_age_averages(&self, filter: &SearchFilter) -> SearchResult<Vec<TeamAgeAverage>> {
        let condition = filter.compose()?;
        Ok(self.store().team_age_averages(&condition)?)
    }
}
