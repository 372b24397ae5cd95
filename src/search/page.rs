//! Page requests, page results and paging limits

use serde::{Deserialize, Serialize};

use crate::query::{Field, NullsOrder, SortDirection, SortKey};

use super::errors::{SearchError, SearchResult};
use super::projection::MemberTeamRow;

/// Page size bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Page size used when the caller gives none
    #[serde(default = "default_page_size")]
    pub default: u64,
    /// Largest page size accepted
    #[serde(default = "default_max_page_size")]
    pub max: u64,
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    1000
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default: default_page_size(),
            max: default_max_page_size(),
        }
    }
}

impl PageLimits {
    pub fn new(default: u64, max: u64) -> Self {
        Self { default, max }
    }

    /// Returns true if `0 < default <= max`
    pub fn is_valid(&self) -> bool {
        self.default > 0 && self.default <= self.max
    }
}

/// Offset, limit and ordering of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
    #[serde(default)]
    pub sort: Vec<SortKey>,
}

impl PageRequest {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            sort: Vec::new(),
        }
    }

    /// First page of `limit` rows
    pub fn first(limit: i64) -> Self {
        Self::new(0, limit)
    }

    /// Appends a sort key (later keys break ties of earlier ones)
    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Checks offset and limit, returning them unsigned
    pub fn validate(&self, limits: &PageLimits) -> SearchResult<(u64, u64)> {
        if self.limit <= 0 {
            return Err(SearchError::InvalidLimit(self.limit));
        }
        if self.offset < 0 {
            return Err(SearchError::InvalidOffset(self.offset));
        }
        let limit = self.limit as u64;
        if limit > limits.max {
            return Err(SearchError::LimitExceeded {
                limit: self.limit,
                max: limits.max,
            });
        }
        Ok((self.offset as u64, limit))
    }

    /// The page following this one, same size and ordering
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
            sort: self.sort.clone(),
        }
    }
}

/// One page of projected rows with the total match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub rows: Vec<MemberTeamRow>,
    /// Rows matching the filter, ignoring offset and limit
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl PageResult {
    pub fn empty(offset: u64, limit: u64) -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
            offset,
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if rows remain past this page
    pub fn has_next(&self) -> bool {
        self.offset + (self.rows.len() as u64) < self.total
    }
}

/// Parses `field[.asc|.desc][.nullsfirst|.nullslast]`, comma-separated.
///
/// Direction defaults to ascending and nulls to last.
pub fn parse_sort(spec: &str) -> SearchResult<Vec<SortKey>> {
    let mut keys = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let mut segments = part.split('.');
        let field_name = segments.next().unwrap_or_default();
        let field = Field::parse(field_name)
            .ok_or_else(|| SearchError::InvalidSort(format!("unknown field: {}", field_name)))?;

        let mut key = SortKey::asc(field);
        for segment in segments {
            match segment.to_lowercase().as_str() {
                "asc" => key.direction = SortDirection::Asc,
                "desc" => key.direction = SortDirection::Desc,
                "nullsfirst" => key.nulls = NullsOrder::First,
                "nullslast" => key.nulls = NullsOrder::Last,
                other => {
                    return Err(SearchError::InvalidSort(format!(
                        "invalid sort modifier: {}",
                        other
                    )))
                }
            }
        }

        keys.push(key);
    }

    Ok(keys)
}
