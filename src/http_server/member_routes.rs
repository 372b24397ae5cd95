//! Member search HTTP routes
//!
//! - `GET /v1/members` - every matching row, unpaged
//! - `GET /v2/members` - one page plus the total count
//!
//! Query parameters: `username`, `teamName`, `ageGoe`, `ageLoe`, and for v2
//! `offset`, `limit`, `sort`. Empty values count as absent.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::observability::{log_event_with_fields, Event};
use crate::search::{
    parse_sort, MemberTeamRow, PageRequest, PageResult, SearchFilter, SearchService,
};
use crate::store::InMemoryStore;

use super::errors::{HttpError, HttpResult};

// ==================
// Shared State
// ==================

/// Member search state shared across handlers
#[derive(Debug, Clone)]
pub struct MemberState {
    pub service: SearchService<Arc<InMemoryStore>>,
}

impl MemberState {
    pub fn new(service: SearchService<Arc<InMemoryStore>>) -> Self {
        Self { service }
    }
}

// ==================
// Request Types
// ==================

/// Raw query string. Values stay strings so that empty ones can be dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberQuery {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub age_goe: Option<String>,
    #[serde(default)]
    pub age_loe: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl MemberQuery {
    pub fn filter(&self) -> HttpResult<SearchFilter> {
        Ok(SearchFilter {
            username_eq: present(&self.username).map(str::to_string),
            team_name_eq: present(&self.team_name).map(str::to_string),
            age_goe: parse_param("ageGoe", &self.age_goe)?,
            age_loe: parse_param("ageLoe", &self.age_loe)?,
        })
    }

    /// Page request, using `default_limit` when no limit is given
    pub fn page(&self, default_limit: u64) -> HttpResult<PageRequest> {
        let offset = parse_param("offset", &self.offset)?.unwrap_or(0);
        let limit = match parse_param::<i64>("limit", &self.limit)? {
            Some(limit) => limit,
            None => i64::try_from(default_limit).unwrap_or(i64::MAX),
        };
        let sort = match present(&self.sort) {
            Some(spec) => parse_sort(spec)?,
            None => Vec::new(),
        };
        Ok(PageRequest {
            offset,
            limit,
            sort,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_param<T: FromStr>(name: &'static str, value: &Option<String>) -> HttpResult<Option<T>> {
    match present(value) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| HttpError::InvalidQueryParam {
                name,
                value: raw.to_string(),
            }),
        None => Ok(None),
    }
}

// ==================
// Routes
// ==================

pub fn member_routes(state: MemberState) -> Router {
    Router::new()
        .route("/v1/members", get(list_members))
        .route("/v2/members", get(search_members))
        .with_state(state)
}

async fn list_members(
    State(state): State<MemberState>,
    Query(query): Query<MemberQuery>,
) -> HttpResult<Json<Vec<MemberTeamRow>>> {
    let result = query
        .filter()
        .and_then(|filter| state.service.list(&filter).map_err(HttpError::from));

    match result {
        Ok(rows) => {
            log_event_with_fields(
                Event::SearchServed,
                &[("endpoint", "v1"), ("rows", &rows.len().to_string())],
            );
            Ok(Json(rows))
        }
        Err(err) => Err(rejected("v1", err)),
    }
}

async fn search_members(
    State(state): State<MemberState>,
    Query(query): Query<MemberQuery>,
) -> HttpResult<Json<PageResult>> {
    let default_limit = state.service.limits().default;
    let result = query.filter().and_then(|filter| {
        let page = query.page(default_limit)?;
        state
            .service
            .search(&filter, &page)
            .map_err(HttpError::from)
    });

    match result {
        Ok(page) => {
            log_event_with_fields(
                Event::SearchServed,
                &[
                    ("endpoint", "v2"),
                    ("offset", &page.offset.to_string()),
                    ("rows", &page.len().to_string()),
                    ("total", &page.total.to_string()),
                ],
            );
            Ok(Json(page))
        }
        Err(err) => Err(rejected("v2", err)),
    }
}

fn rejected(endpoint: &str, err: HttpError) -> HttpError {
    log_event_with_fields(
        Event::SearchRejected,
        &[
            ("code", err.code()),
            ("endpoint", endpoint),
            ("error", &err.to_string()),
        ],
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Field, SortKey};
    use crate::search::SearchError;

    fn query(pairs: &[(&str, &str)]) -> MemberQuery {
        let encoded = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        Query::<MemberQuery>::try_from_uri(&format!("/v2/members?{}", encoded).parse().unwrap())
            .unwrap()
            .0
    }

    #[test]
    fn test_empty_values_are_absent() {
        let q = query(&[("username", ""), ("ageGoe", ""), ("teamName", "teamA")]);
        let filter = q.filter().unwrap();
        assert_eq!(filter, SearchFilter::new().team_name("teamA"));
    }

    #[test]
    fn test_bad_integer_rejected() {
        let q = query(&[("ageLoe", "old")]);
        assert!(matches!(
            q.filter(),
            Err(HttpError::InvalidQueryParam { name: "ageLoe", .. })
        ));
    }

    #[test]
    fn test_page_defaults() {
        let page = query(&[]).page(20).unwrap();
        assert_eq!(page, PageRequest::new(0, 20));
    }

    #[test]
    fn test_page_with_sort() {
        let page = query(&[("offset", "4"), ("limit", "2"), ("sort", "age.desc")])
            .page(20)
            .unwrap();
        assert_eq!(page, PageRequest::new(4, 2).with_sort(SortKey::desc(Field::Age)));
    }

    #[test]
    fn test_bad_sort_rejected() {
        let err = query(&[("sort", "height")]).page(20).unwrap_err();
        assert!(matches!(err, HttpError::Search(SearchError::InvalidSort(_))));
    }
}
