//! Dynamic member search
//!
//! - `filter`: optional criteria and the predicate composer
//! - `page`: page requests, limits and results
//! - `projection`: the flat row returned to callers
//! - `service`: paginated search with count skipping
//! - `mutation`: bulk update/delete over a condition
//! - `stats`: age aggregates
//!
//! Nothing in this module logs; the HTTP and CLI layers do.

mod errors;
mod filter;
mod mutation;
mod page;
mod projection;
mod service;
mod stats;

pub use errors::{SearchError, SearchResult};
pub use filter::{age_goe, age_loe, compose, team_name_eq, username_eq, SearchFilter};
pub use page::{parse_sort, PageLimits, PageRequest, PageResult};
pub use projection::MemberTeamRow;
pub use service::SearchService;
