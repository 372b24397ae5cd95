//! roster - dynamic member search, pagination and bulk mutation
//!
//! Optional filter fields compose into one condition; a search issues one
//! joined fetch and, only when needed, one count. Bulk update and delete run
//! over the same conditions.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod query;
pub mod search;
pub mod seed;
pub mod store;
