//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/v1/members` - Unpaged member search
//! - `/v2/members` - Paged member search with total count

pub mod config;
pub mod errors;
pub mod member_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ErrorResponse, HttpError, HttpResult};
pub use member_routes::{member_routes, MemberQuery, MemberState};
pub use server::HttpServer;
