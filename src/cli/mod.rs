//! CLI module
//!
//! - serve: seed the dataset and run the HTTP server
//! - search: one-shot paged search
//! - stats: age aggregates
//! - bulk-update / bulk-delete: conditional mutation

mod args;
mod commands;
mod errors;
mod io;

pub use args::{AssignmentArgs, Cli, Command, FilterArgs};
pub use commands::{bulk_delete, bulk_update, run, run_command, search, serve, stats};
pub use errors::{CliError, CliResult};
pub use io::{write_error, write_response};
