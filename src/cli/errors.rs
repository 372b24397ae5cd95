//! CLI error types

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::search::SearchError;
use crate::store::StoreError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors. Every one ends the process with a non-zero status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Search(#[from] SearchError),

    /// Dataset could not be seeded
    #[error("Boot failed: {0}")]
    Boot(String),

    /// stdout or JSON encoding failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl CliError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(err) => err.code(),
            CliError::Search(err) => err.code(),
            CliError::Boot(_) => "ROSTER_CLI_BOOT_FAILED",
            CliError::Io(_) => "ROSTER_CLI_IO_ERROR",
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Search(SearchError::Store(e))
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(format!("JSON error: {}", e))
    }
}
