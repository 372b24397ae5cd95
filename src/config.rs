//! Configuration file handling
//!
//! A single JSON document; every field has a default, so `{}` is a valid
//! configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::search::PageLimits;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "ROSTER_CONFIG_READ",
            ConfigError::Parse(_) => "ROSTER_CONFIG_PARSE",
            ConfigError::Invalid(_) => "ROSTER_CONFIG_INVALID",
        }
    }
}

/// Demo data loaded at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,

    /// Number of members to create
    #[serde(default = "default_seed_members")]
    pub members: usize,
}

fn default_seed_enabled() -> bool {
    true
}

fn default_seed_members() -> usize {
    100
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
            members: default_seed_members(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub paging: PageLimits,

    #[serde(default)]
    pub seed: SeedConfig,
}

impl RosterConfig {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: RosterConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("http.port must be > 0".to_string()));
        }

        if self.paging.default == 0 {
            return Err(ConfigError::Invalid(
                "paging.default must be > 0".to_string(),
            ));
        }

        if self.paging.default > self.paging.max {
            return Err(ConfigError::Invalid(format!(
                "paging.default {} exceeds paging.max {}",
                self.paging.default, self.paging.max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: RosterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.paging, PageLimits::default());
        assert_eq!(config.seed, SeedConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let config: RosterConfig =
            serde_json::from_str(r#"{"paging": {"max": 50}, "seed": {"enabled": false}}"#)
                .unwrap();
        assert_eq!(config.paging.default, 20);
        assert_eq!(config.paging.max, 50);
        assert!(!config.seed.enabled);
        assert_eq!(config.seed.members, 100);
    }

    #[test]
    fn test_rejects_zero_port() {
        let mut config = RosterConfig::default();
        config.http.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_default_above_max() {
        let mut config = RosterConfig::default();
        config.paging = PageLimits::new(100, 10);
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), "ROSTER_CONFIG_INVALID");
    }
}
