//! Engine configuration.
//!
//! Follows a builder pattern for configuration with validation. Loading from
//! files and the environment is layered on top by the command-line tool.

use crate::error::{Error, Result};
use crate::models::SimpleSearchFields;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Global engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fields matched by simple search
    pub simple_search_fields: SimpleSearchFields,
    /// Default log filter for binaries embedding the engine
    pub log_level: String,
    /// Snapshot file the CLI reads and writes
    pub snapshot_path: Option<PathBuf>,
    /// Pretty-print JSON exports
    pub pretty_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simple_search_fields: SimpleSearchFields::TitleAndContent,
            log_level: "info".to_string(),
            snapshot_path: None,
            pretty_json: true,
        }
    }
}

impl EngineConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(Error::validation_error(format!(
                "Unknown log level '{}'",
                self.log_level
            )));
        }

        if let Some(path) = &self.snapshot_path
            && path.as_os_str().is_empty()
        {
            return Err(Error::validation_error("Snapshot path cannot be empty"));
        }

        Ok(())
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))
    }
}

/// Builder for EngineConfig
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn simple_search_fields(mut self, fields: SimpleSearchFields) -> Self {
        self.config.simple_search_fields = fields;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.snapshot_path = Some(path.into());
        self
    }

    pub fn pretty_json(mut self, pretty: bool) -> Self {
        self.config.pretty_json = pretty;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
