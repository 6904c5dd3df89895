//! Configuration file handling
//!
//! A single JSON file; every field is optional:
//!
//! ```json
//! {
//!   "host": "0.0.0.0",
//!   "port": 5000,
//!   "cors_origins": ["http://localhost:3000"],
//!   "max_text_chars": 10000,
//!   "max_batch_texts": 100,
//!   "rules_path": "./rules.json",
//!   "log_level": "info"
//! }
//! ```
//!
//! Command-line flags override the file. Without a file, built-in defaults
//! and the built-in rule table are used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::engine::RuleSet;
use crate::http_server::HttpServerConfig;
use crate::observability::Severity;

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Transport settings
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// Rule file to load instead of the built-in table
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Lowest logged severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            rules_path: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// A relative `rules_path` is resolved against the config file's directory.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if let (Some(rules), Some(dir)) = (&config.rules_path, path.parent()) {
            if rules.is_relative() {
                config.rules_path = Some(dir.join(rules));
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Load from a path if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> CliResult<Self> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> CliResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if self.server.max_text_chars == 0 {
            return Err(CliError::config_error("max_text_chars must be > 0"));
        }

        if self.server.max_batch_texts == 0 {
            return Err(CliError::config_error("max_batch_texts must be > 0"));
        }

        Ok(())
    }

    /// Build the rule table this configuration names
    pub fn rule_set(&self) -> CliResult<RuleSet> {
        match &self.rules_path {
            Some(path) => Ok(RuleSet::load(path)?),
            None => Ok(RuleSet::builtin()),
        }
    }
}
