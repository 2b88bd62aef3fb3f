//! Configuration loading and typed config structures for a Ringtoss
//! event.
//!
//! The canonical configuration lives in `ringtoss-config.yaml` next to
//! wherever the embedding application runs. This module defines
//! strongly-typed structs that mirror the YAML structure, and provides
//! a loader that reads the file. All fields have defaults matching the
//! original event setup (a 6000 pool over four levels), so an absent
//! or empty file yields a usable configuration.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level event configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventConfig {
    /// Budget pool and reward table.
    #[serde(default)]
    pub event: EventSection,

    /// Snapshot storage settings.
    #[serde(default)]
    pub storage: StorageSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl EventConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Budget pool and reward table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventSection {
    /// The shared budget pool all rewards are debited from.
    #[serde(default = "default_max_budget")]
    pub max_budget: i64,

    /// Reward per level, level 0 first. Level 0 must be 0.
    #[serde(default = "default_level_rewards")]
    pub level_rewards: Vec<i64>,
}

impl Default for EventSection {
    fn default() -> Self {
        Self {
            max_budget: default_max_budget(),
            level_rewards: default_level_rewards(),
        }
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSection {
    /// Where the JSON snapshot document lives.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Default tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_max_budget() -> i64 {
    6000
}

fn default_level_rewards() -> Vec<i64> {
    vec![0, 100, 300, 500]
}

fn default_snapshot_path() -> String {
    "ringtoss-ledger.json".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_the_defaults() {
        let config = EventConfig::parse("{}").unwrap();
        assert_eq!(config.event.max_budget, 6000);
        assert_eq!(config.event.level_rewards, vec![0, 100, 300, 500]);
        assert_eq!(config.storage.snapshot_path, "ringtoss-ledger.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_document_overrides_selectively() {
        let yaml = "event:\n  max_budget: 800\n";
        let config = EventConfig::parse(yaml).unwrap();
        assert_eq!(config.event.max_budget, 800);
        // The untouched fields keep their defaults.
        assert_eq!(config.event.level_rewards, vec![0, 100, 300, 500]);
    }

    #[test]
    fn full_document_parses() {
        let yaml = concat!(
            "event:\n",
            "  max_budget: 10000\n",
            "  level_rewards: [0, 50, 150, 400, 900]\n",
            "storage:\n",
            "  snapshot_path: /var/lib/ringtoss/ledger.json\n",
            "logging:\n",
            "  level: debug\n",
        );
        let config = EventConfig::parse(yaml).unwrap();
        assert_eq!(config.event.max_budget, 10000);
        assert_eq!(config.event.level_rewards.len(), 5);
        assert_eq!(config.storage.snapshot_path, "/var/lib/ringtoss/ledger.json");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            EventConfig::parse(": not yaml"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
