//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. Environment variables
//! 2. `hooklog.toml` in the host's working directory
//! 3. `~/.config/hooklog/config.toml` (global defaults)
//! 4. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::command::ParameterPolicy;
use crate::constants;
use crate::env::Env;
use crate::models::ReceiverName;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub receivers: ReceiversConfig,
    pub slack: SlackConfig,
}

/// Subscriber settings used by [`crate::observability::init_tracing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `hooklog=debug,warn`.
    pub level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Which receivers the dispatcher accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiversConfig {
    pub enabled: Vec<ReceiverName>,
}

impl Default for ReceiversConfig {
    fn default() -> Self {
        Self {
            enabled: ReceiverName::all(),
        }
    }
}

/// Slash-command parsing and reply settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    pub parameter_policy: ParameterPolicy,
    pub attachment_title: String,
    pub attachment_color: String,
    /// Most parameters shown as individual attachment fields.
    pub max_fields: usize,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            parameter_policy: ParameterPolicy::Strict,
            attachment_title: constants::DEFAULT_ATTACHMENT_TITLE.to_string(),
            attachment_color: constants::DEFAULT_ATTACHMENT_COLOR.to_string(),
            max_fields: constants::DEFAULT_MAX_FIELDS,
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then `hooklog.toml` under `work_dir`, then
    /// applies environment variable overrides.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let layers: Vec<PathBuf> = [
            Self::global_config_path(),
            work_dir.map(|dir| dir.join(constants::CONFIG_FILENAME)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut config = Self::load_layers(&layers)?;
        config.apply_env_vars(env);
        Ok(config)
    }

    /// Merge config files key by key, later paths taking precedence.
    ///
    /// Missing files are skipped. Keys a layer leaves out keep the value from
    /// the layers below it; arrays are replaced, not appended.
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();
        let mut top = None;

        for path in paths.iter().filter(|p| p.exists()) {
            let table = Self::read_table(path)?;
            // Each layer must be valid on its own so errors name the right file.
            Self::from_table(table.clone(), path)?;
            merge_tables(&mut merged, table);
            top = Some(path);
        }

        match top {
            Some(path) => Self::from_table(merged, path),
            None => Ok(Config::default()),
        }
    }

    /// Load a config from a specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let table = Self::read_table(path)?;
        Self::from_table(table, path)
    }

    fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn from_table(table: toml::Table, path: &Path) -> Result<Self, ConfigError> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e| ConfigError::ParseFile {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(level) = env.get(constants::ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        match env.flag(constants::ENV_LOG_JSON) {
            Some(Ok(json)) => self.logging.json = json,
            Some(Err(value)) => warn!(%value, "ignoring invalid {}", constants::ENV_LOG_JSON),
            None => {}
        }

        if let Some(names) = env.list(constants::ENV_RECEIVERS) {
            let parsed: Result<Vec<ReceiverName>, String> =
                names.iter().map(|name| name.parse()).collect();
            match parsed {
                Ok(enabled) => self.receivers.enabled = enabled,
                Err(e) => warn!("ignoring invalid {} value: {e}", constants::ENV_RECEIVERS),
            }
        }

        if let Some(val) = env.get(constants::ENV_PARAMETER_POLICY) {
            match val.parse::<ParameterPolicy>() {
                Ok(policy) => self.slack.parameter_policy = policy,
                Err(e) => warn!("ignoring invalid {} value: {e}", constants::ENV_PARAMETER_POLICY),
            }
        }
    }
}

/// Recursively overlay `overlay` onto `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(table) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, table);
                continue;
            }
            base.insert(key, toml::Value::Table(table));
        } else {
            base.insert(key, value);
        }
    }
}
