//! App-wide constants.
//!
//! Config paths, environment variable names and Slack reply defaults.

/// Local config filename, looked up in the host's working directory.
pub const CONFIG_FILENAME: &str = "hooklog.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "hooklog";

/// Default attachment title on slash-command replies.
pub const DEFAULT_ATTACHMENT_TITLE: &str = "Parsed parameters";

/// Default attachment color on slash-command replies (Slack "good" blue).
pub const DEFAULT_ATTACHMENT_COLOR: &str = "#439FE0";

/// Default cap on attachment display fields.
pub const DEFAULT_MAX_FIELDS: usize = 5;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_LOG_LEVEL: &str = "HOOKLOG_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "HOOKLOG_LOG_JSON";
pub const ENV_RECEIVERS: &str = "HOOKLOG_RECEIVERS";
pub const ENV_PARAMETER_POLICY: &str = "HOOKLOG_PARAMETER_POLICY";
