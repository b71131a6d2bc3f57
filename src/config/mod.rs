//! Configuration loading and layering.
//!
//! Handles `hooklog.toml` loading, the global config file, and
//! environment variable overrides with proper priority ordering.

pub mod loader;

pub use loader::{Config, ConfigError, LoggingConfig, ReceiversConfig, SlackConfig};
