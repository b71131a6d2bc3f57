//! Structured webhook events and the sink they are reported to.
//!
//! Receivers never format log lines themselves. They build
//! [`WebhookEvent`] values and hand them to an injected [`EventSink`];
//! [`TracingSink`] turns them into `tracing` events with structured fields.

pub mod events;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

pub use events::{FileChangeKind, WebhookEvent};

/// Receives every structured event a receiver emits.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &WebhookEvent);
}

/// Sink that emits each event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &WebhookEvent) {
        events::emit(event);
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: &WebhookEvent) {}
}

/// Errors installing the global subscriber.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the level filter. `RUST_LOG` takes precedence over `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter, InitError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| InitError::Filter {
        filter: level.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global `tracing` subscriber described by `config`.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InitError> {
    let registry = tracing_subscriber::registry().with(build_filter(&config.level)?);

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .try_init()
    };

    installed.map_err(|e| InitError::Install(e.to_string()))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReceiverName;

    #[test]
    fn build_filter_accepts_plain_level() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("hooklog=trace,warn").is_ok());
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.record(&WebhookEvent::Received {
            receiver: ReceiverName::GitHub,
            id: "x".into(),
        });
    }

    #[test]
    fn init_tracing_second_call_fails() {
        let config = LoggingConfig::default();
        // Another test may have installed a subscriber first; either way the
        // second call in this test must report it.
        let _ = init_tracing(&config);
        let err = init_tracing(&config).unwrap_err();
        assert!(err.to_string().contains("install"));
    }
}
