//! Webhook receiver handlers with structured event logging.
//!
//! The hosting layer verifies and parses each delivery into a
//! [`models::WebhookRequest`], hands it to a [`receivers::Dispatcher`], and
//! writes the returned [`models::Reply`] back to the sender. Slack commands
//! are parsed with the [`command`] module.

pub mod command;
pub mod config;
pub mod constants;
pub mod env;
pub mod models;
pub mod observability;
pub mod receivers;
