//! Webhook receivers: Azure Alerts, Bitbucket, Dropbox, DynamicsCRM,
//! GitHub, Kudu, MailChimp, Pusher, Salesforce, Slack, Stripe.
//!
//! Each receiver consumes an already-verified [`WebhookRequest`], reports
//! what it saw to an [`EventSink`], and returns a [`Reply`]. The
//! [`Dispatcher`] maps a request to its receiver by name.

pub mod azure_alert;
pub mod dynamics_crm;
pub mod github;
pub mod kudu;
pub mod mailchimp;
pub mod passthrough;
pub mod pusher;
pub mod salesforce;
pub mod slack;
pub mod stripe;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::{FormData, ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

/// Errors a receiver reports back to the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiverError {
    #[error("receiver '{0}' is not enabled")]
    Disabled(ReceiverName),

    #[error("invalid {receiver} payload: {reason}")]
    InvalidPayload {
        receiver: ReceiverName,
        reason: String,
    },
}

impl ReceiverError {
    pub(crate) fn invalid(receiver: ReceiverName, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            receiver,
            reason: reason.into(),
        }
    }

    /// HTTP status the host should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Disabled(_) => 404,
            Self::InvalidPayload { .. } => 400,
        }
    }
}

/// Handler for one third-party webhook format.
pub trait Receiver: Send + Sync {
    fn name(&self) -> ReceiverName;

    /// Handle one delivery, reporting events to `sink`.
    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError>;
}

/// Routes requests to the enabled receivers.
pub struct Dispatcher {
    receivers: IndexMap<ReceiverName, Box<dyn Receiver>>,
}

impl Dispatcher {
    /// Build a dispatcher with the receivers enabled in `config`.
    pub fn new(config: &Config) -> Self {
        let mut receivers: IndexMap<ReceiverName, Box<dyn Receiver>> = IndexMap::new();
        for &name in &config.receivers.enabled {
            receivers.insert(name, build_receiver(name, config));
        }
        Self { receivers }
    }

    /// Names of the enabled receivers.
    pub fn receivers(&self) -> impl Iterator<Item = ReceiverName> + '_ {
        self.receivers.keys().copied()
    }

    /// Hand `request` to its receiver.
    pub fn dispatch(
        &self,
        request: &WebhookRequest,
        sink: &dyn EventSink,
    ) -> Result<Reply, ReceiverError> {
        let Some(receiver) = self.receivers.get(&request.receiver) else {
            debug!(receiver = %request.receiver, "Rejected delivery for disabled receiver");
            return Err(ReceiverError::Disabled(request.receiver));
        };

        sink.record(&WebhookEvent::Received {
            receiver: request.receiver,
            id: request.id.clone(),
        });

        receiver.handle(request, sink)
    }
}

fn build_receiver(name: ReceiverName, config: &Config) -> Box<dyn Receiver> {
    match name {
        ReceiverName::AzureAlert => Box::new(azure_alert::AzureAlertReceiver),
        ReceiverName::Bitbucket => Box::new(passthrough::PassthroughReceiver::bitbucket()),
        ReceiverName::Dropbox => Box::new(passthrough::PassthroughReceiver::dropbox()),
        ReceiverName::DynamicsCrm => Box::new(dynamics_crm::DynamicsCrmReceiver),
        ReceiverName::GitHub => Box::new(github::GitHubReceiver),
        ReceiverName::Kudu => Box::new(kudu::KuduReceiver),
        ReceiverName::MailChimp => Box::new(mailchimp::MailChimpReceiver),
        ReceiverName::Pusher => Box::new(pusher::PusherReceiver),
        ReceiverName::Salesforce => Box::new(salesforce::SalesforceReceiver),
        ReceiverName::Slack => Box::new(slack::SlackReceiver::new(config.slack.clone())),
        ReceiverName::Stripe => Box::new(stripe::StripeReceiver),
    }
}

// ── Payload helpers shared by the receivers ────────────────────────

/// The JSON body, or an error naming the payload kind actually received.
pub(crate) fn json_body(request: &WebhookRequest) -> Result<&Value, ReceiverError> {
    request.payload.as_json().ok_or_else(|| {
        ReceiverError::invalid(
            request.receiver,
            format!("expected a json body, got {}", request.payload.kind()),
        )
    })
}

/// The form body, or an error naming the payload kind actually received.
pub(crate) fn form_body(request: &WebhookRequest) -> Result<&FormData, ReceiverError> {
    request.payload.as_form().ok_or_else(|| {
        ReceiverError::invalid(
            request.receiver,
            format!("expected a form body, got {}", request.payload.kind()),
        )
    })
}

/// Bind the JSON body to a typed notification.
pub(crate) fn bind<T: DeserializeOwned>(request: &WebhookRequest) -> Result<T, ReceiverError> {
    let body = json_body(request)?;
    T::deserialize(body).map_err(|e| ReceiverError::invalid(request.receiver, e.to_string()))
}

/// Render a JSON value the way it reads in a log line: strings unquoted.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Array elements under `key`, or nothing when the key is absent or null.
pub(crate) fn array_at<'a>(
    receiver: ReceiverName,
    value: &'a Value,
    key: &str,
) -> Result<&'a [Value], ReceiverError> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ReceiverError::invalid(receiver, format!("'{key}' is not an array"))),
    }
}
