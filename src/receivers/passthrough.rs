//! Receivers that only acknowledge and report the event name
//! (Bitbucket, Dropbox).

use super::{Receiver, ReceiverError, json_body};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

pub struct PassthroughReceiver {
    name: ReceiverName,
    /// Event name used when the sender does not report one.
    default_event: Option<&'static str>,
}

impl PassthroughReceiver {
    /// Bitbucket always sends an `X-Event-Key`; a delivery without one is invalid.
    pub fn bitbucket() -> Self {
        Self {
            name: ReceiverName::Bitbucket,
            default_event: None,
        }
    }

    /// Dropbox only ever notifies about file changes.
    pub fn dropbox() -> Self {
        Self {
            name: ReceiverName::Dropbox,
            default_event: Some("change"),
        }
    }
}

impl Receiver for PassthroughReceiver {
    fn name(&self) -> ReceiverName {
        self.name
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        json_body(request)?;

        let event = request
            .event
            .as_deref()
            .or(self.default_event)
            .ok_or_else(|| ReceiverError::invalid(self.name, "missing event name"))?;

        sink.record(&WebhookEvent::Event {
            receiver: self.name,
            id: request.id.clone(),
            event: event.to_string(),
        });

        Ok(Reply::Accepted)
    }
}
