//! Stripe event notifications.

use serde::Deserialize;

use super::{Receiver, ReceiverError, bind};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    /// `evt_...`
    pub id: String,
    /// `charge.succeeded`, `invoice.paid`, ...
    #[serde(rename = "type")]
    pub event_type: String,
}

pub struct StripeReceiver;

impl Receiver for StripeReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::Stripe
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let event: StripeEvent = bind(request)?;

        // The body's id and type win over the endpoint id and any header event.
        sink.record(&WebhookEvent::Event {
            receiver: self.name(),
            id: event.id,
            event: event.event_type,
        });

        Ok(Reply::Accepted)
    }
}
