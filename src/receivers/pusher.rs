//! Pusher channel-existence and presence webhooks.

use serde::Deserialize;

use super::{Receiver, ReceiverError, bind};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

/// Batch of events delivered in one Pusher request.
#[derive(Debug, Clone, Deserialize)]
pub struct PusherNotifications {
    pub time_ms: i64,
    pub events: Vec<PusherEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PusherEvent {
    /// `channel_occupied`, `member_added`, ...
    pub name: String,
}

pub struct PusherReceiver;

impl Receiver for PusherReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::Pusher
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let notifications: PusherNotifications = bind(request)?;

        for event in notifications.events {
            sink.record(&WebhookEvent::Event {
                receiver: self.name(),
                id: request.id.clone(),
                event: event.name,
            });
        }

        Ok(Reply::Accepted)
    }
}
