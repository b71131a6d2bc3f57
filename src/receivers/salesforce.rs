//! Salesforce outbound messages.
//!
//! The host converts the SOAP envelope into JSON before dispatch.

use serde::Deserialize;

use super::{Receiver, ReceiverError, bind};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesforceNotifications {
    pub organization_id: String,
    pub action_id: String,
    #[serde(default)]
    pub notifications: Vec<serde_json::Value>,
}

pub struct SalesforceReceiver;

impl Receiver for SalesforceReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::Salesforce
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let message: SalesforceNotifications = bind(request)?;

        sink.record(&WebhookEvent::Notifications {
            organization_id: message.organization_id,
            action_id: message.action_id,
            count: message.notifications.len(),
        });

        Ok(Reply::Accepted)
    }
}
