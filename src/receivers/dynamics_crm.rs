//! Dynamics CRM plugin notifications.

use super::{Receiver, ReceiverError, display_value, json_body};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

/// Body property naming the CRM message (`Create`, `Update`, ...).
pub const MESSAGE_NAME_PROPERTY: &str = "MessageName";

pub struct DynamicsCrmReceiver;

impl Receiver for DynamicsCrmReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::DynamicsCrm
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let body = json_body(request)?
            .as_object()
            .ok_or_else(|| ReceiverError::invalid(self.name(), "body is not a json object"))?;

        sink.record(&WebhookEvent::Message {
            receiver: self.name(),
            id: request.id.clone(),
            message: body.get(MESSAGE_NAME_PROPERTY).map(display_value).unwrap_or_default(),
            property_count: body.len(),
        });

        Ok(Reply::Accepted)
    }
}
