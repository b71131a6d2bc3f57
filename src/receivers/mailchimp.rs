//! MailChimp list webhooks (form-encoded).

use super::{Receiver, ReceiverError, form_body};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

/// Form field carrying the event type (`subscribe`, `profile`, ...).
pub const EVENT_FIELD: &str = "type";

pub struct MailChimpReceiver;

impl Receiver for MailChimpReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::MailChimp
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let form = form_body(request)?;

        sink.record(&WebhookEvent::Message {
            receiver: self.name(),
            id: request.id.clone(),
            message: form.joined(EVENT_FIELD),
            property_count: form.len(),
        });

        Ok(Reply::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormData;
    use crate::observability::testing::RecordingSink;

    #[test]
    fn records_event_names_and_field_count() {
        let form: FormData = [
            ("type", "subscribe"),
            ("fired_at", "2009-03-26 21:35:57"),
            ("data[email]", "api@mailchimp.com"),
        ]
        .into_iter()
        .collect();
        let request = WebhookRequest::form(ReceiverName::MailChimp, "mc", form);
        let sink = RecordingSink::default();
        MailChimpReceiver.handle(&request, &sink).unwrap();

        assert_eq!(
            sink.events(),
            vec![WebhookEvent::Message {
                receiver: ReceiverName::MailChimp,
                id: "mc".into(),
                message: "subscribe".into(),
                property_count: 3,
            }]
        );
    }

    #[test]
    fn json_body_is_invalid() {
        let request = WebhookRequest::json(ReceiverName::MailChimp, "mc", serde_json::json!({}));
        let err = MailChimpReceiver.handle(&request, &RecordingSink::default()).unwrap_err();
        assert!(err.to_string().contains("expected a form body"));
    }
}
