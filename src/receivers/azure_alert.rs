//! Azure Monitor alert notifications.

use serde::Deserialize;

use super::{Receiver, ReceiverError, bind};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

/// Alert notification body.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureAlertNotification {
    /// `Activated` or `Resolved`.
    pub status: String,
    pub context: AzureAlertContext,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureAlertContext {
    pub id: String,
    pub name: String,
    pub timestamp: String,
}

pub struct AzureAlertReceiver;

impl Receiver for AzureAlertReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::AzureAlert
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let notification: AzureAlertNotification = bind(request)?;

        sink.record(&WebhookEvent::AlertStatus {
            name: notification.context.name,
            alert_id: notification.context.id,
            status: notification.status,
            timestamp: notification.context.timestamp,
        });

        Ok(Reply::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::testing::RecordingSink;
    use serde_json::json;

    #[test]
    fn records_alert_status() {
        let request = WebhookRequest::json(
            ReceiverName::AzureAlert,
            "a1",
            json!({
                "status": "Activated",
                "context": {
                    "timestamp": "2015-08-14T22:26:41.9975398Z",
                    "id": "/subscriptions/s1/alertrules/cpu",
                    "name": "cpu-high",
                    "conditionType": "Metric"
                }
            }),
        );
        let sink = RecordingSink::default();
        let reply = AzureAlertReceiver.handle(&request, &sink).unwrap();

        assert_eq!(reply, Reply::Accepted);
        assert_eq!(
            sink.events(),
            vec![WebhookEvent::AlertStatus {
                name: "cpu-high".into(),
                alert_id: "/subscriptions/s1/alertrules/cpu".into(),
                status: "Activated".into(),
                timestamp: "2015-08-14T22:26:41.9975398Z".into(),
            }]
        );
    }

    #[test]
    fn missing_context_is_invalid() {
        let request = WebhookRequest::json(ReceiverName::AzureAlert, "a1", json!({"status": "Resolved"}));
        let err = AzureAlertReceiver
            .handle(&request, &RecordingSink::default())
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("context"));
    }
}
