//! Kudu (Azure App Service) deployment notifications.

use serde::Deserialize;

use super::{Receiver, ReceiverError, bind};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, WebhookEvent};

/// Deployment notification body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KuduNotification {
    pub id: String,
    pub status: String,
    pub status_text: String,
    pub site_name: String,
}

pub struct KuduReceiver;

impl Receiver for KuduReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::Kudu
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let notification: KuduNotification = bind(request)?;

        sink.record(&WebhookEvent::Deployment {
            deployment_id: notification.id,
            site_name: notification.site_name,
            status: notification.status,
            status_text: notification.status_text,
        });

        Ok(Reply::Accepted)
    }
}
