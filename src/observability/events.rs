//! Event types reported by receivers.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::ReceiverName;

/// How a file was touched by a pushed commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChangeKind {
    Added,
    Modified,
    Removed,
}

impl FileChangeKind {
    /// Payload key listing files of this kind on a GitHub commit.
    pub fn commit_key(self) -> &'static str {
        match self {
            FileChangeKind::Added => "added",
            FileChangeKind::Modified => "modified",
            FileChangeKind::Removed => "removed",
        }
    }
}

/// A structured observation about a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebhookEvent {
    /// A delivery reached its receiver.
    Received { receiver: ReceiverName, id: String },

    /// Azure alert status change.
    AlertStatus {
        name: String,
        alert_id: String,
        status: String,
        timestamp: String,
    },

    /// GitHub push to a ref.
    Push { branch: String, commit_count: usize },

    /// One commit inside a push.
    Commit { id: String, message: String },

    /// One file touched by a commit.
    FileChange { kind: FileChangeKind, file: String },

    /// Kudu deployment status.
    Deployment {
        deployment_id: String,
        site_name: String,
        status: String,
        status_text: String,
    },

    /// A named message with a property count (DynamicsCRM, MailChimp).
    Message {
        receiver: ReceiverName,
        id: String,
        message: String,
        property_count: usize,
    },

    /// A named event reported by the sender.
    Event {
        receiver: ReceiverName,
        id: String,
        event: String,
    },

    /// A batch of outbound notifications (Salesforce).
    Notifications {
        organization_id: String,
        action_id: String,
        count: usize,
    },

    /// A slash command was parsed and answered.
    SlashCommand {
        command: String,
        action: String,
        parameter_count: usize,
    },

    /// A slash command was answered with a parse error.
    RejectedCommand { command: String, reason: String },
}

pub(crate) fn emit(event: &WebhookEvent) {
    match event {
        WebhookEvent::Received { receiver, id } => {
            info!(%receiver, id = %id, "Receiver received a delivery");
        }
        WebhookEvent::AlertStatus {
            name,
            alert_id,
            status,
            timestamp,
        } => {
            info!(
                alert = %name,
                alert_id = %alert_id,
                status = %status,
                timestamp = %timestamp,
                "Alert reached status"
            );
        }
        WebhookEvent::Push {
            branch,
            commit_count,
        } => {
            info!(branch = %branch, commit_count, "Received notification of push");
        }
        WebhookEvent::Commit { id, message } => {
            info!(commit = %id, message = %message, "Pushed commit");
        }
        WebhookEvent::FileChange { kind, file } => {
            info!(change = kind.commit_key(), file = %file, "Commit touched file");
        }
        WebhookEvent::Deployment {
            deployment_id,
            site_name,
            status,
            status_text,
        } => {
            info!(
                deployment = %deployment_id,
                site = %site_name,
                status = %status,
                status_text = %status_text,
                "Deployment reached status"
            );
        }
        WebhookEvent::Message {
            receiver,
            id,
            message,
            property_count,
        } => {
            info!(
                %receiver,
                id = %id,
                message = %message,
                property_count,
                "Receiver received message"
            );
        }
        WebhookEvent::Event {
            receiver,
            id,
            event,
        } => {
            info!(%receiver, id = %id, event = %event, "Receiver received event");
        }
        WebhookEvent::Notifications {
            organization_id,
            action_id,
            count,
        } => {
            info!(
                organization = %organization_id,
                action = %action_id,
                count,
                "Received outbound notifications"
            );
        }
        WebhookEvent::SlashCommand {
            command,
            action,
            parameter_count,
        } => {
            info!(
                command = %command,
                action = %action,
                parameter_count,
                "Answered slash command"
            );
        }
        WebhookEvent::RejectedCommand { command, reason } => {
            warn!(command = %command, reason = %reason, "Rejected slash command");
        }
    }
}
