//! GitHub webhooks.
//!
//! Every event is acknowledged. Push events additionally report the
//! branch, each commit, and each file the commits touched.

use serde_json::Value;

use super::{Receiver, ReceiverError, array_at, display_value, json_body};
use crate::models::{ReceiverName, Reply, WebhookRequest};
use crate::observability::{EventSink, FileChangeKind, WebhookEvent};

pub struct GitHubReceiver;

impl Receiver for GitHubReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::GitHub
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let body = json_body(request)?;
        let event = request
            .event
            .as_deref()
            .ok_or_else(|| ReceiverError::invalid(self.name(), "missing event name"))?;

        if event.eq_ignore_ascii_case("push") {
            record_push(body, sink)?;
        }

        Ok(Reply::Accepted)
    }
}

fn record_push(body: &Value, sink: &dyn EventSink) -> Result<(), ReceiverError> {
    let receiver = ReceiverName::GitHub;
    let branch = body
        .get("ref")
        .map(display_value)
        .ok_or_else(|| ReceiverError::invalid(receiver, "push is missing 'ref'"))?;
    let commits = array_at(receiver, body, "commits")?;

    sink.record(&WebhookEvent::Push {
        branch,
        commit_count: commits.len(),
    });

    for commit in commits {
        sink.record(&WebhookEvent::Commit {
            id: commit.get("id").map(display_value).unwrap_or_default(),
            message: commit.get("message").map(display_value).unwrap_or_default(),
        });

        for kind in [FileChangeKind::Added, FileChangeKind::Modified, FileChangeKind::Removed] {
            for file in array_at(receiver, commit, kind.commit_key())? {
                sink.record(&WebhookEvent::FileChange {
                    kind,
                    file: display_value(file),
                });
            }
        }
    }

    Ok(())
}
