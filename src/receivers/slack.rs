//! Slack slash commands and outgoing webhooks (form-encoded).
//!
//! The command text is split into an action and parameters, and the reply
//! echoes both back: the parameters as attachment fields.

use super::{Receiver, ReceiverError, form_body};
use crate::command::{MalformedParameter, ParameterSet, parse_action_with_value};
use crate::config::SlackConfig;
use crate::models::{
    Attachment, AttachmentField, FormData, ReceiverName, Reply, SlashReply, WebhookRequest,
};
use crate::observability::{EventSink, WebhookEvent};

pub const COMMAND_FIELD: &str = "command";
pub const TEXT_FIELD: &str = "text";
pub const TRIGGER_FIELD: &str = "trigger_word";
pub const SUBTEXT_FIELD: &str = "subtext";

pub struct SlackReceiver {
    config: SlackConfig,
}

impl SlackReceiver {
    pub fn new(config: SlackConfig) -> Self {
        Self { config }
    }

    /// Build the reply for a successfully parsed command.
    fn reply(&self, source: &str, action: &str, params: &ParameterSet) -> SlashReply {
        let text = if action.is_empty() {
            format!("Received {source} with no action.")
        } else {
            format!("Received {source} with action '{action}'.")
        };
        let reply = SlashReply::text(text);
        if params.is_empty() {
            return reply;
        }

        let normalized = params.to_string();
        let mut attachment = Attachment::new(&self.config.attachment_title, &normalized)
            .with_color(&self.config.attachment_color);
        for (name, value) in params.iter().take(self.config.max_fields) {
            attachment = attachment.with_field(AttachmentField::new(name, value).short());
        }
        if params.len() > self.config.max_fields {
            attachment = attachment.with_field(AttachmentField::new("Parameters", normalized));
        }

        reply.with_attachment(attachment)
    }

    fn reject(&self, command: &str, err: &MalformedParameter, sink: &dyn EventSink) -> SlashReply {
        sink.record(&WebhookEvent::RejectedCommand {
            command: command.to_string(),
            reason: err.to_string(),
        });
        SlashReply::text(err.to_string())
    }
}

impl Receiver for SlackReceiver {
    fn name(&self) -> ReceiverName {
        ReceiverName::Slack
    }

    fn handle(&self, request: &WebhookRequest, sink: &dyn EventSink) -> Result<Reply, ReceiverError> {
        let form = form_body(request)?;
        let command = non_empty(form, COMMAND_FIELD);
        let trigger = non_empty(form, TRIGGER_FIELD);

        let (label, source) = match (command, trigger) {
            (Some(command), _) => (command, format!("slash command '{command}'")),
            (None, Some(trigger)) => (trigger, format!("trigger word '{trigger}'")),
            (None, None) => {
                return Err(ReceiverError::invalid(
                    self.name(),
                    "expected a 'command' or 'trigger_word' field",
                ));
            }
        };

        let parsed = parse_action_with_value(&subtext(form, trigger));
        let params = match parsed.parameters(self.config.parameter_policy) {
            Ok(params) => params,
            Err(err) => return Ok(Reply::Slash(self.reject(label, &err, sink))),
        };

        sink.record(&WebhookEvent::SlashCommand {
            command: label.to_string(),
            action: parsed.action.clone(),
            parameter_count: params.len(),
        });

        Ok(Reply::Slash(self.reply(&source, &parsed.action, &params)))
    }
}

fn non_empty<'a>(form: &'a FormData, field: &str) -> Option<&'a str> {
    form.get(field).map(str::trim).filter(|s| !s.is_empty())
}

/// Text after the command or trigger word.
///
/// Uses the host-provided `subtext` when present; otherwise strips a
/// leading trigger word from `text`. The trigger only matches as a whole
/// word, so `bot` is not stripped from `botany`.
fn subtext(form: &FormData, trigger: Option<&str>) -> String {
    if let Some(sub) = form.get(SUBTEXT_FIELD) {
        return sub.trim().to_string();
    }

    let text = form.get(TEXT_FIELD).unwrap_or_default().trim();
    let rest = trigger
        .and_then(|t| text.strip_prefix(t))
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
    match rest {
        Some(rest) => rest.trim().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ParameterPolicy;
    use crate::observability::testing::RecordingSink;
    use pretty_assertions::assert_eq;

    fn slash(text: &str) -> WebhookRequest {
        let form: FormData = [
            ("token", "t"),
            ("team_id", "T0001"),
            ("channel_name", "ops"),
            ("user_name", "sam"),
            ("command", "/ops"),
            ("text", text),
        ]
        .into_iter()
        .collect();
        WebhookRequest::form(ReceiverName::Slack, "sl", form)
    }

    fn handle(receiver: &SlackReceiver, request: &WebhookRequest) -> (SlashReply, Vec<WebhookEvent>) {
        let sink = RecordingSink::default();
        let reply = receiver.handle(request, &sink).unwrap();
        let reply = reply.as_slash().cloned().expect("slack always replies with a message");
        (reply, sink.events())
    }

    #[test]
    fn slash_command_reply_lists_parameters() {
        let receiver = SlackReceiver::new(SlackConfig::default());
        let (reply, events) = handle(&receiver, &slash("deploy env=prod,version=3"));

        assert_eq!(reply.text, "Received slash command '/ops' with action 'deploy'.");
        assert_eq!(reply.attachments.len(), 1);
        let attachment = &reply.attachments[0];
        assert_eq!(attachment.title, "Parsed parameters");
        assert_eq!(attachment.fallback, "env=prod, version=3");
        assert_eq!(attachment.color.as_deref(), Some("#439FE0"));
        assert_eq!(
            attachment.fields,
            vec![
                AttachmentField::new("env", "prod").short(),
                AttachmentField::new("version", "3").short(),
            ]
        );
        assert_eq!(
            events,
            vec![WebhookEvent::SlashCommand {
                command: "/ops".into(),
                action: "deploy".into(),
                parameter_count: 2,
            }]
        );
    }

    #[test]
    fn action_without_parameters_has_no_attachment() {
        let receiver = SlackReceiver::new(SlackConfig::default());
        let (reply, _) = handle(&receiver, &slash("status"));
        assert_eq!(reply.text, "Received slash command '/ops' with action 'status'.");
        assert!(reply.attachments.is_empty());
    }

    #[test]
    fn empty_text_reports_no_action() {
        let receiver = SlackReceiver::new(SlackConfig::default());
        let (reply, _) = handle(&receiver, &slash(""));
        assert_eq!(reply.text, "Received slash command '/ops' with no action.");
    }

    #[test]
    fn malformed_parameter_replies_with_error() {
        let receiver = SlackReceiver::new(SlackConfig::default());
        let (reply, events) = handle(&receiver, &slash("deploy env=prod,bad"));

        assert_eq!(reply.text, "Parameter 'bad' is missing a value.");
        assert!(reply.attachments.is_empty());
        assert_eq!(
            events,
            vec![WebhookEvent::RejectedCommand {
                command: "/ops".into(),
                reason: "Parameter 'bad' is missing a value.".into(),
            }]
        );
    }

    #[test]
    fn lenient_policy_accepts_bare_parameters() {
        let config = SlackConfig {
            parameter_policy: ParameterPolicy::Lenient,
            ..SlackConfig::default()
        };
        let receiver = SlackReceiver::new(config);
        let (reply, _) = handle(&receiver, &slash("deploy env=prod,dry-run"));
        assert_eq!(reply.attachments[0].fallback, "env=prod, dry-run=");
    }

    #[test]
    fn fields_are_capped_with_summary_field() {
        let config = SlackConfig {
            max_fields: 2,
            ..SlackConfig::default()
        };
        let receiver = SlackReceiver::new(config);
        let (reply, _) = handle(&receiver, &slash("set a=1,b=2,c=3"));

        let fields = &reply.attachments[0].fields;
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1], AttachmentField::new("b", "2").short());
        assert_eq!(fields[2], AttachmentField::new("Parameters", "a=1, b=2, c=3"));
    }

    #[test]
    fn outgoing_webhook_strips_trigger_word() {
        let form: FormData = [
            ("channel_name", "general"),
            ("trigger_word", "bot"),
            ("text", "bot restart service=web"),
        ]
        .into_iter()
        .collect();
        let request = WebhookRequest::form(ReceiverName::Slack, "sl", form);
        let receiver = SlackReceiver::new(SlackConfig::default());
        let (reply, events) = handle(&receiver, &request);

        assert_eq!(reply.text, "Received trigger word 'bot' with action 'restart'.");
        assert_eq!(reply.attachments[0].fallback, "service=web");
        assert!(matches!(
            &events[0],
            WebhookEvent::SlashCommand { command, .. } if command == "bot"
        ));
    }

    #[test]
    fn trigger_word_is_only_stripped_as_whole_word() {
        let form: FormData = [("trigger_word", "bot"), ("text", "botany a=1")]
            .into_iter()
            .collect();
        let request = WebhookRequest::form(ReceiverName::Slack, "sl", form);
        let receiver = SlackReceiver::new(SlackConfig::default());
        let (reply, _) = handle(&receiver, &request);

        assert_eq!(reply.text, "Received trigger word 'bot' with action 'botany'.");
        assert_eq!(reply.attachments[0].fallback, "a=1");
    }

    #[test]
    fn bare_trigger_word_has_no_action() {
        let form: FormData = [("trigger_word", "bot"), ("text", "bot")].into_iter().collect();
        let request = WebhookRequest::form(ReceiverName::Slack, "sl", form);
        let receiver = SlackReceiver::new(SlackConfig::default());
        let (reply, _) = handle(&receiver, &request);
        assert_eq!(reply.text, "Received trigger word 'bot' with no action.");
    }

    #[test]
    fn host_subtext_takes_precedence() {
        let form: FormData = [
            ("command", "/ops"),
            ("text", "ignored text"),
            ("subtext", "scale replicas=4"),
        ]
        .into_iter()
        .collect();
        let request = WebhookRequest::form(ReceiverName::Slack, "sl", form);
        let receiver = SlackReceiver::new(SlackConfig::default());
        let (reply, _) = handle(&receiver, &request);
        assert_eq!(reply.text, "Received slash command '/ops' with action 'scale'.");
    }

    #[test]
    fn missing_command_and_trigger_is_invalid() {
        let form: FormData = [("text", "hello")].into_iter().collect();
        let request = WebhookRequest::form(ReceiverName::Slack, "sl", form);
        let receiver = SlackReceiver::new(SlackConfig::default());
        let err = receiver.handle(&request, &RecordingSink::default()).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
