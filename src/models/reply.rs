//! Replies handed back to the hosting layer.
//!
//! [`SlashReply`] serializes to Slack's message JSON with legacy
//! attachments; the host writes it out as the response body.

use serde::{Deserialize, Serialize};

/// Outcome of a successfully handled webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Acknowledge with an empty success response.
    Accepted,
    /// Answer a slash command or outgoing webhook with a message.
    Slash(SlashReply),
}

impl Reply {
    /// The slash reply, if this is one.
    pub fn as_slash(&self) -> Option<&SlashReply> {
        match self {
            Reply::Slash(reply) => Some(reply),
            Reply::Accepted => None,
        }
    }
}

/// A message reply with optional attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl SlashReply {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// A titled, colored block of name/value fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    /// Plain-text summary for clients that cannot render attachments.
    pub fallback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
}

impl Attachment {
    pub fn new(title: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fallback: fallback.into(),
            color: None,
            fields: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_field(mut self, field: AttachmentField) -> Self {
        self.fields.push(field);
        self
    }
}

/// One name/value row inside an attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    /// Whether the field is narrow enough to sit beside another.
    #[serde(default)]
    pub short: bool,
}

impl AttachmentField {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }

    pub fn short(mut self) -> Self {
        self.short = true;
        self
    }
}
