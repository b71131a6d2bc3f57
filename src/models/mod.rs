//! Shared types used across all modules.
//!
//! Receiver names, the inbound request handed over by the hosting layer,
//! and the replies handed back. Other modules import from here rather than
//! reaching into each other's internals.

pub mod reply;
pub mod request;

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

pub use reply::{Attachment, AttachmentField, Reply, SlashReply};
pub use request::{FormData, Payload, WebhookRequest};

/// Third-party services a webhook endpoint can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverName {
    AzureAlert,
    Bitbucket,
    Dropbox,
    DynamicsCrm,
    GitHub,
    Kudu,
    MailChimp,
    Pusher,
    Salesforce,
    Slack,
    Stripe,
}

impl ReceiverName {
    /// All receivers, in declaration order.
    pub fn all() -> Vec<ReceiverName> {
        ReceiverName::iter().collect()
    }

    /// The lowercase name used in endpoint paths and config.
    pub fn as_str(self) -> &'static str {
        match self {
            ReceiverName::AzureAlert => "azurealert",
            ReceiverName::Bitbucket => "bitbucket",
            ReceiverName::Dropbox => "dropbox",
            ReceiverName::DynamicsCrm => "dynamicscrm",
            ReceiverName::GitHub => "github",
            ReceiverName::Kudu => "kudu",
            ReceiverName::MailChimp => "mailchimp",
            ReceiverName::Pusher => "pusher",
            ReceiverName::Salesforce => "salesforce",
            ReceiverName::Slack => "slack",
            ReceiverName::Stripe => "stripe",
        }
    }
}

impl fmt::Display for ReceiverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReceiverName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ReceiverName::iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| {
                let supported: Vec<_> = ReceiverName::iter().map(ReceiverName::as_str).collect();
                format!(
                    "unsupported receiver: '{s}'. Supported: {}",
                    supported.join(", ")
                )
            })
    }
}
