//! Inbound webhook requests, as mapped by the hosting layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ReceiverName;

/// An already-verified, already-parsed webhook delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRequest {
    /// Which receiver the endpoint path selected.
    pub receiver: ReceiverName,
    /// Endpoint instance id (the `{id}` path segment). May be empty.
    #[serde(default)]
    pub id: String,
    /// Event name taken from the sender's headers, when the service sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    pub payload: Payload,
}

impl WebhookRequest {
    /// A request carrying a JSON body.
    pub fn json(receiver: ReceiverName, id: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            receiver,
            id: id.into(),
            event: None,
            payload: Payload::Json(body),
        }
    }

    /// A request carrying form fields.
    pub fn form(receiver: ReceiverName, id: impl Into<String>, fields: FormData) -> Self {
        Self {
            receiver,
            id: id.into(),
            event: None,
            payload: Payload::Form(fields),
        }
    }

    /// Attach the event name reported by the sender.
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }
}

/// Request body, either JSON or form-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Payload {
    Json(serde_json::Value),
    Form(FormData),
}

impl Payload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Form(_) => None,
        }
    }

    pub fn as_form(&self) -> Option<&FormData> {
        match self {
            Payload::Form(form) => Some(form),
            Payload::Json(_) => None,
        }
    }

    /// Short label for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Json(_) => "json",
            Payload::Form(_) => "form",
        }
    }
}

/// Form fields in arrival order. A field may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: IndexMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `name`, keeping earlier values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// First value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a field joined with commas, or `""` when absent.
    pub fn joined(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|values| values.join(","))
            .unwrap_or_default()
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (k, v) in iter {
            form.append(k, v);
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_keeps_repeated_values() {
        let form: FormData = [("type", "subscribe"), ("type", "profile"), ("email", "a@b.c")]
            .into_iter()
            .collect();
        assert_eq!(form.len(), 2);
        assert_eq!(form.get("type"), Some("subscribe"));
        assert_eq!(form.joined("type"), "subscribe,profile");
        assert_eq!(form.joined("missing"), "");
    }

    #[test]
    fn payload_accessors() {
        let json = Payload::Json(json!({"a": 1}));
        assert!(json.as_json().is_some());
        assert!(json.as_form().is_none());
        assert_eq!(json.kind(), "json");

        let form = Payload::Form(FormData::new());
        assert!(form.as_form().is_some());
        assert_eq!(form.kind(), "form");
    }

    #[test]
    fn request_builder_sets_event() {
        let req = WebhookRequest::json(ReceiverName::GitHub, "abc", json!({})).with_event("push");
        assert_eq!(req.receiver, ReceiverName::GitHub);
        assert_eq!(req.id, "abc");
        assert_eq!(req.event.as_deref(), Some("push"));
    }

    #[test]
    fn request_deserializes_from_host_json() {
        let req: WebhookRequest = serde_json::from_value(json!({
            "receiver": "stripe",
            "payload": {"kind": "json", "data": {"id": "evt_1"}}
        }))
        .unwrap();
        assert_eq!(req.receiver, ReceiverName::Stripe);
        assert_eq!(req.id, "");
        assert!(req.event.is_none());
        assert_eq!(req.payload.as_json().unwrap()["id"], "evt_1");
    }
}
