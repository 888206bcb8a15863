//! Email message records.
//!
//! Mirrors the message shape returned by the Microsoft Graph mail API. Only
//! the fields used for prompt rendering are modelled.

use serde::{Deserialize, Serialize};

use super::types::{lenient, non_empty, Timestamp};

/// An email message as supplied by the mailbox data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    /// Sender of the message.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub from: Option<Recipient>,
    /// Subject line.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// When the message was received.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub received_date_time: Option<Timestamp>,
    /// Short plain-text excerpt of the body.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub body_preview: Option<String>,
    /// Whether the message has been read.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    /// Full message body.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
}

/// Wrapper around a sender or recipient address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub email_address: Option<Address>,
}

/// An email address with optional display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Email address.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Display name (e.g., "John Doe").
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Address {
    /// Creates a new address with just an email.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            name: None,
        }
    }

    /// Creates a new address with email and display name.
    pub fn with_name(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            name: Some(name.into()),
        }
    }
}

/// Message body content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    /// "text" or "html".
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl MessageRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sender(mut self, address: Address) -> Self {
        self.from = Some(Recipient {
            email_address: Some(address),
        });
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_received(mut self, received: impl Into<Timestamp>) -> Self {
        self.received_date_time = Some(received.into());
        self
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.body_preview = Some(preview.into());
        self
    }

    pub fn with_body(mut self, content: impl Into<String>) -> Self {
        self.body = Some(ItemBody {
            content_type: Some("text".to_string()),
            content: Some(content.into()),
        });
        self
    }

    pub fn with_read(mut self, is_read: bool) -> Self {
        self.is_read = Some(is_read);
        self
    }

    fn sender(&self) -> Option<&Address> {
        self.from.as_ref().and_then(|r| r.email_address.as_ref())
    }

    /// Sender address, if present and not empty.
    pub fn sender_address(&self) -> Option<&str> {
        self.sender().and_then(|a| non_empty(a.address.as_ref()))
    }

    /// Sender display name, if present and not empty.
    pub fn sender_name(&self) -> Option<&str> {
        self.sender().and_then(|a| non_empty(a.name.as_ref()))
    }

    /// Body preview, if present and not empty.
    pub fn preview(&self) -> Option<&str> {
        non_empty(self.body_preview.as_ref())
    }

    /// Full body, falling back to the preview.
    pub fn content(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| non_empty(b.content.as_ref()))
            .or_else(|| self.preview())
    }

    /// Read flag; a missing flag counts as unread.
    pub fn read(&self) -> bool {
        self.is_read.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_graph_message() {
        let json = r#"{
            "id": "AAMk-1",
            "subject": "Quarterly numbers",
            "from": {"emailAddress": {"name": "Dana Ruiz", "address": "dana@example.com"}},
            "receivedDateTime": "2024-05-01T08:15:00Z",
            "bodyPreview": "Attached are the numbers",
            "isRead": false,
            "body": {"contentType": "text", "content": "Attached are the numbers for Q1."}
        }"#;

        let message: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(message.sender_address(), Some("dana@example.com"));
        assert_eq!(message.sender_name(), Some("Dana Ruiz"));
        assert_eq!(message.subject.as_deref(), Some("Quarterly numbers"));
        assert_eq!(message.preview(), Some("Attached are the numbers"));
        assert_eq!(message.content(), Some("Attached are the numbers for Q1."));
        assert!(!message.read());
    }

    #[test]
    fn empty_object_is_a_valid_message() {
        let message: MessageRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(message, MessageRecord::default());
        assert_eq!(message.sender_address(), None);
        assert_eq!(message.content(), None);
        assert!(!message.read());
    }

    #[test]
    fn malformed_fields_are_dropped() {
        let json = r#"{
            "subject": 42,
            "from": "dana@example.com",
            "isRead": "yes",
            "body": ["not", "an", "object"],
            "bodyPreview": "still here"
        }"#;

        let message: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(message.subject, None);
        assert_eq!(message.from, None);
        assert_eq!(message.is_read, None);
        assert_eq!(message.body, None);
        assert_eq!(message.preview(), Some("still here"));
    }

    #[test]
    fn malformed_nested_address_keeps_sibling() {
        let json = r#"{"from": {"emailAddress": {"name": 7, "address": "x@example.com"}}}"#;
        let message: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(message.sender_address(), Some("x@example.com"));
        assert_eq!(message.sender_name(), None);
    }

    #[test]
    fn content_falls_back_to_preview() {
        let message = MessageRecord::new().with_preview("short");
        assert_eq!(message.content(), Some("short"));

        let message = MessageRecord::new().with_preview("short").with_body("");
        assert_eq!(message.content(), Some("short"));

        let message = MessageRecord::new().with_preview("short").with_body("   ");
        assert_eq!(message.content(), Some("   "));
    }

    #[test]
    fn builder_round_trips_through_json() {
        let message = MessageRecord::new()
            .with_sender(Address::with_name("a@example.com", "A"))
            .with_subject("Hi")
            .with_read(true);

        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"emailAddress\""));
        assert!(json.contains("\"isRead\":true"));
        assert!(!json.contains("bodyPreview"));

        let back: MessageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
