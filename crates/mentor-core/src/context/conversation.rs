use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::defaults;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "ai")]
    Assistant,
}

/// A single chat entry. Never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub text: String,
    #[serde(alias = "ts", default = "timestamp")]
    pub timestamp: String,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: timestamp(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }
}

/// A named, timestamped sequence of messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(default = "generate_id")]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "timestamp")]
    pub created_at: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            id: generate_id(),
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(default_name),
            created_at: timestamp(),
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drop all messages and start over under the placeholder name.
    pub fn reset(&mut self) {
        self.messages = Vec::new();
        self.name = default_name();
        self.created_at = timestamp();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// `c_` followed by 12 hex digits of a v4 UUID.
pub fn generate_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("c_{}", &raw[..12])
}

/// Current time as an RFC 3339 string.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

fn default_name() -> String {
    defaults::CONVERSATION_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id1 = generate_id();
        let id2 = generate_id();

        assert_ne!(id1, id2);
        assert!(id1.starts_with("c_"));
        assert_eq!(id1.len(), 14);
    }

    #[test]
    fn test_blank_name_falls_back_to_placeholder() {
        assert_eq!(Conversation::new(None).name, "Untitled");
        assert_eq!(Conversation::new(Some("   ")).name, "Untitled");
        assert_eq!(Conversation::new(Some(" Seed round ")).name, "Seed round");
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let conv = Conversation::new(Some("Pitch"));
        let json = serde_json::to_value(&conv).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_legacy_records_load() {
        let raw = r#"{"id":"c_abc1234","messages":[
            {"role":"user","text":"hi","ts":"2024-01-01T00:00:00Z"},
            {"role":"ai","text":"hello","ts":"2024-01-01T00:00:01Z"}
        ]}"#;
        let conv: Conversation = serde_json::from_str(raw).unwrap();

        assert_eq!(conv.name, "Untitled");
        assert!(!conv.created_at.is_empty());
        assert_eq!(conv.messages[1].role, Role::Assistant);
        assert_eq!(conv.messages[0].timestamp, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_reset_replaces_messages() {
        let mut conv = Conversation::new(Some("Named"));
        conv.push(Message::user("one"));
        conv.reset();

        assert!(conv.is_empty());
        assert_eq!(conv.name, "Untitled");
    }
}
