//! Chat Message Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
    /// Error notices produced by the application itself
    System,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
            Sender::System => "system",
        }
    }
}

/// A web citation returned alongside generated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

impl GroundingSource {
    /// Title for display, falling back to the URI
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.uri
        } else {
            &self.title
        }
    }
}

/// One entry of a conversation log. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<GroundingSource>>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: format!("{}-{}", uuid::Uuid::new_v4(), sender.as_str()),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            sources: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>, sources: Option<Vec<GroundingSource>>) -> Self {
        Self {
            sources: sources.filter(|s| !s.is_empty()),
            ..Self::new(Sender::Assistant, text)
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Sender::System, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ChatMessage::user("hi");
        let b = ChatMessage::user("hi");
        assert_ne!(a.id, b.id);
        assert!(a.id.ends_with("-user"));
    }

    #[test]
    fn test_empty_sources_dropped() {
        let msg = ChatMessage::assistant("ok", Some(vec![]));
        assert!(msg.sources.is_none());

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "assistant");
        assert!(json.get("sources").is_none());
    }

    #[test]
    fn test_display_title_falls_back_to_uri() {
        let source = GroundingSource {
            uri: "https://example.org".to_string(),
            title: String::new(),
        };
        assert_eq!(source.display_title(), "https://example.org");
    }
}
