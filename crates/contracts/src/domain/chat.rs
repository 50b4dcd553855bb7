use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How many characters of the first user message become the chat title.
const TITLE_PREFIX_LEN: usize = 30;

pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A source excerpt the backend attached to an assistant answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            citations,
            timestamp: Utc::now(),
        }
    }
}

/// A titled conversation. Messages are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Chat {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_CHAT_TITLE.to_string(),
            created_at: Utc::now(),
            messages: Vec::new(),
        }
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

/// Title shown for a chat once its first user message exists: a fixed-length
/// prefix of that message.
pub fn derive_chat_title(first_user_message: &str) -> String {
    if first_user_message.chars().count() > TITLE_PREFIX_LEN {
        let prefix: String = first_user_message.chars().take(TITLE_PREFIX_LEN).collect();
        format!("{}...", prefix)
    } else {
        first_user_message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_chat_title_short_message() {
        assert_eq!(derive_chat_title("What is force?"), "What is force?");
    }

    #[test]
    fn test_derive_chat_title_long_message() {
        let msg = "Explain the difference between velocity and speed in detail";
        let title = derive_chat_title(msg);
        assert_eq!(title, "Explain the difference between...");
        assert_eq!(title.chars().count(), 33);
    }

    #[test]
    fn test_new_chat_defaults() {
        let chat = Chat::new();
        assert_eq!(chat.title, DEFAULT_CHAT_TITLE);
        assert!(chat.messages.is_empty());
    }
}
