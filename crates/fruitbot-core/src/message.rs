use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An incoming update from a channel: a text message or a button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Channel name (e.g. "telegram").
    pub channel: String,
    /// Conversation the update belongs to. Locale preferences are keyed by it.
    pub chat_id: i64,
    /// Platform-specific user ID.
    pub sender_id: String,
    /// Human-readable sender name.
    pub sender_name: Option<String>,
    /// Message text content. Empty for button presses.
    pub text: String,
    /// Language advertised by the client (e.g. Telegram's `language_code`).
    #[serde(default)]
    pub language_code: Option<String>,
    /// Set when the update is an inline keyboard press.
    #[serde(default)]
    pub callback: Option<CallbackPress>,
    pub timestamp: DateTime<Utc>,
}

impl IncomingMessage {
    /// Build a plain text message (used by tests and non-Telegram callers).
    pub fn text(channel: &str, chat_id: i64, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.to_string(),
            chat_id,
            sender_id: chat_id.to_string(),
            sender_name: None,
            text: text.to_string(),
            language_code: None,
            callback: None,
            timestamp: Utc::now(),
        }
    }

    /// The client hint, ignoring empty strings.
    pub fn locale_hint(&self) -> Option<&str> {
        self.language_code.as_deref().filter(|c| !c.is_empty())
    }
}

/// An inline keyboard button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackPress {
    /// Platform query ID, used to acknowledge the press.
    pub id: String,
    /// Opaque payload attached to the button.
    pub data: String,
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(default)]
    pub keyboard: Option<Keyboard>,
}

impl OutgoingMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Keyboard attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyboard {
    /// Persistent reply keyboard; pressing a button sends its label as text.
    Reply(Vec<Vec<String>>),
    /// Buttons under the message; pressing one sends its callback data.
    Inline(Vec<Vec<InlineButton>>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}
