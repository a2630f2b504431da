use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Identifies who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Assistant,
}

impl MessageSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageSender::User => "user",
            MessageSender::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rendering kind of a message. Quick replies carry suggested follow-up
/// choices, system messages are engine-generated notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    QuickReply,
    System,
}

/// Lifecycle state of a chat session. Only active sessions accept messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Archived,
}

/// Represents a chat session between one user and the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatSession {
    /// The unique identifier for the session (UUID).
    pub id: String,
    /// The identifier of the user who owns this session.
    pub user_id: String,
    /// The user-visible title of the session.
    pub title: String,
    /// Lifecycle state of the session.
    pub status: SessionStatus,
    /// Free-form labels attached to the session (e.g., "personal-loan").
    #[serde(default)]
    pub tags: Json<Vec<String>>,
    /// Unix timestamp of when the session was created.
    pub created_at: i64,
    /// Unix timestamp of the most recent message in the session.
    pub last_activity: i64,
}

/// Represents a single message within a chat session.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// The unique identifier for the message.
    pub id: i64,
    /// The ID of the session this message belongs to.
    pub session_id: String,
    /// Who authored the message.
    pub sender: MessageSender,
    /// The text content of the message.
    pub content: String,
    /// Rendering kind of the message.
    pub message_type: MessageType,
    /// Unix timestamp of when the message was created.
    pub created_at: i64,
}

/// An incoming user message, validated before it reaches the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    /// The raw message text. Empty and oversized messages are rejected.
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// A request to open a new chat session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSessionRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1, max = 120))]
    pub title: String,
}
