//! Domain records shared across the auth and session stores.
//!
//! All persisted records serialize with camelCase field names and ISO-8601
//! timestamps, the layout existing client state is stored in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user.
pub type UserId = Uuid;
/// Unique identifier for a chat session.
pub type SessionId = Uuid;
/// Unique identifier for a message within a session.
pub type MessageId = Uuid;

/// A registered user. Created at signup, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Display name supplied at signup.
    pub name: String,
    /// Uniqueness key within the users collection (case-sensitive).
    pub email: String,
    /// Signup timestamp, immutable.
    pub created_at: DateTime<Utc>,
}

/// Speaker role for a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User-authored message.
    User,
    /// Assistant-authored message.
    Assistant,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Message stored in a session transcript. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Message identifier, unique within its session.
    pub id: MessageId,
    /// Message content.
    pub content: String,
    /// Role that produced the message.
    pub role: Role,
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
}

/// A titled conversation thread owned by one user, optionally linked to an
/// uploaded image and its extracted text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Session identifier.
    pub id: SessionId,
    /// Display title, mutable via `update_session`.
    pub title: String,
    /// Owning user, immutable after creation.
    pub user_id: UserId,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
    /// Bumped on every mutation to the session or its messages; recency
    /// sort key for listings.
    pub updated_at: DateTime<Utc>,
    /// Ordered transcript, insertion order = conversation order.
    pub messages: Vec<ChatMessage>,
    /// Source image reference captured at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Extraction output captured at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

/// Partial update for a session. Fields left as `None` are unchanged.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub extracted_text: Option<String>,
}
