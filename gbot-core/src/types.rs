//! Message data model: user, entities, image, and the inbound message record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sender identity attached to a [`Message`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// May be empty; handlers fall back to `display_name` for mentions.
    pub username: String,
    pub display_name: String,
}

/// One special entity in a text message: hashtag, mention, URL and so on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: String,
    pub offset: usize,
    pub length: usize,
    /// For `text_link` only: the url opened when the text is tapped.
    pub url: Option<String>,
    /// For `text_mention` only: the mentioned user.
    pub user: Option<User>,
}

/// Image payload of a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    pub caption: Option<String>,
    pub entities: Option<Vec<Entity>>,
}

/// An inbound chat event. Immutable once constructed; every handler gets a
/// shared read-only view during dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub from: User,
    pub chat_id: i64,
    pub sent: DateTime<Utc>,
    /// Plain text; empty when the message carries no text.
    pub text: String,
    pub html: Option<String>,
    pub entities: Option<Vec<Entity>>,
    pub image: Option<Image>,
}
