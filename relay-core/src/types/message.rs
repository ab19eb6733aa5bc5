//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single inbound message from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text; empty for non-text messages (photos, stickers, ...).
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the message carries text.
    pub fn has_text(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
