//! Chat identity type.

use serde::{Deserialize, Serialize};

/// Chat (private or group) identity; replies and staff notifications are addressed by chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// A one-to-one chat with a user; Telegram uses the user id as the chat id.
    pub fn private(id: i64) -> Self {
        Self {
            id,
            chat_type: "private".to_string(),
        }
    }
}
