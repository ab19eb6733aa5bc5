//! Message record: one customer request captured by the conversation flow.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use teloxide::utils::html;
use uuid::Uuid;

use crate::types::User;

/// Immutable value for one inbound request. Fields are private so a record cannot change after
/// it has been routed; `created_at` is always in the business's working timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    id: Uuid,
    #[serde(rename = "msg")]
    text: String,
    user_id: i64,
    user_name: String,
    #[serde(rename = "time")]
    created_at: DateTime<FixedOffset>,
}

impl MessageRecord {
    /// Creates a record from the sender and the text they submitted.
    pub fn new(text: impl Into<String>, sender: &User, created_at: DateTime<FixedOffset>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            user_id: sender.id,
            user_name: sender.full_name(),
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    /// Staff notification body (Telegram HTML): sender name, `HH:MM:SS` and the request text.
    pub fn to_html(&self) -> String {
        format!(
            "<b>Name: {}</b>\n<b>Time: {}</b>\n\n{}",
            html::escape(&self.user_name),
            self.created_at.format("%H:%M:%S"),
            html::escape(&self.text)
        )
    }
}
