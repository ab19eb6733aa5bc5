//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in the application crate and
//! tests substitute a recording implementation.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain-text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends an HTML-formatted message to the given chat.
    async fn send_html(&self, chat: &Chat, html: &str) -> Result<()>;

    /// Replies with plain text in the chat the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    /// Replies with HTML in the chat the message came from.
    async fn reply_html(&self, message: &Message, html: &str) -> Result<()> {
        self.send_html(&message.chat, html).await
    }
}
