//! Inbound commands and classification of raw message text.

use std::sync::Arc;

use teloxide::utils::command::BotCommands;
use tokio::sync::RwLock;

/// Commands the relay understands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Support commands:")]
pub enum Command {
    #[command(description = "start a new request")]
    Start,
    #[command(description = "end the conversation")]
    End,
    #[command(description = "staff: start receiving requests")]
    AdminStart,
    #[command(description = "staff: stop receiving requests")]
    AdminStop,
}

/// What an inbound message means before any conversation state is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// Slash-prefixed text that is not one of our commands.
    UnknownCommand(String),
    Text(String),
    /// No text (photo, sticker, ...) or whitespace only.
    Empty,
}

/// Classifies text; `bot_username` lets `/start@ThisBot` match while `/start@OtherBot` does not.
pub fn classify(text: &str, bot_username: &str) -> Input {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if !trimmed.starts_with('/') {
        return Input::Text(text.to_string());
    }
    // Deep links append a payload ("/start ref42"); only the command word matters.
    let head = trimmed.split_whitespace().next().unwrap_or(trimmed);
    match Command::parse(head, bot_username) {
        Ok(command) => Input::Command(command),
        Err(_) => Input::UnknownCommand(head.to_string()),
    }
}

/// Classifier sharing the bot username discovered at startup.
#[derive(Clone, Default)]
pub struct CommandParser {
    bot_username: Arc<RwLock<Option<String>>>,
}

impl CommandParser {
    pub fn new(bot_username: Arc<RwLock<Option<String>>>) -> Self {
        Self { bot_username }
    }

    pub async fn classify(&self, text: &str) -> Input {
        let username = self.bot_username.read().await;
        classify(text, username.as_deref().unwrap_or_default())
    }
}
