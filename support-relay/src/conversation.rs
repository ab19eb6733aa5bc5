//! Conversation flow: the per-user gate that decides when a request record may be produced.
//!
//! Every user starts in [`ConversationState::AwaitingEntry`]. `/start` moves them to
//! [`ConversationState::CollectingRequest`]; the next plain-text message becomes the request and the
//! conversation ends, `/end` ends it without a request. Ended conversations are forgotten, which is
//! the same as being back in `AwaitingEntry`.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::commands::{Command, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    AwaitingEntry,
    CollectingRequest,
}

/// What the transport should do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowAction {
    /// Conversation started: send greeting and instructions.
    Greet,
    /// Request body accepted; conversation ended.
    Submit(String),
    /// Conversation ended by the user without a request.
    Ended,
    /// Not for the conversation flow in its current state.
    Ignore,
}

/// One conversation per user per chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub chat_id: i64,
    pub user_id: i64,
}

/// Conversation states for all users. Transitions for one key are atomic.
#[derive(Debug, Default)]
pub struct ConversationFlow {
    sessions: Mutex<HashMap<SessionKey, ConversationState>>,
}

impl ConversationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn state(&self, key: SessionKey) -> ConversationState {
        self.sessions
            .lock()
            .await
            .get(&key)
            .copied()
            .unwrap_or_default()
    }

    /// Applies one input and returns the action to carry out.
    pub async fn advance(&self, key: SessionKey, input: &Input) -> FlowAction {
        let mut sessions = self.sessions.lock().await;
        let state = sessions.get(&key).copied().unwrap_or_default();
        match (state, input) {
            (ConversationState::AwaitingEntry, Input::Command(Command::Start)) => {
                sessions.insert(key, ConversationState::CollectingRequest);
                FlowAction::Greet
            }
            (ConversationState::CollectingRequest, Input::Command(Command::End)) => {
                sessions.remove(&key);
                FlowAction::Ended
            }
            (ConversationState::CollectingRequest, Input::Text(text)) => {
                sessions.remove(&key);
                FlowAction::Submit(text.clone())
            }
            _ => FlowAction::Ignore,
        }
    }

    /// Number of users currently in `CollectingRequest`.
    pub async fn open_conversations(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: SessionKey = SessionKey {
        chat_id: 10,
        user_id: 10,
    };

    fn text(s: &str) -> Input {
        Input::Text(s.to_string())
    }

    #[tokio::test]
    async fn test_start_then_text_submits_and_ends() {
        let flow = ConversationFlow::new();
        assert_eq!(flow.advance(KEY, &Input::Command(Command::Start)).await, FlowAction::Greet);
        assert_eq!(flow.state(KEY).await, ConversationState::CollectingRequest);

        assert_eq!(
            flow.advance(KEY, &text("need help")).await,
            FlowAction::Submit("need help".to_string())
        );
        assert_eq!(flow.state(KEY).await, ConversationState::AwaitingEntry);

        // a second message after submission produces nothing
        assert_eq!(flow.advance(KEY, &text("hello?")).await, FlowAction::Ignore);
    }

    #[tokio::test]
    async fn test_end_exits_without_request() {
        let flow = ConversationFlow::new();
        flow.advance(KEY, &Input::Command(Command::Start)).await;
        assert_eq!(flow.advance(KEY, &Input::Command(Command::End)).await, FlowAction::Ended);
        assert_eq!(flow.open_conversations().await, 0);
    }

    #[tokio::test]
    async fn test_awaiting_entry_ignores_text_and_end() {
        let flow = ConversationFlow::new();
        assert_eq!(flow.advance(KEY, &text("hi")).await, FlowAction::Ignore);
        assert_eq!(flow.advance(KEY, &Input::Command(Command::End)).await, FlowAction::Ignore);
        assert_eq!(flow.state(KEY).await, ConversationState::AwaitingEntry);
    }

    #[tokio::test]
    async fn test_collecting_ignores_other_commands_and_empty() {
        let flow = ConversationFlow::new();
        flow.advance(KEY, &Input::Command(Command::Start)).await;
        assert_eq!(
            flow.advance(KEY, &Input::UnknownCommand("/help".into())).await,
            FlowAction::Ignore
        );
        assert_eq!(flow.advance(KEY, &Input::Empty).await, FlowAction::Ignore);
        assert_eq!(
            flow.advance(KEY, &Input::Command(Command::AdminStart)).await,
            FlowAction::Ignore
        );
        assert_eq!(flow.state(KEY).await, ConversationState::CollectingRequest);
    }

    #[tokio::test]
    async fn test_start_while_collecting_is_ignored() {
        let flow = ConversationFlow::new();
        flow.advance(KEY, &Input::Command(Command::Start)).await;
        assert_eq!(flow.advance(KEY, &Input::Command(Command::Start)).await, FlowAction::Ignore);
        assert_eq!(flow.state(KEY).await, ConversationState::CollectingRequest);

        // the conversation still takes the request afterwards
        assert_eq!(
            flow.advance(KEY, &text("brakes")).await,
            FlowAction::Submit("brakes".to_string())
        );
    }

    #[tokio::test]
    async fn test_sessions_are_per_user() {
        let flow = ConversationFlow::new();
        let other = SessionKey {
            chat_id: 11,
            user_id: 11,
        };
        flow.advance(KEY, &Input::Command(Command::Start)).await;
        assert_eq!(flow.advance(other, &text("hi")).await, FlowAction::Ignore);
        assert_eq!(flow.open_conversations().await, 1);
    }
}
