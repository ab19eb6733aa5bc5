//! Staff commands: `/admin_start` and `/admin_stop` toggle the sender's staff session.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{
    Activation, Bot, Deactivation, Handler, HandlerResponse, Message, RelayError, Result,
    RouterHandle, StaffSession,
};
use tracing::{error, info, instrument, warn};

use crate::commands::{Command, CommandParser, Input};
use crate::replies;

/// Activates or deactivates the sender as staff through the router; replies with the outcome.
pub struct StaffCommandHandler {
    router: RouterHandle,
    bot: Arc<dyn Bot>,
    parser: CommandParser,
}

impl StaffCommandHandler {
    pub fn new(router: RouterHandle, bot: Arc<dyn Bot>, parser: CommandParser) -> Self {
        Self {
            router,
            bot,
            parser,
        }
    }

    /// Returns the reply still to send; a fresh activation's confirmation is sent by the router,
    /// ahead of the backlog.
    async fn start(&self, message: &Message) -> Option<&'static str> {
        let staff_id = message.user.id;
        let session = StaffSession::new(staff_id, message.chat.clone(), message.user.full_name())
            .with_welcome(replies::STAFF_ACTIVATED);
        match self.router.activate(staff_id, session).await {
            Ok(Activation::Activated) => {
                info!(staff_id = staff_id, "Staff member is now receiving requests");
                None
            }
            Ok(Activation::AlreadyActive) => Some(replies::STAFF_ALREADY_ACTIVE),
            Err(e) => Some(self.denial(staff_id, e)),
        }
    }

    async fn stop(&self, message: &Message) -> &'static str {
        let staff_id = message.user.id;
        match self.router.deactivate(staff_id).await {
            Ok(Deactivation::Removed) => {
                info!(staff_id = staff_id, "Staff member stopped receiving requests");
                replies::STAFF_DEACTIVATED
            }
            Ok(Deactivation::NotActive) => replies::STAFF_NOT_ACTIVE,
            Err(e) => self.denial(staff_id, e),
        }
    }

    fn denial(&self, staff_id: i64, e: RelayError) -> &'static str {
        match e {
            RelayError::Unauthorized(_) => {
                warn!(user_id = staff_id, "Staff command from id outside the allow-list");
                replies::STAFF_DENIED
            }
            other => {
                error!(user_id = staff_id, error = %other, "Staff command failed");
                replies::STAFF_UNAVAILABLE
            }
        }
    }
}

#[async_trait]
impl Handler for StaffCommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let reply = match self.parser.classify(&message.content).await {
            Input::Command(Command::AdminStart) => match self.start(message).await {
                Some(reply) => reply,
                None => return Ok(HandlerResponse::Reply(replies::STAFF_ACTIVATED.to_string())),
            },
            Input::Command(Command::AdminStop) => self.stop(message).await,
            _ => return Ok(HandlerResponse::Ignore),
        };
        self.bot.reply_to(message, reply).await?;
        Ok(HandlerResponse::Reply(reply.to_string()))
    }
}
