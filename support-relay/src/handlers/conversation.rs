//! Customer side: drives the conversation flow and hands accepted requests to the router.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{
    AvailabilityPolicy, Bot, Clock, Handler, HandlerResponse, Message, MessageRecord, Result,
    RouteOutcome, RouterHandle,
};
use tracing::{error, info, instrument};

use crate::commands::CommandParser;
use crate::conversation::{ConversationFlow, FlowAction, SessionKey};
use crate::replies;

pub struct ConversationHandler {
    flow: Arc<ConversationFlow>,
    router: RouterHandle,
    bot: Arc<dyn Bot>,
    parser: CommandParser,
    policy: AvailabilityPolicy,
    clock: Arc<dyn Clock>,
    greeting_html: String,
}

impl ConversationHandler {
    pub fn new(
        flow: Arc<ConversationFlow>,
        router: RouterHandle,
        bot: Arc<dyn Bot>,
        parser: CommandParser,
        policy: AvailabilityPolicy,
        clock: Arc<dyn Clock>,
        greeting_html: String,
    ) -> Self {
        Self {
            flow,
            router,
            bot,
            parser,
            policy,
            clock,
            greeting_html,
        }
    }

    /// Routes the request and tells the customer whether it was registered.
    async fn submit(&self, message: &Message, text: String) -> Result<String> {
        let record = MessageRecord::new(text, &message.user, self.policy.localize(self.clock.now()));
        let record_id = record.id();
        match self.router.route(record).await {
            Ok(outcome) => {
                let live = matches!(outcome, RouteOutcome::Delivered { .. });
                info!(user_id = message.user.id, record_id = %record_id, live = live, "Request accepted");
                self.bot.reply_to(message, replies::REQUEST_ACCEPTED).await?;
                self.bot.reply_to(message, replies::RESTART_HINT).await?;
                Ok(replies::REQUEST_ACCEPTED.to_string())
            }
            Err(e) => {
                error!(user_id = message.user.id, record_id = %record_id, error = %e, "Failed to route request");
                self.bot.reply_to(message, replies::REQUEST_FAILED).await?;
                Ok(replies::REQUEST_FAILED.to_string())
            }
        }
    }
}

#[async_trait]
impl Handler for ConversationHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let input = self.parser.classify(&message.content).await;
        let key = SessionKey {
            chat_id: message.chat.id,
            user_id: message.user.id,
        };
        let reply = match self.flow.advance(key, &input).await {
            FlowAction::Greet => {
                self.bot.reply_html(message, &self.greeting_html).await?;
                self.bot.reply_to(message, replies::INSTRUCTIONS).await?;
                self.greeting_html.clone()
            }
            FlowAction::Submit(text) => self.submit(message, text).await?,
            FlowAction::Ended => {
                self.bot.reply_to(message, replies::RESTART_HINT).await?;
                replies::RESTART_HINT.to_string()
            }
            FlowAction::Ignore => return Ok(HandlerResponse::Ignore),
        };
        Ok(HandlerResponse::Reply(reply))
    }
}
