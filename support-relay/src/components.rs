//! Component factory: wires router, conversation flow and handler chain around a [`Bot`].
//! Kept apart from the runner so tests can assemble the relay with a recording bot.

use std::sync::Arc;

use relay_core::{AllowList, AvailabilityPolicy, Bot, Clock, Router, RouterHandle};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::chain::HandlerChain;
use crate::commands::CommandParser;
use crate::conversation::ConversationFlow;
use crate::handlers::{ConversationHandler, LoggingHandler, StaffCommandHandler};

/// Everything the transport loop and the scheduler need.
#[derive(Clone)]
pub struct RelayComponents {
    pub router: RouterHandle,
    pub conversations: Arc<ConversationFlow>,
    pub handler_chain: HandlerChain,
    /// Filled by the runner from get_me.
    pub bot_username: Arc<RwLock<Option<String>>>,
}

/// Spawns the router task and builds the handler chain. Must run inside a tokio runtime.
#[instrument(skip_all, fields(staff_ids = allow_list.len(), policy = %policy))]
pub fn build_components(
    allow_list: Arc<AllowList>,
    policy: AvailabilityPolicy,
    clock: Arc<dyn Clock>,
    bot: Arc<dyn Bot>,
    greeting_html: &str,
) -> RelayComponents {
    let router = Router::new(allow_list, policy.clone(), clock.clone(), bot.clone()).spawn();
    let bot_username = Arc::new(RwLock::new(None));
    let parser = CommandParser::new(bot_username.clone());
    let conversations = Arc::new(ConversationFlow::new());

    let handler_chain = HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(StaffCommandHandler::new(
            router.clone(),
            bot.clone(),
            parser.clone(),
        )))
        .add_handler(Arc::new(ConversationHandler::new(
            conversations.clone(),
            router.clone(),
            bot,
            parser,
            policy,
            clock,
            greeting_html.to_string(),
        )));

    info!(handlers = handler_chain.len(), "Relay components built");
    RelayComponents {
        router,
        conversations,
        handler_chain,
        bot_username,
    }
}
