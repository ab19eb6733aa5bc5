//! Handlers in chain order: logging, staff commands, customer conversation.

mod conversation;
mod logging;
mod staff;

pub use conversation::ConversationHandler;
pub use logging::LoggingHandler;
pub use staff::StaffCommandHandler;
