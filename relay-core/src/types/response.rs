//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries what was sent back so `after()` can log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing was sent.
    Stop,
    /// This handler does not apply to the message; try next.
    Ignore,
    /// Stop the chain; the handler replied with this text.
    Reply(String),
}
