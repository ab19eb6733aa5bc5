//! Error types for the relay core.
//!
//! [`RelayError`] covers configuration, authorization, routing and transport failures.
//! Only the configuration variants are fatal; everything else is recovered where it happens.

use thiserror::Error;

/// Top-level error for the relay (configuration, staff authorization, routing, transport, IO).
#[derive(Error, Debug)]
pub enum RelayError {
    /// A required resource (allow-list file, bot token) is absent.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// A configuration resource exists but cannot be parsed.
    #[error("Configuration malformed: {0}")]
    ConfigurationMalformed(String),

    /// Staff command from an id that is not in the allow-list.
    #[error("User {0} is not in the staff allow-list")]
    Unauthorized(i64),

    /// Drain requested while no staff session is active.
    #[error("No active staff sessions to deliver to")]
    NoActiveRecipients,

    /// Transport failure while sending a message.
    #[error("Bot error: {0}")]
    Bot(String),

    /// The router task has stopped and no longer accepts commands.
    #[error("Router is not running")]
    RouterUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    /// True for errors that must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RelayError::ConfigurationMissing(_) | RelayError::ConfigurationMalformed(_)
        )
    }
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
