//! # Support relay
//!
//! Telegram front end for the relay core: customers open a conversation with `/start` and send one
//! request; staff toggle themselves with `/admin_start` / `/admin_stop`. Requests go live to active
//! staff during working hours and are queued otherwise; the queue drains on staff activation and
//! every morning at the start of business.

pub mod chain;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod conversation;
pub mod handlers;
pub mod replies;
pub mod runner;
pub mod scheduler;
pub mod telegram;

pub use cli::{fatal_exit_code, load_config, Cli, Commands, CONFIG_EXIT_CODE};
pub use chain::HandlerChain;
pub use components::{build_components, RelayComponents};
pub use config::{BaseConfig, RelayConfig, WorkingHours};
pub use runner::run_relay;
pub use scheduler::{DailyDrain, TickOutcome};
pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};
