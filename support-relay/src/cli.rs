//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use relay_core::RelayError;

use crate::config::RelayConfig;

/// Exit code for startup failures caused by missing or malformed configuration.
pub const CONFIG_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(name = "support-relay")]
#[command(about = "Telegram customer-support relay", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay (config from env; token overrides BOT_TOKEN and TOKEN_FILE).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Load and validate configuration and the staff allow-list, then exit.
    Check {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load RelayConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<RelayConfig> {
    RelayConfig::load(token)
}

/// Exit code when `err` is a fatal configuration error; `None` for everything else.
pub fn fatal_exit_code(err: &anyhow::Error) -> Option<i32> {
    err.downcast_ref::<RelayError>()
        .filter(|e| e.is_fatal())
        .map(|_| CONFIG_EXIT_CODE)
}
