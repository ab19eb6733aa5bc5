use anyhow::Result;
use relay_core::{init_tracing, AllowList, Bot, SystemClock};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::components::build_components;
use crate::config::RelayConfig;
use crate::scheduler::DailyDrain;
use crate::telegram::{build_teloxide_bot, run_repl, TelegramBotAdapter};

/// Main entry: validate config, init logging, load the allow-list, start router and daily drain,
/// then run the REPL until shutdown.
#[instrument(skip(config))]
pub async fn run_relay(config: RelayConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let allow_list = Arc::new(AllowList::from_file(config.allowed_ids_file())?);
    let teloxide_bot = build_teloxide_bot(config.bot_token(), config.telegram_api_url())?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let clock = Arc::new(SystemClock);

    info!(
        allowed_ids_file = %config.allowed_ids_file().display(),
        staff_ids = allow_list.len(),
        working_hours = %config.policy(),
        "Initializing relay"
    );

    let components = build_components(
        allow_list,
        config.policy().clone(),
        clock.clone(),
        bot,
        config.greeting_html(),
    );
    DailyDrain::new(
        components.router.clone(),
        config.policy().clone(),
        clock,
        config.drain_grace(),
    )
    .spawn();

    info!("Relay started successfully");
    run_repl(teloxide_bot, components.handler_chain, components.bot_username).await?;

    let stats = components.router.stats().await?;
    info!(
        pending = stats.pending,
        active_staff = stats.active_staff,
        "Relay stopped; pending requests are not persisted"
    );
    Ok(())
}
