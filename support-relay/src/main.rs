//! Binary for the support relay.

use anyhow::Result;
use clap::Parser;
use relay_core::AllowList;
use support_relay::{fatal_exit_code, load_config, run_relay, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = dispatch(cli.command).await;
    if let Err(e) = &result {
        if let Some(code) = fatal_exit_code(e) {
            eprintln!("configuration error, not starting: {}", e);
            std::process::exit(code);
        }
    }
    result
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_relay(config).await
        }
        Commands::Check { token } => {
            let config = load_config(token)?;
            config.validate()?;
            let allow_list = AllowList::from_file(config.allowed_ids_file())?;
            println!(
                "configuration ok: {} staff ids, working hours {}",
                allow_list.len(),
                config.policy()
            );
            Ok(())
        }
    }
}
