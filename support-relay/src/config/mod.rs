//! Relay configuration: BaseConfig (Telegram, credentials, allow-list, logging) + WorkingHours
//! (availability window and drain schedule). Loaded from env and files at startup, read-only after.

mod base;
mod hours;
mod relay_config;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use hours::WorkingHours;
pub use relay_config::RelayConfig;
