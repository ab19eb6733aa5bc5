//! RelayConfig: BaseConfig + WorkingHours + reply overrides. Use load() for env-based loading.

use anyhow::Result;
use relay_core::AvailabilityPolicy;
use std::env;
use std::path::Path;
use std::time::Duration;

use super::{BaseConfig, WorkingHours};
use crate::replies;

pub struct RelayConfig {
    pub base: BaseConfig,
    pub hours: WorkingHours,
    /// GREETING_HTML
    pub greeting_html: Option<String>,
}

impl RelayConfig {
    /// Load full config from environment variables and files. If `token` is provided it
    /// overrides BOT_TOKEN and TOKEN_FILE. Call validate() after load to fail fast.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let hours = WorkingHours::from_env()?;
        let greeting_html = env::var("GREETING_HTML")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            base,
            hours,
            greeting_html,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn allowed_ids_file(&self) -> &Path {
        &self.base.allowed_ids_file
    }
    pub fn log_file(&self) -> &Path {
        &self.base.log_file
    }
    pub fn policy(&self) -> &AvailabilityPolicy {
        &self.hours.policy
    }
    pub fn drain_grace(&self) -> Duration {
        self.hours.drain_grace
    }
    pub fn greeting_html(&self) -> &str {
        self.greeting_html
            .as_deref()
            .unwrap_or(replies::DEFAULT_GREETING_HTML)
    }
}
