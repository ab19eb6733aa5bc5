//! Base config: bot credentials, Telegram API endpoint, allow-list location, logging.

use anyhow::Result;
use relay_core::RelayError;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOKEN_FILE: &str = "token.txt";
pub const DEFAULT_ALLOWED_IDS_FILE: &str = "allowed_ids.txt";
pub const DEFAULT_LOG_FILE: &str = "logs/support-relay.log";

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// `--token`, else BOT_TOKEN, else first line of TOKEN_FILE
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// ALLOWED_IDS_FILE
    pub allowed_ids_file: PathBuf,
    /// LOG_FILE
    pub log_file: PathBuf,
}

impl BaseConfig {
    /// Load from environment variables and the token file. `token` overrides both if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token.or_else(|| env::var("BOT_TOKEN").ok()) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => {
                let path = env::var("TOKEN_FILE").unwrap_or_else(|_| DEFAULT_TOKEN_FILE.to_string());
                read_token_file(Path::new(&path))?
            }
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let allowed_ids_file = env::var("ALLOWED_IDS_FILE")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_IDS_FILE.to_string())
            .into();
        let log_file = env::var("LOG_FILE")
            .unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string())
            .into();

        Ok(Self {
            bot_token,
            telegram_api_url,
            allowed_ids_file,
            log_file,
        })
    }

    /// telegram_api_url must be a valid URL if set.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

/// Reads the token from the first line of `path`. Missing file or empty line is fatal.
pub fn read_token_file(path: &Path) -> Result<String, RelayError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RelayError::ConfigurationMissing(format!(
            "could not find token file at {}",
            path.display()
        )),
        _ => RelayError::Io(e),
    })?;
    let token = text.lines().next().unwrap_or_default().trim();
    if token.is_empty() {
        return Err(RelayError::ConfigurationMissing(format!(
            "token file {} is empty",
            path.display()
        )));
    }
    Ok(token.to_string())
}
