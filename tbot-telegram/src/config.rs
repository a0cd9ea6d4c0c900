//! Bot configuration: token, optional API base URL and log file, polling knobs.
//! Loaded from env: BOT_TOKEN required; TELEGRAM_API_URL, LOG_FILE, POLL_INTERVAL_MS,
//! POLL_LIMIT, POLL_TIMEOUT, POLL_WAIT_EVENTS optional.

use anyhow::{Context, Result};
use std::env;

use tbot_core::BotError;

/// Polling loop knobs. `interval_ms == 0` selects immediate mode (fetch-process-repeat
/// with no timer); a positive value selects the timer-driven loop.
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Tick interval in milliseconds; 0 = immediate mode.
    pub interval_ms: u64,
    /// Max updates per fetch.
    pub limit: u32,
    /// Long-poll timeout in seconds; 0 = non-blocking return.
    pub timeout: u32,
    /// Await handler completions before finishing a cycle.
    pub wait_events: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 0,
            limit: 100,
            timeout: 0,
            wait_events: false,
        }
    }
}

/// Bot client config (connectivity, logging, polling).
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub api_url: Option<String>,
    pub log_file: Option<String>,
    pub polling: PollingConfig,
}

impl BotConfig {
    /// Builds config with the given token; everything else default.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: None,
            log_file: None,
            polling: PollingConfig::default(),
        }
    }

    /// Loads from env: BOT_TOKEN required; the rest optional with defaults.
    pub fn from_env() -> Result<Self> {
        let token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let api_url = env::var("TELEGRAM_API_URL").ok();
        let log_file = env::var("LOG_FILE").ok();

        let mut polling = PollingConfig::default();
        if let Ok(raw) = env::var("POLL_INTERVAL_MS") {
            polling.interval_ms = raw
                .parse()
                .context("POLL_INTERVAL_MS must be a non-negative integer")?;
        }
        if let Ok(raw) = env::var("POLL_LIMIT") {
            polling.limit = raw.parse().context("POLL_LIMIT must be a positive integer")?;
        }
        if let Ok(raw) = env::var("POLL_TIMEOUT") {
            polling.timeout = raw
                .parse()
                .context("POLL_TIMEOUT must be a non-negative integer")?;
        }
        if let Ok(raw) = env::var("POLL_WAIT_EVENTS") {
            polling.wait_events = matches!(raw.as_str(), "1" | "true" | "yes");
        }

        Ok(Self {
            token,
            api_url,
            log_file,
            polling,
        })
    }

    /// Checks the token shape: non-empty, with the `<bot_id>:<secret>` separator.
    /// Construction must fail on violation; no partial instance is usable.
    pub fn validate(&self) -> std::result::Result<(), BotError> {
        if self.token.is_empty() || !self.token.contains(':') {
            return Err(BotError::Config("Invalid bot token.".to_string()));
        }
        Ok(())
    }

    /// Numeric bot id prefix of the token. Call after `validate`.
    pub fn bot_id(&self) -> String {
        self.token
            .split(':')
            .next()
            .unwrap_or_default()
            .to_string()
    }
}
