//! Telegram Bot API transport: reqwest client, response envelope handling, and the
//! [`UpdateSource`] seam the polling engine fetches through.
//!
//! API Reference: https://core.telegram.org/bots/api

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use tbot_core::{ApiResponse, BotError, Result, Update};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// The polling engine's sole inbound data source. Must be idempotent for the same
/// offset: repeated calls before the offset advances may return overlapping results.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    async fn fetch_batch(&self, offset: i64, limit: u32, timeout: u32) -> Result<Vec<Update>>;
}

/// HTTP client for the Bot API. `api_url` overrides the default base (self-hosted
/// Bot API servers, tests).
pub struct TelegramApi {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramApi {
    pub fn new(token: &str, api_url: Option<&str>) -> Self {
        let root = api_url.unwrap_or(TELEGRAM_API_BASE).trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/bot{}", root, token),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Calls a Bot API method with a JSON payload and unwraps the response envelope.
    /// Network failures map to [`BotError::Transport`]; `ok=false` and malformed
    /// envelopes map to [`BotError::Api`].
    pub async fn call_method<T: DeserializeOwned>(&self, method: &str, payload: Value) -> Result<T> {
        debug!(method, "calling Bot API method");
        let response = self
            .client
            .post(self.method_url(method))
            .json(&payload)
            .send()
            .await
            .map_err(|e| BotError::Transport(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::Api(format!("malformed response from {}: {}", method, e)))?;

        if !status.is_success() || !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(BotError::Api(format!(
                "{} failed ({}): {}",
                method, status, description
            )));
        }

        envelope
            .result
            .ok_or_else(|| BotError::Api(format!("{}: ok response without result", method)))
    }
}

#[async_trait]
impl UpdateSource for TelegramApi {
    async fn fetch_batch(&self, offset: i64, limit: u32, timeout: u32) -> Result<Vec<Update>> {
        self.call_method(
            "getUpdates",
            json!({ "offset": offset, "limit": limit, "timeout": timeout }),
        )
        .await
    }
}
