//! Bot facade: wires config, transport, registry, router, and polling engine together.

use std::sync::Arc;

use tracing::info;

use tbot_core::Result;

use crate::client::{TelegramApi, UpdateSource};
use crate::config::BotConfig;
use crate::polling::PollingEngine;
use crate::registry::{EventProcessor, EventRegistry, TextMatcher};
use crate::router::UpdateRouter;

/// Long-polling Telegram bot client. Register processors with [`on`](Self::on) and
/// [`on_text`](Self::on_text), then [`start`](Self::start); outbound Bot API methods
/// live in the `api` module's impl block.
pub struct TeleBot {
    pub(crate) api: Arc<TelegramApi>,
    registry: Arc<EventRegistry>,
    engine: Arc<PollingEngine>,
    bot_id: String,
}

impl TeleBot {
    /// Builds a bot from config. Fails with a config error on an invalid token; no
    /// partial instance is constructed.
    pub fn new(config: BotConfig) -> Result<Self> {
        config.validate()?;
        let bot_id = config.bot_id();

        let api = Arc::new(TelegramApi::new(&config.token, config.api_url.as_deref()));
        let registry = Arc::new(EventRegistry::new());
        let router = Arc::new(UpdateRouter::new(Arc::clone(&registry)));
        let source: Arc<dyn UpdateSource> = api.clone();
        let engine = Arc::new(PollingEngine::new(source, router, &config.polling));

        info!(bot_id = %bot_id, "bot created");
        Ok(Self {
            api,
            registry,
            engine,
            bot_id,
        })
    }

    /// Numeric bot id derived from the token prefix.
    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    /// Registers a processor for a named event ("text", "photo", "document").
    pub fn on(&self, event: &str, processor: Arc<dyn EventProcessor>) {
        self.registry.on(event, processor);
    }

    /// Registers a processor for messages whose text matches the given matcher.
    pub fn on_text(&self, matcher: Arc<TextMatcher>, processor: Arc<dyn EventProcessor>) {
        self.registry.on_text(matcher, processor);
    }

    /// Runs the polling loop until [`stop`](Self::stop) is called.
    pub async fn start(&self) {
        Arc::clone(&self.engine).start().await;
    }

    /// Stops polling cooperatively and flushes the remote side's pending state.
    pub async fn stop(&self) {
        self.engine.stop().await;
    }

    /// Current update offset cursor.
    pub fn offset(&self) -> i64 {
        self.engine.offset()
    }
}
