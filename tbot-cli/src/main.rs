//! tbot CLI: run a long-polling echo bot. Config from env (.env supported); the token
//! and poll interval can be overridden with CLI args.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tracing::{error, info};

use tbot_core::{init_tracing, Update};
use tbot_telegram::{BotConfig, EventProcessor, TeleBot};

#[derive(Parser)]
#[command(name = "tbot")]
#[command(about = "Long-polling Telegram echo bot", long_about = None)]
#[command(version)]
struct Cli {
    /// Bot token (overrides BOT_TOKEN).
    #[arg(short, long)]
    token: Option<String>,

    /// Poll interval in milliseconds; 0 = immediate mode (overrides POLL_INTERVAL_MS).
    #[arg(short, long)]
    interval: Option<u64>,
}

/// Echoes the text of every incoming text message back to its chat.
struct EchoProcessor {
    bot: Arc<TeleBot>,
}

#[async_trait]
impl EventProcessor for EchoProcessor {
    async fn process(&self, update: &Update) -> tbot_core::Result<()> {
        let Some(message) = &update.message else {
            return Ok(());
        };
        let Some(text) = &message.text else {
            return Ok(());
        };
        info!(chat_id = message.chat.id, "echoing message");
        self.bot.send_message(message.chat.id, text, None).await?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match cli.token {
        Some(token) => BotConfig::with_token(token),
        None => BotConfig::from_env().context("loading bot config from env")?,
    };
    if let Some(interval) = cli.interval {
        config.polling.interval_ms = interval;
    }

    init_tracing(config.log_file.as_deref())?;

    let bot = Arc::new(TeleBot::new(config)?);
    bot.on("text", Arc::new(EchoProcessor { bot: Arc::clone(&bot) }));

    let me = bot.get_me().await;
    match me {
        Ok(user) => info!(username = ?user.username, "bot authenticated"),
        Err(e) => error!(error = %e, "getMe failed; starting anyway"),
    }

    let stopper = Arc::clone(&bot);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, stopping");
            stopper.stop().await;
        }
    });

    bot.start().await;
    Ok(())
}
