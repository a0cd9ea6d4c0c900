//! # tbot-telegram
//!
//! Long-polling Telegram bot client: event registry, update router, polling engine,
//! flag state, reqwest transport, and outbound Bot API methods. Types and errors live
//! in tbot-core.

pub mod api;
pub mod bot;
pub mod client;
pub mod config;
pub mod flags;
pub mod polling;
pub mod registry;
pub mod router;

pub use api::{
    GetUserProfilePhotosOptions, SendContactOptions, SendLocationOptions, SendMessageOptions,
    SendVenueOptions,
};
pub use bot::TeleBot;
pub use client::{TelegramApi, UpdateSource};
pub use config::{BotConfig, PollingConfig};
pub use flags::{Flag, Flags};
pub use polling::PollingEngine;
pub use registry::{EventProcessor, EventRegistry, TextMatcher};
pub use router::UpdateRouter;
