//! # tbot-core
//!
//! Core types for the tbot Telegram client: update/message payload shapes, the Bot API
//! response envelope, the [`BotError`] taxonomy, and tracing initialization.
//! Transport-agnostic; used by tbot-telegram and the CLI.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{
    ApiResponse, Chat, ChatAction, Contact, Document, FileInfo, Location, Message, ParseMode,
    PhotoSize, Update, User, UserProfilePhotos,
};
