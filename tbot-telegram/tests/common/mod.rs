//! Shared test utilities for tbot-telegram integration tests.
//!
//! Provides update builders and small EventProcessor implementations (counting,
//! failing, slow) used by the registry, router, and polling test files.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use tbot_core::{BotError, Chat, Document, Message, PhotoSize, Result, Update};
use tbot_telegram::EventProcessor;

fn base_message(message_id: i64) -> Message {
    Message {
        message_id,
        from: None,
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
            title: None,
            username: None,
        },
        date: Utc::now(),
        text: None,
        photo: None,
        document: None,
        caption: None,
    }
}

/// Update carrying a text message.
pub fn text_update(update_id: i64, text: &str) -> Update {
    let mut message = base_message(update_id);
    message.text = Some(text.to_string());
    Update {
        update_id,
        message: Some(message),
    }
}

/// Update carrying a photo message (no text).
#[allow(dead_code)]
pub fn photo_update(update_id: i64) -> Update {
    let mut message = base_message(update_id);
    message.photo = Some(vec![PhotoSize {
        file_id: "photo-1".to_string(),
        width: 90,
        height: 90,
        file_size: Some(1024),
    }]);
    Update {
        update_id,
        message: Some(message),
    }
}

/// Update carrying a document message (no text).
#[allow(dead_code)]
pub fn document_update(update_id: i64) -> Update {
    let mut message = base_message(update_id);
    message.document = Some(Document {
        file_id: "doc-1".to_string(),
        file_name: Some("notes.txt".to_string()),
        mime_type: Some("text/plain".to_string()),
        file_size: Some(64),
    });
    Update {
        update_id,
        message: Some(message),
    }
}

/// Update whose message carries none of the known type fields.
#[allow(dead_code)]
pub fn untyped_update(update_id: i64) -> Update {
    Update {
        update_id,
        message: Some(base_message(update_id)),
    }
}

/// Processor that increments a shared counter on every invocation.
#[allow(dead_code)]
pub struct CountingProcessor {
    count: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingProcessor {
    pub fn new(count: Arc<AtomicUsize>) -> Self {
        Self { count }
    }
}

#[async_trait]
impl EventProcessor for CountingProcessor {
    async fn process(&self, _update: &Update) -> Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Processor that always fails, after incrementing its counter.
#[allow(dead_code)]
pub struct FailingProcessor {
    count: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FailingProcessor {
    pub fn new(count: Arc<AtomicUsize>) -> Self {
        Self { count }
    }
}

#[async_trait]
impl EventProcessor for FailingProcessor {
    async fn process(&self, _update: &Update) -> Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Err(BotError::Handler("processor failed".to_string()))
    }
}

/// Processor that sleeps for a fixed delay before incrementing its counter.
#[allow(dead_code)]
pub struct SlowProcessor {
    delay: Duration,
    count: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl SlowProcessor {
    pub fn new(delay: Duration, count: Arc<AtomicUsize>) -> Self {
        Self { delay, count }
    }
}

#[async_trait]
impl EventProcessor for SlowProcessor {
    async fn process(&self, _update: &Update) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
