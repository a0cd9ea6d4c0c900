//! Update router: classifies an inbound update by payload shape and forwards it to the
//! registry.
//!
//! Classification is single-match-and-stop over a fixed priority list of message types.
//! A text message is additionally tested against every registered text matcher before
//! the generic `"text"` dispatch fires.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::debug;

use tbot_core::{Message, Result, Update};

use crate::registry::EventRegistry;

/// Known message types, in classification priority order. The first field present on
/// the message wins; this is not multi-label classification.
const MESSAGE_TYPES: &[&str] = &["text", "photo", "document"];

/// Primary type of a message: the first entry of [`MESSAGE_TYPES`] whose field is set.
fn message_kind(message: &Message) -> Option<&'static str> {
    MESSAGE_TYPES.iter().copied().find(|kind| match *kind {
        "text" => message.text.is_some(),
        "photo" => message.photo.is_some(),
        "document" => message.document.is_some(),
        _ => false,
    })
}

/// Routes one update to the registry's handlers.
pub struct UpdateRouter {
    registry: Arc<EventRegistry>,
}

impl UpdateRouter {
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self { registry }
    }

    /// Classifies `update` and fans it out. Resolves when every triggered dispatch has
    /// settled; the first handler failure is reported. An update with no message or no
    /// known type is a no-op.
    pub async fn route(&self, update: &Update) -> Result<()> {
        let Some(message) = &update.message else {
            return Ok(());
        };
        let Some(kind) = message_kind(message) else {
            debug!(update_id = update.update_id, "no known message type, skipping");
            return Ok(());
        };

        // Text messages are additionally matched against every registered text entry.
        let matchers = if kind == "text" {
            self.registry.text_matchers()
        } else {
            Vec::new()
        };
        let text = message.text.as_deref().unwrap_or("");
        let kinds = [kind];

        let mut dispatches: Vec<BoxFuture<'_, Result<()>>> = Vec::new();
        for matcher in &matchers {
            if matcher.is_match(text) {
                dispatches.push(self.registry.dispatch_text(matcher, update).boxed());
            }
        }
        dispatches.push(self.registry.dispatch(&kinds, update).boxed());

        debug!(
            update_id = update.update_id,
            kind, dispatch_count = dispatches.len(),
            "routing update"
        );
        let results = futures::future::join_all(dispatches).await;
        results.into_iter().collect::<Result<Vec<()>>>().map(|_| ())
    }
}
