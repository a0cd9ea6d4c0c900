//! Event registry: handlers keyed by event name or by text matcher, with fan-out dispatch.
//!
//! Two explicit stores back the registry: a name→processor-list map for `on`, and an
//! ordered list of matcher-keyed entries for `on_text`. Processor identity is
//! `Arc::ptr_eq`; matcher entries are keyed by the `Arc<TextMatcher>` instance itself,
//! so equal-but-distinct matchers yield distinct entries.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use tbot_core::{Result, Update};

/// A registered event processor. Invoked with the full update for every matching dispatch.
#[async_trait]
pub trait EventProcessor: Send + Sync {
    async fn process(&self, update: &Update) -> Result<()>;
}

/// Text matcher key for `on_text`: a literal (substring containment) or a regex.
#[derive(Debug, Clone)]
pub enum TextMatcher {
    Literal(String),
    Pattern(Regex),
}

impl TextMatcher {
    /// Compiles a regex matcher. Literal matchers never fail.
    pub fn pattern(re: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(re)?))
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Literal(needle) => text.contains(needle.as_str()),
            Self::Pattern(re) => re.is_match(text),
        }
    }
}

struct TextEntry {
    matcher: Arc<TextMatcher>,
    processors: Vec<Arc<dyn EventProcessor>>,
}

/// Handler storage and fan-out dispatch. Registration is cheap and lock-based; dispatch
/// clones the processor list out of the lock before awaiting anything.
pub struct EventRegistry {
    events: RwLock<HashMap<String, Vec<Arc<dyn EventProcessor>>>>,
    text_events: RwLock<Vec<TextEntry>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
            text_events: RwLock::new(Vec::new()),
        }
    }

    /// Registers `processor` under `event`. A processor already present for the key
    /// (same Arc) is silently ignored.
    pub fn on(&self, event: &str, processor: Arc<dyn EventProcessor>) {
        let mut events = self.events.write().unwrap_or_else(|e| e.into_inner());
        let entry = events.entry(event.to_string()).or_default();
        if !entry.iter().any(|p| Arc::ptr_eq(p, &processor)) {
            entry.push(processor);
        }
    }

    /// Registers `processor` under the given matcher key. Re-registering the *same*
    /// matcher instance replaces its entry; an equal but distinct instance gets a
    /// fresh entry of its own.
    pub fn on_text(&self, matcher: Arc<TextMatcher>, processor: Arc<dyn EventProcessor>) {
        let mut text_events = self.text_events.write().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = text_events
            .iter_mut()
            .find(|entry| Arc::ptr_eq(&entry.matcher, &matcher))
        {
            entry.processors = vec![processor];
        } else {
            text_events.push(TextEntry {
                matcher,
                processors: vec![processor],
            });
        }
    }

    /// Snapshot of the registered matcher keys, in registration order.
    pub fn text_matchers(&self) -> Vec<Arc<TextMatcher>> {
        self.text_events
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|entry| Arc::clone(&entry.matcher))
            .collect()
    }

    /// Fans `update` out to every processor registered under each named key. Keys with
    /// no entry contribute nothing. All processors run; the first failure is reported.
    pub async fn dispatch(&self, events: &[&str], update: &Update) -> Result<()> {
        let processors: Vec<Arc<dyn EventProcessor>> = {
            let map = self.events.read().unwrap_or_else(|e| e.into_inner());
            events
                .iter()
                .filter_map(|name| map.get(*name))
                .flat_map(|list| list.iter().cloned())
                .collect()
        };
        Self::run_all(processors, update).await
    }

    /// Same fan-out, restricted to the entry keyed by this exact matcher instance.
    pub async fn dispatch_text(&self, matcher: &Arc<TextMatcher>, update: &Update) -> Result<()> {
        let processors: Vec<Arc<dyn EventProcessor>> = {
            let text_events = self.text_events.read().unwrap_or_else(|e| e.into_inner());
            text_events
                .iter()
                .find(|entry| Arc::ptr_eq(&entry.matcher, matcher))
                .map(|entry| entry.processors.clone())
                .unwrap_or_default()
        };
        Self::run_all(processors, update).await
    }

    /// Runs all processors to completion and reports the first error, if any.
    async fn run_all(processors: Vec<Arc<dyn EventProcessor>>, update: &Update) -> Result<()> {
        if processors.is_empty() {
            return Ok(());
        }
        debug!(
            update_id = update.update_id,
            count = processors.len(),
            "dispatching to processors"
        );
        let results =
            futures::future::join_all(processors.iter().map(|p| p.process(update))).await;
        results.into_iter().collect::<Result<Vec<()>>>().map(|_| ())
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}
