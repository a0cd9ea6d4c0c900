//! Polling engine: owns the offset cursor and lifecycle flags, drives the fetch loop,
//! and hands fetched updates to the router.
//!
//! Two loop styles: immediate mode (interval 0) is a plain sequential
//! fetch-process-repeat loop; interval mode ticks on a timer and skips ticks while a
//! fetch cycle is in flight (the `CanFetch` guard), so at most one fetch is ever in
//! flight. Fetch failures are logged and swallowed; only `stop()` ends the loop.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use tbot_core::Update;

use crate::client::UpdateSource;
use crate::config::PollingConfig;
use crate::flags::{Flag, Flags};
use crate::router::UpdateRouter;

pub struct PollingEngine {
    source: Arc<dyn UpdateSource>,
    router: Arc<UpdateRouter>,
    flags: Flags,
    offset: AtomicI64,
    interval_ms: u64,
    limit: u32,
    timeout: u32,
}

impl PollingEngine {
    pub fn new(
        source: Arc<dyn UpdateSource>,
        router: Arc<UpdateRouter>,
        polling: &PollingConfig,
    ) -> Self {
        let flags = Flags::new();
        if polling.wait_events {
            flags.set(Flag::WaitEvents);
        }
        Self {
            source,
            router,
            flags,
            offset: AtomicI64::new(0),
            interval_ms: polling.interval_ms,
            limit: polling.limit,
            timeout: polling.timeout,
        }
    }

    /// Current offset cursor: one past the largest update id processed so far.
    pub fn offset(&self) -> i64 {
        self.offset.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.flags.has(Flag::IsRunning)
    }

    /// Runs the polling loop until [`stop`](Self::stop) is called.
    pub async fn start(self: Arc<Self>) {
        self.flags.set(Flag::IsRunning);
        info!(
            interval_ms = self.interval_ms,
            limit = self.limit,
            timeout = self.timeout,
            "polling started"
        );
        if self.interval_ms > 0 {
            self.run_interval().await;
        } else {
            self.run_immediate().await;
        }
    }

    /// Immediate mode: strictly sequential, each iteration starts only after the
    /// previous cycle fully completed.
    async fn run_immediate(&self) {
        while self.flags.has(Flag::IsRunning) {
            self.fetch_cycle().await;
        }
    }

    /// Interval mode: a tick starts a cycle only when none is in flight; the cycle
    /// runs as its own task and restores `CanFetch` when it settles, irrespective of
    /// outcome.
    async fn run_interval(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(Duration::from_millis(self.interval_ms));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if !self.flags.has(Flag::IsRunning) {
                break;
            }
            if !self.flags.has(Flag::CanFetch) {
                continue;
            }
            self.flags.unset(Flag::CanFetch);
            let engine = Arc::clone(&self);
            tokio::spawn(async move {
                engine.fetch_cycle().await;
                engine.flags.set(Flag::CanFetch);
            });
        }
    }

    /// One fetch-and-process cycle. Fetch failures are never fatal: they are logged
    /// and the cycle completes as a no-op with the offset untouched.
    async fn fetch_cycle(&self) {
        let offset = self.offset.load(Ordering::SeqCst);
        match self.source.fetch_batch(offset, self.limit, self.timeout).await {
            Ok(updates) => self.process_batch(updates).await,
            Err(e) => {
                warn!(error = %e, offset, "update fetch failed; retrying on next cycle");
            }
        }
    }

    /// Routes every update in source order and advances the offset past the largest
    /// update id seen. With `WaitEvents` set the cycle awaits all dispatch
    /// completions; otherwise dispatches run detached.
    async fn process_batch(&self, updates: Vec<Update>) {
        if updates.is_empty() {
            return;
        }
        debug!(count = updates.len(), "processing update batch");

        let wait_events = self.flags.has(Flag::WaitEvents);
        let mut pending = Vec::new();
        for update in updates {
            let next_update_id = update.update_id + 1;
            if self.offset.load(Ordering::SeqCst) < next_update_id {
                self.offset.store(next_update_id, Ordering::SeqCst);
            }

            let router = Arc::clone(&self.router);
            if wait_events {
                pending.push(async move { router.route(&update).await });
            } else {
                tokio::spawn(async move {
                    if let Err(e) = router.route(&update).await {
                        warn!(
                            error = %e,
                            update_id = update.update_id,
                            "handler dispatch failed"
                        );
                    }
                });
            }
        }

        if !pending.is_empty() {
            let results = futures::future::join_all(pending).await;
            if let Some(e) = results.into_iter().filter_map(|r| r.err()).next() {
                // Handler failures never abort the loop; the cycle just completes.
                warn!(error = %e, "handler dispatch failed for batch");
            }
        }
    }

    /// Cooperative stop: unsets `IsRunning` (both loop styles terminate at their next
    /// check) and issues one final `limit=1, timeout=0` fetch to flush the remote
    /// side's pending state. The flush outcome is not inspected.
    pub async fn stop(&self) {
        self.flags.unset(Flag::IsRunning);
        let offset = self.offset.load(Ordering::SeqCst);
        if let Err(e) = self.source.fetch_batch(offset, 1, 0).await {
            debug!(error = %e, "stop flush fetch failed");
        }
        info!(offset, "polling stopped");
    }
}
