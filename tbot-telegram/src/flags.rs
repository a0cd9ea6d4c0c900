//! Lifecycle flag set for the polling engine.
//!
//! Three named booleans gate loop behavior: `IsRunning` (keep iterating), `CanFetch`
//! (no fetch in flight, interval mode only), `WaitEvents` (await handler completions
//! before finishing a cycle). Owned by the engine; handlers never see them.

use std::sync::atomic::{AtomicBool, Ordering};

/// Named lifecycle flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    IsRunning,
    CanFetch,
    WaitEvents,
}

/// Flag storage with set/unset/check transitions. Starts stopped and idle.
#[derive(Debug)]
pub struct Flags {
    is_running: AtomicBool,
    can_fetch: AtomicBool,
    wait_events: AtomicBool,
}

impl Flags {
    pub fn new() -> Self {
        Self {
            is_running: AtomicBool::new(false),
            can_fetch: AtomicBool::new(true),
            wait_events: AtomicBool::new(false),
        }
    }

    fn cell(&self, flag: Flag) -> &AtomicBool {
        match flag {
            Flag::IsRunning => &self.is_running,
            Flag::CanFetch => &self.can_fetch,
            Flag::WaitEvents => &self.wait_events,
        }
    }

    pub fn has(&self, flag: Flag) -> bool {
        self.cell(flag).load(Ordering::SeqCst)
    }

    pub fn set(&self, flag: Flag) {
        self.cell(flag).store(true, Ordering::SeqCst);
    }

    pub fn unset(&self, flag: Flag) {
        self.cell(flag).store(false, Ordering::SeqCst);
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let flags = Flags::new();
        assert!(!flags.has(Flag::IsRunning));
        assert!(flags.has(Flag::CanFetch));
        assert!(!flags.has(Flag::WaitEvents));
    }

    #[test]
    fn test_set_unset_roundtrip() {
        let flags = Flags::new();
        flags.set(Flag::IsRunning);
        assert!(flags.has(Flag::IsRunning));
        flags.unset(Flag::IsRunning);
        assert!(!flags.has(Flag::IsRunning));

        flags.unset(Flag::CanFetch);
        assert!(!flags.has(Flag::CanFetch));
        flags.set(Flag::CanFetch);
        assert!(flags.has(Flag::CanFetch));
    }
}
