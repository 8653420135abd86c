//! # Scroll Debounce
//!
//! Scroll events arrive far faster than they are worth persisting. Writes
//! are debounced per tab id: each event schedules a timer, and a newer event
//! for the same tab cancels and reschedules it, so only the last offset
//! within the quiet window reaches the store. This cancel-and-reschedule is
//! the engine's single cancellation pattern. Timers for different tabs
//! never affect each other.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::task::AbortHandle;

use super::StateStore;

/// Scroll inactivity required before the offset is committed.
pub const QUIET_WINDOW: Duration = Duration::from_secs(1);

struct Pending {
    offset: f64,
    handle: AbortHandle,
}

pub struct ScrollDebouncer {
    store: Arc<dyn StateStore>,
    quiet: Duration,
    pending: HashMap<String, Pending>,
}

impl ScrollDebouncer {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self::with_quiet_window(store, QUIET_WINDOW)
    }

    pub fn with_quiet_window(store: Arc<dyn StateStore>, quiet: Duration) -> Self {
        ScrollDebouncer {
            store,
            quiet,
            pending: HashMap::new(),
        }
    }

    /// Schedule a persisted write of `offset` for `tab_id`, superseding any
    /// write still pending for the same tab.
    pub fn record(&mut self, tab_id: &str, offset: f64) {
        if let Some(previous) = self.pending.remove(tab_id) {
            previous.handle.abort();
        }
        let store = Arc::clone(&self.store);
        let id = tab_id.to_string();
        let quiet = self.quiet;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            store.set_scroll_position(&id, offset);
        })
        .abort_handle();
        self.pending.insert(tab_id.to_string(), Pending { offset, handle });
    }

    /// Drop any pending write for `tab_id` without committing it (the tab
    /// closed; its offset is being pruned anyway).
    pub fn cancel(&mut self, tab_id: &str) {
        if let Some(previous) = self.pending.remove(tab_id) {
            previous.handle.abort();
            debug!("Cancelled pending scroll write for {}", tab_id);
        }
    }

    /// Commit every pending offset immediately. Shutdown path: the quiet
    /// window no longer matters once the session is ending.
    pub fn flush(&mut self) {
        for (tab_id, pending) in self.pending.drain() {
            pending.handle.abort();
            self.store.set_scroll_position(&tab_id, pending.offset);
        }
    }
}
