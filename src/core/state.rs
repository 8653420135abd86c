//! # Session State
//!
//! The in-memory model of one reading session. This module contains domain
//! state only. No rendering, no persistence.
//!
//! ```text
//! Session
//! ├── tabs: Vec<Tab>             // display order; permanents always first
//! ├── active_tab_id: String      // always names a tab present in `tabs`
//! ├── scroll_positions: HashMap  // tab id → offset, pruned on close
//! ├── status_message: String     // status line text
//! └── tab_serial: u64            // collision guard for minted tab ids
//! ```
//!
//! State changes only happen through `update(session, corpus, action)` in
//! action.rs. This keeps things predictable, so no surprise mutations.

use std::collections::HashMap;

use chrono::Utc;

use crate::core::tabs::{NAVIGATION_TAB_ID, Tab};

pub struct Session {
    pub tabs: Vec<Tab>,
    pub active_tab_id: String,
    /// In-memory scroll offsets; the persisted copies are written through
    /// the debouncer, so this map is the authoritative live view.
    pub scroll_positions: HashMap<String, f64>,
    pub status_message: String,
    tab_serial: u64,
}

impl Session {
    /// A fresh session holds the two permanent tabs, navigation pane active.
    pub fn new() -> Self {
        Session {
            tabs: vec![Tab::navigation(), Tab::search_input()],
            active_tab_id: NAVIGATION_TAB_ID.to_string(),
            scroll_positions: HashMap::new(),
            status_message: String::from("Ready."),
            tab_serial: 0,
        }
    }

    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_mut(&mut self, id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tab(&self.active_tab_id)
    }

    /// Mint a unique id for a transient tab: kind + slug + creation time,
    /// plus a session-monotonic serial so same-millisecond opens never clash.
    pub(crate) fn mint_tab_id(&mut self, kind: &str, slug: &str) -> String {
        self.tab_serial += 1;
        format!(
            "{}-{}-{}-{}",
            kind,
            slug,
            Utc::now().timestamp_millis(),
            self.tab_serial
        )
    }

    /// Expand `id`, collapse everything else, and mark it active.
    pub(crate) fn set_active(&mut self, id: &str) {
        for tab in &mut self.tabs {
            tab.collapsed = tab.id != id;
        }
        self.active_tab_id = id.to_string();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tabs::SEARCH_INPUT_TAB_ID;

    #[test]
    fn test_new_session_seeds_permanent_tabs() {
        let session = Session::new();
        assert_eq!(session.tabs.len(), 2);
        assert_eq!(session.tabs[0].id, NAVIGATION_TAB_ID);
        assert_eq!(session.tabs[1].id, SEARCH_INPUT_TAB_ID);
        assert_eq!(session.active_tab_id, NAVIGATION_TAB_ID);
        assert!(!session.tabs[0].collapsed);
        assert!(session.tabs[1].collapsed);
    }

    #[test]
    fn test_minted_ids_are_unique() {
        let mut session = Session::new();
        let a = session.mint_tab_id("verse", "x");
        let b = session.mint_tab_id("verse", "x");
        assert_ne!(a, b);
        assert!(a.starts_with("verse-x-"));
    }

    #[test]
    fn test_set_active_collapses_everything_else() {
        let mut session = Session::new();
        session.set_active(SEARCH_INPUT_TAB_ID);
        assert_eq!(session.active_tab_id, SEARCH_INPUT_TAB_ID);
        assert!(session.tab(NAVIGATION_TAB_ID).unwrap().collapsed);
        assert!(!session.tab(SEARCH_INPUT_TAB_ID).unwrap().collapsed);
    }
}
