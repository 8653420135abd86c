//! # History & Preferences Store
//!
//! The narrow persistence seam the engine writes through. Everything here is
//! best-effort: a store that cannot read hands back defaults, a store that
//! cannot write logs a warning, and the in-memory session carries on either
//! way. Nothing in this module may block or corrupt session state.

pub mod debounce;
pub mod file;

use serde::{Deserialize, Serialize};

use crate::corpus::Coordinate;
use crate::search::SearchMode;

/// Snapshot of a transient tab at the moment it was (re)opened. Append-only
/// from the engine's point of view; replayed to reconstruct the tab later.
/// The two permanent tabs never appear here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    Verse {
        coordinate: Coordinate,
        highlighted_verse: Option<u32>,
        title: String,
        opened_at: i64,
    },
    Search {
        query: String,
        mode: SearchMode,
        title: String,
        opened_at: i64,
    },
}

impl HistoryEntry {
    pub fn title(&self) -> &str {
        match self {
            HistoryEntry::Verse { title, .. } => title,
            HistoryEntry::Search { title, .. } => title,
        }
    }

    pub fn opened_at(&self) -> i64 {
        match self {
            HistoryEntry::Verse { opened_at, .. } => *opened_at,
            HistoryEntry::Search { opened_at, .. } => *opened_at,
        }
    }
}

/// Display preferences mirrored from the presentation layer. The engine
/// never interprets these; it only keeps them persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Verse font size, px.
    pub verse_size: u32,
    /// Title font size, px.
    pub title_size: u32,
    /// Content side margin, rem.
    pub content_margin: f32,
    /// Render the verse number inside the verse text.
    pub verse_number_inside: bool,
    /// Render all verses of a chapter as one paragraph.
    pub combined_verse_view: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            verse_size: 20,
            title_size: 28,
            content_margin: 1.0,
            verse_number_inside: false,
            combined_verse_view: false,
        }
    }
}

/// Persistence backend for history, scroll offsets and preferences.
///
/// Every method is infallible by contract: implementations swallow and log
/// their own failures, substituting defaults on reads.
pub trait StateStore: Send + Sync {
    /// Returns the name of the backend, for logs.
    fn name(&self) -> &str;

    /// Append a tab snapshot to the history log.
    fn append_history(&self, entry: &HistoryEntry);

    /// The full history log, oldest first.
    fn history(&self) -> Vec<HistoryEntry>;

    /// The most recently opened tab, for resume-on-restart.
    fn last_opened(&self) -> Option<HistoryEntry> {
        self.history().pop()
    }

    /// Persisted scroll offset for a tab; 0.0 when unknown.
    fn scroll_position(&self, tab_id: &str) -> f64;

    fn set_scroll_position(&self, tab_id: &str, offset: f64);

    /// Prune the offset for a closed tab.
    fn remove_scroll_position(&self, tab_id: &str);

    fn preferences(&self) -> Preferences;

    fn set_preferences(&self, preferences: &Preferences);

    fn dark_mode(&self) -> bool;

    fn set_dark_mode(&self, on: bool);
}
