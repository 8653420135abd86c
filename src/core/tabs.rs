//! # Tabs
//!
//! One open session view. The variant set is closed: every consumer matches
//! exhaustively on [`TabContent`] instead of comparing kind strings, so a
//! payload shape can never drift away from its discriminant.
//!
//! The navigation pane and the search input are singleton, permanent tabs
//! with fixed ids; verse and search-results tabs are transient and closable.

use serde::{Deserialize, Serialize};

use crate::corpus::{Coordinate, Verse};
use crate::search::{Hit, SearchMode};

pub const NAVIGATION_TAB_ID: &str = "navigation";
pub const SEARCH_INPUT_TAB_ID: &str = "search-input";

/// Discriminant for the closed set of tab variants.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    #[serde(rename = "navigation")]
    Navigation,
    #[serde(rename = "search-input")]
    SearchInput,
    #[serde(rename = "verse")]
    Verse,
    #[serde(rename = "search-results")]
    SearchResults,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VersePayload {
    pub coordinate: Coordinate,
    /// Snapshot of the chapter's verses at open time.
    pub verses: Vec<Verse>,
    pub highlighted_verse: Option<u32>,
    /// Query to re-highlight with when the tab was opened from search results.
    pub search_query: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResultsPayload {
    pub query: String,
    pub mode: SearchMode,
    pub hits: Vec<Hit>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum TabContent {
    Navigation,
    SearchInput,
    Verse(VersePayload),
    SearchResults(SearchResultsPayload),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: String,
    /// Display label.
    pub title: String,
    /// Exactly one tab (the active one) is expanded at a time; the session
    /// manager enforces this, not the tab itself.
    pub collapsed: bool,
    pub content: TabContent,
}

impl Tab {
    pub fn kind(&self) -> TabKind {
        match &self.content {
            TabContent::Navigation => TabKind::Navigation,
            TabContent::SearchInput => TabKind::SearchInput,
            TabContent::Verse(_) => TabKind::Verse,
            TabContent::SearchResults(_) => TabKind::SearchResults,
        }
    }

    /// Permanent tabs reject close and never appear in history.
    pub fn is_permanent(&self) -> bool {
        matches!(self.content, TabContent::Navigation | TabContent::SearchInput)
    }

    pub(crate) fn navigation() -> Self {
        Tab {
            id: NAVIGATION_TAB_ID.to_string(),
            title: "الفهرس".to_string(),
            collapsed: false,
            content: TabContent::Navigation,
        }
    }

    pub(crate) fn search_input() -> Self {
        Tab {
            id: SEARCH_INPUT_TAB_ID.to_string(),
            title: "البحث".to_string(),
            collapsed: true,
            content: TabContent::SearchInput,
        }
    }
}

/// Flatten free text into an id fragment: whitespace becomes `-`, long
/// strings are cut. Ids only need to be unique, not pretty; the serial and
/// timestamp appended by the session take care of collisions.
pub(crate) fn slug(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(24)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_tabs() {
        assert!(Tab::navigation().is_permanent());
        assert!(Tab::search_input().is_permanent());
        assert_eq!(Tab::navigation().kind(), TabKind::Navigation);
        assert_eq!(Tab::search_input().kind(), TabKind::SearchInput);
    }

    #[test]
    fn test_slug_flattens_whitespace_and_truncates() {
        assert_eq!(slug("نور  فوق\tنور"), "نور-فوق-نور");
        assert_eq!(slug("a").len(), 1);
        assert!(slug(&"x".repeat(100)).chars().count() <= 24);
    }
}
