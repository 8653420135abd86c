//! # Actions
//!
//! Everything that can happen to a reading session becomes an `Action`.
//! User clicks a chapter? That's `Action::OpenVerseTab`. User swipes to the
//! next chapter? That's `Action::NavigateChapter(Direction::Next)`.
//!
//! The `update()` function takes the current session and an action, mutates
//! the session, and returns an `Effect` describing what the driver must do
//! afterwards (append history, persist a scroll offset). No I/O here.
//!
//! ```text
//! Session + Action  →  update()  →  mutated Session + Effect
//! ```
//!
//! This makes everything testable: run an action, assert on the session and
//! the returned effect, no store or renderer required.
//!
//! Two invariants hold after every `update`: `active_tab_id` names a tab
//! present in `tabs`, and the two permanent tabs are present and first in
//! display order.

use chrono::Utc;
use log::{debug, warn};

use crate::core::state::Session;
use crate::core::tabs::{SearchResultsPayload, Tab, TabContent, VersePayload, slug};
use crate::corpus::navigator::{Direction, adjacent_chapter};
use crate::corpus::{Coordinate, Corpus};
use crate::search::{SearchMode, search};
use crate::store::HistoryEntry;

pub enum Action {
    /// Open a new verse tab for a chapter, optionally jumping to one verse.
    OpenVerseTab {
        coordinate: Coordinate,
        highlighted_verse: Option<u32>,
        search_query: Option<String>,
    },
    /// Move the active verse tab to the adjacent chapter, in place.
    NavigateChapter(Direction),
    /// Run a search and open a results tab.
    OpenSearchResults { query: String, mode: SearchMode },
    CloseTab(String),
    ActivateTab(String),
    ScrollChanged { tab_id: String, offset: f64 },
    /// Reconstruct a tab from a persisted history record.
    Replay(HistoryEntry),
}

/// What the driver must do after an `update`. Persistence is fire-and-forget:
/// a failed effect never corrupts the in-memory session.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Append the snapshot to the history log.
    RecordHistory(HistoryEntry),
    /// Route the offset through the scroll debouncer.
    PersistScroll { tab_id: String, offset: f64 },
    /// Drop the persisted offset and any pending debounce for a closed tab.
    PruneScroll(String),
}

pub fn update(session: &mut Session, corpus: &Corpus, action: Action) -> Effect {
    match action {
        Action::OpenVerseTab {
            coordinate,
            highlighted_verse,
            search_query,
        } => open_verse_tab(session, corpus, coordinate, highlighted_verse, search_query),
        Action::NavigateChapter(direction) => navigate_chapter(session, corpus, direction),
        Action::OpenSearchResults { query, mode } => {
            open_search_results(session, corpus, query, mode)
        }
        Action::CloseTab(id) => close_tab(session, &id),
        Action::ActivateTab(id) => activate_tab(session, &id),
        Action::ScrollChanged { tab_id, offset } => scroll_changed(session, &tab_id, offset),
        Action::Replay(entry) => match entry {
            HistoryEntry::Verse {
                coordinate,
                highlighted_verse,
                ..
            } => open_verse_tab(session, corpus, coordinate, highlighted_verse, None),
            HistoryEntry::Search { query, mode, .. } => {
                open_search_results(session, corpus, query, mode)
            }
        },
    }
}

fn open_verse_tab(
    session: &mut Session,
    corpus: &Corpus,
    coordinate: Coordinate,
    highlighted_verse: Option<u32>,
    search_query: Option<String>,
) -> Effect {
    let Some(chapter) = corpus.chapter(&coordinate) else {
        warn!("open_verse_tab: nothing at {}", coordinate);
        session.status_message = format!("Nothing found at {}", coordinate);
        return Effect::None;
    };
    let verses = chapter.verses.clone();

    let title = format!("{} {}", coordinate.book, coordinate.chapter);
    let id = session.mint_tab_id("verse", &slug(&title));
    session.tabs.push(Tab {
        id: id.clone(),
        title: title.clone(),
        collapsed: false,
        content: TabContent::Verse(VersePayload {
            coordinate: coordinate.clone(),
            verses,
            highlighted_verse,
            search_query,
        }),
    });
    session.set_active(&id);
    session.status_message = title.clone();

    Effect::RecordHistory(HistoryEntry::Verse {
        coordinate,
        highlighted_verse,
        title,
        opened_at: Utc::now().timestamp(),
    })
}

fn navigate_chapter(session: &mut Session, corpus: &Corpus, direction: Direction) -> Effect {
    let active_id = session.active_tab_id.clone();
    let Some(TabContent::Verse(payload)) = session.tab(&active_id).map(|t| &t.content) else {
        debug!("navigate_chapter: active tab is not a verse tab");
        return Effect::None;
    };
    let Some(next) = adjacent_chapter(corpus, &payload.coordinate, direction) else {
        // Corpus boundary: stay put.
        debug!("navigate_chapter: no {:?} chapter from {}", direction, payload.coordinate);
        return Effect::None;
    };
    let Some(chapter) = corpus.chapter(&next) else {
        warn!("navigate_chapter: adjacent coordinate {} did not resolve", next);
        return Effect::None;
    };
    let verses = chapter.verses.clone();
    let title = format!("{} {}", next.book, next.chapter);

    // Continuing to read: same tab id, same position, new payload. The
    // highlight and search query belonged to the chapter being left behind.
    let Some(tab) = session.tab_mut(&active_id) else {
        return Effect::None;
    };
    tab.title = title.clone();
    tab.content = TabContent::Verse(VersePayload {
        coordinate: next.clone(),
        verses,
        highlighted_verse: None,
        search_query: None,
    });
    session.status_message = title.clone();

    Effect::RecordHistory(HistoryEntry::Verse {
        coordinate: next,
        highlighted_verse: None,
        title,
        opened_at: Utc::now().timestamp(),
    })
}

fn open_search_results(
    session: &mut Session,
    corpus: &Corpus,
    query: String,
    mode: SearchMode,
) -> Effect {
    let query = query.trim().to_string();
    if query.is_empty() {
        // Boundary guard: an empty query is a no-op, not an error.
        debug!("open_search_results: empty query ignored");
        return Effect::None;
    }

    let hits = search(corpus, &query, mode);
    if hits.is_empty() {
        session.status_message = format!("No results for \"{query}\"");
        return Effect::None;
    }

    let title = format!("بحث: {query}");
    let id = session.mint_tab_id("search", &slug(&query));
    session.status_message = format!("{} result(s) for \"{query}\"", hits.len());
    session.tabs.push(Tab {
        id: id.clone(),
        title: title.clone(),
        collapsed: false,
        content: TabContent::SearchResults(SearchResultsPayload {
            query: query.clone(),
            mode,
            hits,
        }),
    });
    session.set_active(&id);

    Effect::RecordHistory(HistoryEntry::Search {
        query,
        mode,
        title,
        opened_at: Utc::now().timestamp(),
    })
}

fn close_tab(session: &mut Session, id: &str) -> Effect {
    let Some(pos) = session.tabs.iter().position(|t| t.id == id) else {
        debug!("close_tab: unknown tab {}", id);
        return Effect::None;
    };
    if session.tabs[pos].is_permanent() {
        // The UI shouldn't offer this, but the engine stays robust if it does.
        debug!("close_tab: {} is permanent", id);
        return Effect::None;
    }

    session.tabs.remove(pos);
    session.scroll_positions.remove(id);
    if session.active_tab_id == id {
        // Fallback is the last tab in display order (most recently added),
        // not the previously active tab.
        if let Some(fallback) = session.tabs.last().map(|t| t.id.clone()) {
            session.set_active(&fallback);
        }
    }

    Effect::PruneScroll(id.to_string())
}

fn activate_tab(session: &mut Session, id: &str) -> Effect {
    if session.active_tab_id == id {
        // Already expanded; avoid a pointless collapse/expand cycle.
        return Effect::None;
    }
    if session.tab(id).is_none() {
        debug!("activate_tab: unknown tab {}", id);
        return Effect::None;
    }
    session.set_active(id);
    Effect::None
}

fn scroll_changed(session: &mut Session, tab_id: &str, offset: f64) -> Effect {
    if session.tab(tab_id).is_none() {
        debug!("scroll_changed: unknown tab {}", tab_id);
        return Effect::None;
    }
    let offset = offset.max(0.0);
    session.scroll_positions.insert(tab_id.to_string(), offset);
    Effect::PersistScroll {
        tab_id: tab_id.to_string(),
        offset,
    }
}
