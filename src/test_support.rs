//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::corpus::{Book, Chapter, Corpus, Testament, Verse};
use crate::store::{HistoryEntry, Preferences, StateStore};

fn verse(number: u32, text: &str) -> Verse {
    Verse {
        number,
        text: text.to_string(),
    }
}

/// A small two-testament corpus exercising every traversal boundary:
///
/// ```text
/// العهد القديم ── التكوين (2 chapters)
/// العهد الجديد ── متى (1 chapter) ── مرقس (1 chapter)
/// ```
///
/// Verse texts mix fully pointed and plain spellings so normalization is
/// exercised by every search test.
pub fn test_corpus() -> Corpus {
    Corpus {
        testaments: vec![
            Testament {
                name: "العهد القديم".to_string(),
                books: vec![Book {
                    name: "التكوين".to_string(),
                    chapters: vec![
                        Chapter {
                            number: 1,
                            verses: vec![
                                verse(1, "فِي الْبَدْءِ خَلَقَ اللهُ السَّمَاوَاتِ وَالْأَرْضَ"),
                                verse(2, "وَكَانَتِ الْأَرْضُ خَرِبَةً وَخَالِيَةً"),
                            ],
                        },
                        Chapter {
                            number: 2,
                            verses: vec![
                                verse(1, "كتاب مفتوح"),
                                verse(2, "قَالَ اللّٰهُ لِيَكُنْ نُورٌ"),
                            ],
                        },
                    ],
                }],
            },
            Testament {
                name: "العهد الجديد".to_string(),
                books: vec![
                    Book {
                        name: "متى".to_string(),
                        chapters: vec![Chapter {
                            number: 1,
                            verses: vec![verse(1, "كِتَابُ مِيلَادِ يَسُوعَ الْمَسِيحِ")],
                        }],
                    },
                    Book {
                        name: "مرقس".to_string(),
                        chapters: vec![Chapter {
                            number: 1,
                            verses: vec![verse(1, "بَدْءُ إِنْجِيلِ يَسُوعَ الْمَسِيحِ ابْنِ اللهِ")],
                        }],
                    },
                ],
            },
        ],
    }
}

#[derive(Default)]
struct MemoryState {
    history: Vec<HistoryEntry>,
    scroll: HashMap<String, f64>,
    scroll_writes: Vec<(String, f64)>,
    preferences: Preferences,
    dark_mode: bool,
}

/// In-memory store for tests that also records every scroll write, so
/// debounce tests can assert on write counts, not just final values.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Every `set_scroll_position` call in order.
    pub fn scroll_writes(&self) -> Vec<(String, f64)> {
        self.state.lock().unwrap().scroll_writes.clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn append_history(&self, entry: &HistoryEntry) {
        self.state.lock().unwrap().history.push(entry.clone());
    }

    fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().unwrap().history.clone()
    }

    fn scroll_position(&self, tab_id: &str) -> f64 {
        self.state
            .lock()
            .unwrap()
            .scroll
            .get(tab_id)
            .copied()
            .unwrap_or(0.0)
    }

    fn set_scroll_position(&self, tab_id: &str, offset: f64) {
        let mut state = self.state.lock().unwrap();
        state.scroll.insert(tab_id.to_string(), offset);
        state.scroll_writes.push((tab_id.to_string(), offset));
    }

    fn remove_scroll_position(&self, tab_id: &str) {
        self.state.lock().unwrap().scroll.remove(tab_id);
    }

    fn preferences(&self) -> Preferences {
        self.state.lock().unwrap().preferences.clone()
    }

    fn set_preferences(&self, preferences: &Preferences) {
        self.state.lock().unwrap().preferences = preferences.clone();
    }

    fn dark_mode(&self) -> bool {
        self.state.lock().unwrap().dark_mode
    }

    fn set_dark_mode(&self, on: bool) {
        self.state.lock().unwrap().dark_mode = on;
    }
}
