//! # Search Engine
//!
//! Scans the whole in-memory corpus for a query string. No inverted index,
//! no relevance scoring: hits come back in canonical corpus order
//! (testament → book → chapter → verse), which keeps results stable across
//! identical runs.
//!
//! Matching happens in folded space (see [`normalize`]): `Partial` is
//! substring containment, `Exact` requires the match to sit on token
//! boundaries. [`highlight`] reuses the exact same matcher, so highlighted
//! spans cover precisely what caused a hit.

pub mod highlight;
pub mod normalize;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::corpus::{Coordinate, Corpus};
use self::normalize::{is_word_char, normalize};

#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Substring containment after normalization
    #[serde(rename = "partial")]
    #[default]
    Partial,
    /// Whole-token equality after normalization
    #[serde(rename = "exact")]
    Exact,
}

impl SearchMode {
    /// Human-readable label for status lines and logs.
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Partial => "partial",
            SearchMode::Exact => "exact",
        }
    }
}

/// One matching verse, with enough context to render and re-highlight it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Hit {
    pub coordinate: Coordinate,
    pub verse: u32,
    pub text: String,
}

/// Search the corpus. Hits are ordered by canonical position.
///
/// Callers guard against empty queries at the boundary; a query that folds
/// to nothing still returns no hits rather than matching everything.
pub fn search(corpus: &Corpus, query: &str, mode: SearchMode) -> Vec<Hit> {
    let needle = normalize(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for testament in &corpus.testaments {
        for book in &testament.books {
            for chapter in &book.chapters {
                for verse in &chapter.verses {
                    if !match_ranges(&normalize(&verse.text), &needle, mode).is_empty() {
                        hits.push(Hit {
                            coordinate: Coordinate {
                                testament: testament.name.clone(),
                                book: book.name.clone(),
                                chapter: chapter.number,
                            },
                            verse: verse.number,
                            text: verse.text.clone(),
                        });
                    }
                }
            }
        }
    }
    debug!("search \"{}\" ({}): {} hits", query, mode.label(), hits.len());
    hits
}

/// Byte ranges within `folded` that match the folded `query` under `mode`.
/// Non-overlapping, left to right. Shared by [`search`] and [`highlight`] so
/// both apply one matching rule.
pub(crate) fn match_ranges(folded: &str, query: &str, mode: SearchMode) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    if query.is_empty() {
        return ranges;
    }
    let mut from = 0;
    while let Some(pos) = folded[from..].find(query) {
        let start = from + pos;
        let end = start + query.len();
        let on_token_boundary = folded[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c))
            && folded[end..].chars().next().is_none_or(|c| !is_word_char(c));
        if matches!(mode, SearchMode::Partial) || on_token_boundary {
            ranges.push((start, end));
            from = end;
        } else {
            // Step one character past this occurrence and keep scanning.
            from = start + folded[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    ranges
}
