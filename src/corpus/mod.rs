//! # Corpus Model
//!
//! The static testament → book → chapter → verse hierarchy the whole engine
//! reads from. Loaded once from a JSON document at startup, validated, and
//! never mutated afterwards; every other module borrows it immutably.
//!
//! ```text
//! Corpus
//! └── testaments: Vec<Testament>     // ordered
//!     └── books: Vec<Book>           // ordered
//!         └── chapters: Vec<Chapter> // number == 1-based position
//!             └── verses: Vec<Verse> // number == 1-based position
//! ```
//!
//! A [`Coordinate`] addresses one chapter by testament name, book name and
//! chapter number. Resolution is by exact name/number match: order exists
//! for traversal, names are the stable identifiers.

use std::fmt;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

pub mod navigator;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Corpus {
    pub testaments: Vec<Testament>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Testament {
    pub name: String,
    pub books: Vec<Book>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Book {
    pub name: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Chapter {
    /// 1-based, dense: equals the chapter's position within its book.
    pub number: u32,
    pub verses: Vec<Verse>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Verse {
    /// 1-based, dense within the chapter.
    pub number: u32,
    pub text: String,
}

/// Lookup key for one chapter: (testament name, book name, chapter number).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub testament: String,
    pub book: String,
    pub chapter: u32,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} {}", self.testament, self.book, self.chapter)
    }
}

/// Errors that can occur while loading the corpus.
/// Any of these aborts startup; no coordinate can be trusted afterwards.
#[derive(Debug)]
pub enum CorpusError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Structural invariant violated (empty list, sparse numbering, duplicate name).
    Invalid(String),
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Io(e) => write!(f, "corpus I/O error: {e}"),
            CorpusError::Parse(e) => write!(f, "corpus parse error: {e}"),
            CorpusError::Invalid(msg) => write!(f, "malformed corpus: {msg}"),
        }
    }
}

impl std::error::Error for CorpusError {}

/// Load and validate the corpus from a JSON file.
pub fn load_corpus(path: &Path) -> Result<Corpus, CorpusError> {
    let json = fs::read_to_string(path).map_err(CorpusError::Io)?;
    let corpus: Corpus = serde_json::from_str(&json).map_err(CorpusError::Parse)?;
    corpus.validate()?;
    info!(
        "Loaded corpus from {}: {} testaments, {} books, {} verses",
        path.display(),
        corpus.testaments.len(),
        corpus.book_count(),
        corpus.verse_count()
    );
    Ok(corpus)
}

impl Corpus {
    /// Check every structural invariant: non-empty lists at every level,
    /// dense 1-based chapter/verse numbering, unique testament/book names.
    pub fn validate(&self) -> Result<(), CorpusError> {
        if self.testaments.is_empty() {
            return Err(CorpusError::Invalid("no testaments".to_string()));
        }
        for (ti, testament) in self.testaments.iter().enumerate() {
            if self.testaments[..ti].iter().any(|t| t.name == testament.name) {
                return Err(CorpusError::Invalid(format!(
                    "duplicate testament name '{}'",
                    testament.name
                )));
            }
            if testament.books.is_empty() {
                return Err(CorpusError::Invalid(format!(
                    "testament '{}' has no books",
                    testament.name
                )));
            }
            for (bi, book) in testament.books.iter().enumerate() {
                if testament.books[..bi].iter().any(|b| b.name == book.name) {
                    return Err(CorpusError::Invalid(format!(
                        "duplicate book name '{}' in '{}'",
                        book.name, testament.name
                    )));
                }
                if book.chapters.is_empty() {
                    return Err(CorpusError::Invalid(format!(
                        "book '{}' has no chapters",
                        book.name
                    )));
                }
                for (ci, chapter) in book.chapters.iter().enumerate() {
                    if chapter.number as usize != ci + 1 {
                        return Err(CorpusError::Invalid(format!(
                            "book '{}': chapter at position {} is numbered {}",
                            book.name,
                            ci + 1,
                            chapter.number
                        )));
                    }
                    if chapter.verses.is_empty() {
                        return Err(CorpusError::Invalid(format!(
                            "{} {} has no verses",
                            book.name, chapter.number
                        )));
                    }
                    for (vi, verse) in chapter.verses.iter().enumerate() {
                        if verse.number as usize != vi + 1 {
                            return Err(CorpusError::Invalid(format!(
                                "{} {}: verse at position {} is numbered {}",
                                book.name,
                                chapter.number,
                                vi + 1,
                                verse.number
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn testament(&self, name: &str) -> Option<&Testament> {
        self.testaments.iter().find(|t| t.name == name)
    }

    pub fn book(&self, testament: &str, book: &str) -> Option<&Book> {
        self.testament(testament)?.books.iter().find(|b| b.name == book)
    }

    /// Resolve a coordinate to its chapter. `None` is a lookup miss, not an error.
    pub fn chapter(&self, coordinate: &Coordinate) -> Option<&Chapter> {
        self.book(&coordinate.testament, &coordinate.book)?
            .chapters
            .iter()
            .find(|c| c.number == coordinate.chapter)
    }

    pub fn verses(&self, coordinate: &Coordinate) -> Option<&[Verse]> {
        self.chapter(coordinate).map(|c| c.verses.as_slice())
    }

    fn book_count(&self) -> usize {
        self.testaments.iter().map(|t| t.books.len()).sum()
    }

    fn verse_count(&self) -> usize {
        self.testaments
            .iter()
            .flat_map(|t| &t.books)
            .flat_map(|b| &b.chapters)
            .map(|c| c.verses.len())
            .sum()
    }
}
