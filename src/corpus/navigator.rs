//! # Chapter Navigator
//!
//! Pure adjacency resolution: given a chapter coordinate, find the chapter
//! immediately before or after it in canonical corpus order, crossing book
//! and testament boundaries as needed.
//!
//! Reaching either end of the corpus yields `None`, never a wraparound.
//! Callers treat `None` as "stay put".

use super::{Coordinate, Corpus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Resolve the chapter adjacent to `coordinate` in the given direction.
///
/// Returns `None` at the corpus boundary, and also when the coordinate
/// itself does not resolve (unknown names are a lookup miss, not a panic).
pub fn adjacent_chapter(
    corpus: &Corpus,
    coordinate: &Coordinate,
    direction: Direction,
) -> Option<Coordinate> {
    let t_idx = corpus
        .testaments
        .iter()
        .position(|t| t.name == coordinate.testament)?;
    let testament = &corpus.testaments[t_idx];
    let b_idx = testament
        .books
        .iter()
        .position(|b| b.name == coordinate.book)?;
    let book = &testament.books[b_idx];
    if coordinate.chapter < 1 || coordinate.chapter as usize > book.chapters.len() {
        return None;
    }

    match direction {
        Direction::Next => {
            if (coordinate.chapter as usize) < book.chapters.len() {
                Some(Coordinate {
                    chapter: coordinate.chapter + 1,
                    ..coordinate.clone()
                })
            } else if let Some(next_book) = testament.books.get(b_idx + 1) {
                Some(Coordinate {
                    testament: coordinate.testament.clone(),
                    book: next_book.name.clone(),
                    chapter: 1,
                })
            } else if let Some(next_testament) = corpus.testaments.get(t_idx + 1) {
                // Validation guarantees every testament has at least one book.
                let first_book = next_testament.books.first()?;
                Some(Coordinate {
                    testament: next_testament.name.clone(),
                    book: first_book.name.clone(),
                    chapter: 1,
                })
            } else {
                None
            }
        }
        Direction::Prev => {
            if coordinate.chapter > 1 {
                Some(Coordinate {
                    chapter: coordinate.chapter - 1,
                    ..coordinate.clone()
                })
            } else if b_idx > 0 {
                let prev_book = &testament.books[b_idx - 1];
                Some(Coordinate {
                    testament: coordinate.testament.clone(),
                    book: prev_book.name.clone(),
                    chapter: prev_book.chapters.len() as u32,
                })
            } else if t_idx > 0 {
                let prev_testament = &corpus.testaments[t_idx - 1];
                let last_book = prev_testament.books.last()?;
                Some(Coordinate {
                    testament: prev_testament.name.clone(),
                    book: last_book.name.clone(),
                    chapter: last_book.chapters.len() as u32,
                })
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_corpus;

    fn coord(testament: &str, book: &str, chapter: u32) -> Coordinate {
        Coordinate {
            testament: testament.to_string(),
            book: book.to_string(),
            chapter,
        }
    }

    #[test]
    fn test_next_within_book() {
        let corpus = test_corpus();
        let next = adjacent_chapter(
            &corpus,
            &coord("العهد القديم", "التكوين", 1),
            Direction::Next,
        );
        assert_eq!(next, Some(coord("العهد القديم", "التكوين", 2)));
    }

    #[test]
    fn test_next_crosses_testament_boundary() {
        // Last chapter of the last book of the first testament jumps to the
        // first chapter of the first book of the next testament.
        let corpus = test_corpus();
        let next = adjacent_chapter(
            &corpus,
            &coord("العهد القديم", "التكوين", 2),
            Direction::Next,
        );
        assert_eq!(next, Some(coord("العهد الجديد", "متى", 1)));
    }

    #[test]
    fn test_prev_crosses_testament_boundary() {
        let corpus = test_corpus();
        let prev = adjacent_chapter(&corpus, &coord("العهد الجديد", "متى", 1), Direction::Prev);
        assert_eq!(prev, Some(coord("العهد القديم", "التكوين", 2)));
    }

    #[test]
    fn test_prev_at_corpus_start_is_none() {
        let corpus = test_corpus();
        assert_eq!(
            adjacent_chapter(&corpus, &coord("العهد القديم", "التكوين", 1), Direction::Prev),
            None
        );
    }

    #[test]
    fn test_next_crosses_book_boundary() {
        let corpus = test_corpus();
        let next = adjacent_chapter(&corpus, &coord("العهد الجديد", "متى", 1), Direction::Next);
        assert_eq!(next, Some(coord("العهد الجديد", "مرقس", 1)));
    }

    #[test]
    fn test_prev_lands_on_last_chapter_of_previous_book() {
        let corpus = test_corpus();
        let prev = adjacent_chapter(&corpus, &coord("العهد الجديد", "مرقس", 1), Direction::Prev);
        assert_eq!(prev, Some(coord("العهد الجديد", "متى", 1)));
    }

    #[test]
    fn test_next_at_corpus_end_is_none() {
        let corpus = test_corpus();
        assert_eq!(
            adjacent_chapter(&corpus, &coord("العهد الجديد", "مرقس", 1), Direction::Next),
            None
        );
    }

    #[test]
    fn test_next_then_prev_round_trips_everywhere() {
        let corpus = test_corpus();
        for testament in &corpus.testaments {
            for book in &testament.books {
                for chapter in &book.chapters {
                    let here = coord(&testament.name, &book.name, chapter.number);
                    if let Some(next) = adjacent_chapter(&corpus, &here, Direction::Next) {
                        assert_eq!(
                            adjacent_chapter(&corpus, &next, Direction::Prev),
                            Some(here.clone()),
                            "round trip failed from {}",
                            here
                        );
                    }
                    if let Some(prev) = adjacent_chapter(&corpus, &here, Direction::Prev) {
                        assert_eq!(
                            adjacent_chapter(&corpus, &prev, Direction::Next),
                            Some(here),
                            "reverse round trip failed"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_unknown_coordinate_is_none() {
        let corpus = test_corpus();
        assert_eq!(
            adjacent_chapter(&corpus, &coord("العهد القديم", "لا يوجد", 1), Direction::Next),
            None
        );
        assert_eq!(
            adjacent_chapter(&corpus, &coord("العهد القديم", "التكوين", 9), Direction::Prev),
            None
        );
    }
}
