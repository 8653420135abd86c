//! # Match Highlighting
//!
//! Pure function marking the spans of a verse that caused a search hit.
//! Uses the same folding and matcher as the search step, so highlighted
//! spans exactly cover the matching text: diacritics inside a matched word
//! stay inside the `<mark>`. Raw text is HTML-escaped before wrapping, so a
//! verse containing markup metacharacters can never break the output.

use super::normalize::{Folded, normalize};
use super::{SearchMode, match_ranges};

/// Wrap every `query` match inside `text` with `<mark>…</mark>`.
///
/// The whole result is escaped; text with no matches comes back escaped but
/// otherwise untouched.
pub fn highlight(text: &str, query: &str, mode: SearchMode) -> String {
    let needle = normalize(query.trim());
    if needle.is_empty() {
        return escape(text);
    }

    let folded = Folded::new(text);
    let raw_ranges: Vec<(usize, usize)> = match_ranges(folded.text(), &needle, mode)
        .into_iter()
        .filter_map(|(start, end)| folded.raw_range(start, end))
        .collect();
    if raw_ranges.is_empty() {
        return escape(text);
    }

    let mut out = String::with_capacity(text.len() + raw_ranges.len() * 13);
    let mut cursor = 0;
    for (start, end) in raw_ranges {
        out.push_str(&escape(&text[cursor..start]));
        out.push_str("<mark>");
        out.push_str(&escape(&text[start..end]));
        out.push_str("</mark>");
        cursor = end;
    }
    out.push_str(&escape(&text[cursor..]));
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_wraps_plain_match() {
        assert_eq!(
            highlight("كتاب مفتوح", "كتاب", SearchMode::Partial),
            "<mark>كتاب</mark> مفتوح"
        );
    }

    #[test]
    fn test_highlight_span_covers_diacritics() {
        // The plain query must mark the fully pointed word, marks included.
        assert_eq!(
            highlight("قَالَ اللّٰهُ", "الله", SearchMode::Partial),
            "قَالَ <mark>اللّٰهُ</mark>"
        );
    }

    #[test]
    fn test_highlight_with_marked_query() {
        assert_eq!(
            highlight("قال الله", "اللّٰه", SearchMode::Partial),
            "قال <mark>الله</mark>"
        );
    }

    #[test]
    fn test_highlight_marks_every_occurrence() {
        assert_eq!(
            highlight("نور فوق نور", "نور", SearchMode::Exact),
            "<mark>نور</mark> فوق <mark>نور</mark>"
        );
    }

    #[test]
    fn test_highlight_respects_exact_mode() {
        // "كتب" is not a whole token of "كتابه" and not a substring either,
        // but "كتاب" is a fragment: exact leaves it unmarked, partial marks it.
        assert_eq!(highlight("كتابه", "كتاب", SearchMode::Exact), "كتابه");
        assert_eq!(
            highlight("كتابه", "كتاب", SearchMode::Partial),
            "<mark>كتاب</mark>ه"
        );
    }

    #[test]
    fn test_highlight_escapes_markup_in_text() {
        assert_eq!(
            highlight("قال <الرب> \"نور\" & ظلمة", "نور", SearchMode::Partial),
            "قال &lt;الرب&gt; &quot;<mark>نور</mark>&quot; &amp; ظلمة"
        );
    }

    #[test]
    fn test_highlight_no_match_is_escaped_passthrough() {
        assert_eq!(
            highlight("a < b", "ضوء", SearchMode::Partial),
            "a &lt; b"
        );
    }

    #[test]
    fn test_highlight_empty_query_is_escaped_passthrough() {
        assert_eq!(highlight("كتاب", "  ", SearchMode::Partial), "كتاب");
    }
}
