//! # Arabic Text Normalization
//!
//! The corpus is written with optional diacritical marks: the same word may
//! appear as "اللّٰه" in one verse and "الله" in another. Query and corpus
//! text are folded identically before comparison so that the presence or
//! absence of marks never affects matching.
//!
//! Folding rules:
//! - drop harakat, tanwin, shadda, sukun (U+064B–U+065F), the superscript
//!   alef (U+0670), Quranic annotation signs, and the tatweel (U+0640)
//! - collapse alef variants (أ إ آ ٱ) to bare alef, alef maqsura (ى) to
//!   ya (ي), and ta marbuta (ة) to ha (ه)
//!
//! [`Folded`] additionally keeps, for every folded character, the byte range
//! of raw text it came from, so highlighting can mark exactly the raw
//! characters (marks included) whose folded form matched.

/// Characters removed entirely by folding.
fn is_ignorable(c: char) -> bool {
    matches!(c,
        '\u{064B}'..='\u{065F}'     // tanwin, harakat, shadda, sukun
        | '\u{0670}'                // superscript alef
        | '\u{0640}'                // tatweel
        | '\u{06D6}'..='\u{06DC}'   // Quranic annotation signs
        | '\u{06DF}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}'
    )
}

/// Orthographic letter variants collapsed to a canonical form.
fn fold_letter(c: char) -> char {
    match c {
        'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
        'ى' => 'ي',
        'ة' => 'ه',
        _ => c,
    }
}

/// Fold `text` for comparison. Both sides of every match use this.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !is_ignorable(*c))
        .map(fold_letter)
        .collect()
}

/// Token-boundary test for exact (whole-word) matching.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// One folded character with its provenance in the raw text.
struct FoldedChar {
    /// Byte offset of this character within the folded string.
    offset: usize,
    raw_start: usize,
    raw_end: usize,
}

/// Folded text that can map match ranges back to raw byte ranges.
pub struct Folded {
    text: String,
    chars: Vec<FoldedChar>,
}

impl Folded {
    pub fn new(raw: &str) -> Self {
        let mut text = String::with_capacity(raw.len());
        let mut chars: Vec<FoldedChar> = Vec::new();
        for (start, c) in raw.char_indices() {
            let end = start + c.len_utf8();
            if is_ignorable(c) {
                // Marks belong to the letter they modify: extend its span so a
                // highlighted word keeps its diacritics.
                if let Some(last) = chars.last_mut() {
                    last.raw_end = end;
                }
                continue;
            }
            let folded = fold_letter(c);
            chars.push(FoldedChar {
                offset: text.len(),
                raw_start: start,
                raw_end: end,
            });
            text.push(folded);
        }
        Folded { text, chars }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map a byte range of the folded text back to the byte range of raw
    /// text it covers. Ranges must lie on folded character boundaries,
    /// which is always true for ranges produced by the matcher.
    pub fn raw_range(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let first = self.chars.partition_point(|fc| fc.offset < start);
        let last = self.chars.partition_point(|fc| fc.offset < end);
        if first >= last {
            return None;
        }
        Some((self.chars[first].raw_start, self.chars[last - 1].raw_end))
    }
}
