//! Heuristic sentence boundary detection.
//!
//! Splits plain text on sentence-final punctuation (`.`, `!`, `?`)
//! followed by whitespace, and on blank lines. A full stop is not
//! treated as a boundary when it closes a known abbreviation, a
//! single-letter initial, or when the next word starts in lower
//! case. Decimal numbers never split because their period is not
//! followed by whitespace.
//!
//! Boundaries are an approximation of human judgement; the splitter
//! only guarantees that it is a pure function of its input.
//!
//! # Example
//!
//! ```
//! use indicator_index::core::matcher::SentenceSplitter;
//!
//! let splitter = SentenceSplitter::default();
//! let sentences = splitter.split("Dr. Smith saw 2.5 mg doses. No other symptoms were noted.");
//!
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[0].text, "Dr. Smith saw 2.5 mg doses.");
//! assert_eq!(sentences[1].index, 1);
//! ```

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Abbreviations after which a full stop never ends a sentence
static TITLE_ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "e.g", "i.e", "cf", "fig",
        "figs", "nos", "vol", "approx", "dept", "gov", "rev", "ph.d", "m.d",
    ]
    .into_iter()
    .collect()
});

/// Abbreviations that only end a sentence before a capitalised word
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "etc", "al", "inc", "ltd", "co", "corp", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
        "sep", "sept", "oct", "nov", "dec", "u.s", "u.k", "e.u", "mg", "ml", "kg", "wt", "resp",
        "no", "ca", "est", "gen",
    ]
    .into_iter()
    .collect()
});

/// Characters that may trail sentence-final punctuation
fn is_closing(c: char) -> bool {
    matches!(
        c,
        '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '}' | '\u{201d}' | '\u{2019}' | '\u{bb}'
    )
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\u{2026}')
}

/// A sentence span within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Zero-based position in document order
    pub index: usize,

    /// Sentence text with surrounding whitespace removed
    pub text: &'a str,

    /// Byte offset of the sentence start in the source text
    pub start: usize,

    /// Byte offset one past the sentence end
    pub end: usize,
}

/// Splits text into sentences
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter {
    /// Additional abbreviations (lower case, without trailing period)
    extra_abbreviations: HashSet<String>,
}

impl SentenceSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register additional never-split abbreviations
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_abbreviations.extend(
            abbreviations
                .into_iter()
                .map(|a| a.as_ref().trim_end_matches('.').to_lowercase()),
        );
        self
    }

    /// Split text into non-empty sentences in document order
    pub fn split<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut i = 0;

        while i < chars.len() {
            let (offset, c) = chars[i];

            // Blank line (paragraph break)
            if c == '\n' {
                let mut j = i + 1;
                while j < chars.len() && chars[j].1 != '\n' && chars[j].1.is_whitespace() {
                    j += 1;
                }
                if j < chars.len() && chars[j].1 == '\n' {
                    push_sentence(&mut sentences, text, start, offset);
                    start = chars[j].0;
                    i = j + 1;
                    continue;
                }
            }

            if is_terminal(c) {
                // Absorb runs like "?!" and closing quotes or brackets
                let mut j = i + 1;
                while j < chars.len() && is_closing(chars[j].1) {
                    j += 1;
                }
                let end = chars.get(j).map_or(text.len(), |&(o, _)| o);
                let at_end = j >= chars.len();
                let followed_by_space = at_end || chars[j].1.is_whitespace();

                if followed_by_space && (at_end || self.is_boundary(text, &chars, i, j)) {
                    push_sentence(&mut sentences, text, start, end);
                    start = end;
                }
                i = j;
                continue;
            }

            i += 1;
        }

        push_sentence(&mut sentences, text, start, text.len());
        sentences
    }

    /// Decide whether the punctuation at `i` ends a sentence, given
    /// that `j` is the first character after the punctuation run
    fn is_boundary(&self, text: &str, chars: &[(usize, char)], i: usize, j: usize) -> bool {
        if chars[i].1 != '.' {
            return true;
        }

        let next_word = chars[j..].iter().map(|&(_, c)| c).find(|c| !c.is_whitespace());
        let next_is_lower = next_word.is_some_and(|c| c.is_lowercase());
        let next_is_upper = next_word.is_some_and(|c| c.is_uppercase());

        // Lower-case continuation is treated as a mid-sentence period
        if next_is_lower {
            return false;
        }

        let token = preceding_token(text, chars[i].0).to_lowercase();
        let token = token.trim_start_matches(|c: char| !c.is_alphanumeric());

        if token.chars().count() == 1 && token.chars().all(char::is_alphabetic) {
            return false;
        }
        if TITLE_ABBREVIATIONS.contains(token) || self.extra_abbreviations.contains(token) {
            return false;
        }
        if ABBREVIATIONS.contains(token) {
            return next_is_upper;
        }
        true
    }
}

/// The whitespace-delimited token ending right before `offset`
fn preceding_token(text: &str, offset: usize) -> &str {
    let before = &text[..offset];
    let begin = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(o, c)| o + c.len_utf8());
    &before[begin..]
}

fn push_sentence<'a>(sentences: &mut Vec<Sentence<'a>>, text: &'a str, start: usize, end: usize) {
    let span = &text[start..end];
    let trimmed = span.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = span.len() - span.trim_start().len();
    let begin = start + lead;
    sentences.push(Sentence {
        index: sentences.len(),
        text: trimmed,
        start: begin,
        end: begin + trimmed.len(),
    });
}
