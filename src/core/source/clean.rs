//! Light cleanup of article markup.
//!
//! Unwraps wiki links to their visible text, then removes inline
//! reference tags, remaining bracketed spans (footnote markers, external
//! links) and list or table lines, leaving running prose for the
//! sentence splitter.

use once_cell::sync::Lazy;
use regex::Regex;

static REF_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<ref( [^>]*)?>([^<>]*</ref>)?").unwrap());

/// `[[target]]` or `[[target|label]]`; the last segment is the visible text
static WIKILINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(?:[^\[\]]*\|)?([^\[\]|]*)\]\]").unwrap());

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]").unwrap());

static LIST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:\{\||\*|\||#|\}\})[^\n]*(?:\n|$)").unwrap()
});

/// Replace wiki links with their visible text
pub fn unwrap_links(text: &str) -> String {
    WIKILINK.replace_all(text, "$1").into_owned()
}

/// Remove `<ref>` tags (with their content) and bracketed spans
///
/// Wiki links are unwrapped first so their text survives.
pub fn remove_refs(text: &str) -> String {
    let text = unwrap_links(text);
    let text = REF_TAG.replace_all(&text, "");
    BRACKETED.replace_all(&text, "").into_owned()
}

/// Remove bullet, numbered, and table lines
pub fn remove_lists(text: &str) -> String {
    LIST_LINE.replace_all(text, "").into_owned()
}

/// Apply every cleanup step
pub fn clean_markup(text: &str) -> String {
    remove_lists(&remove_refs(text))
}
