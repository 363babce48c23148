use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref TERMINATORS: Regex = Regex::new(r"[.!?]+").expect("valid regex");
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
}

/// Collapse every whitespace run (spaces, tabs, newlines) into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Split text into trimmed, non-empty sentences on runs of `.`, `!` and `?`.
///
/// Terminators are consumed, so a trailing `.` never yields an empty sentence.
pub fn sentence_split(text: &str) -> Vec<String> {
    let collapsed = collapse_whitespace(text);
    TERMINATORS
        .split(&collapsed)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased word stream with punctuation replaced by spaces. Duplicates are kept.
pub fn word_split(text: &str) -> Vec<String> {
    NON_WORD
        .replace_all(text, " ")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of whitespace-separated words, punctuation included.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
