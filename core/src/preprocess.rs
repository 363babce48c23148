use crate::tokenizer::collapse_whitespace;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Everything except word characters, whitespace and periods.
    static ref NOISE: Regex = Regex::new(r"[^\w\s.]").expect("valid regex");
}

/// Normalize raw input before it reaches either summarization path.
///
/// Whitespace runs are collapsed first, then punctuation other than `.` is
/// removed, then the result is trimmed. Removing a symbol that sat between two
/// spaces therefore leaves a double space behind; sentence splitting collapses
/// it again later.
pub fn preprocess(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    NOISE.replace_all(&collapsed, "").trim().to_string()
}
