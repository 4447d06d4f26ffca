//! Text analysis shared by the index, the lexicon filter, and the classifier.
//!
//! The analyzer lowercases and splits on any character that is not
//! alphanumeric. Index backends analyze field text and query text with the
//! same function.

/// Split `text` into alphanumeric runs without changing case.
pub fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
}

/// Analyze `text` into lowercase terms.
pub fn analyze(text: &str) -> Vec<String> {
    word_tokens(text).map(str::to_lowercase).collect()
}

/// Lowercase, trim, and collapse internal whitespace.
///
/// Used for exact comparisons such as filler-token overrides and distinct
/// query counting.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
