//! Surface text utilities
//!
//! Punctuation stripping, author keyword cleaning and stopword-free word
//! windows. These work on whitespace tokens only; there is no stemming or
//! tagging anywhere in the crate.

use super::stopwords::StopwordFilter;

/// Punctuation kept by [`strip_punctuation`] unless the caller says otherwise
pub const DEFAULT_PRESERVED: &str = "-_";

/// Connective used to join author keyword strings before cleaning
pub const KEYWORD_CONNECTIVE: &str = " and ";

/// Whether a character counts as punctuation for term extraction
///
/// ASCII punctuation plus any other visible non-alphanumeric character
/// (typographic quotes, dashes, symbols).
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace() && !c.is_control())
}

/// Remove punctuation characters, keeping any listed in `preserved`
pub fn strip_punctuation(text: &str, preserved: &str) -> String {
    text.chars()
        .filter(|&c| !is_punctuation(c) || preserved.contains(c))
        .collect()
}

/// Collapse whitespace runs into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an author-supplied keyword string
///
/// Lowercases, turns `,` and the word `and` into the `;` separator, drops
/// other punctuation (hyphens and underscores survive) and tidies whitespace
/// around separators. Empty entries between separators are removed.
pub fn clean_keyword_string(text: &str) -> String {
    let lowered = text.to_lowercase().replace(',', ";");
    let spaced = collapse_whitespace(&lowered);
    let separated = format!(" {spaced} ").replace(KEYWORD_CONNECTIVE, " ; ");
    let stripped = strip_punctuation(&separated, "-_;");

    stripped
        .split(';')
        .map(collapse_whitespace)
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}

/// All contiguous windows of `length` words that contain no stopword
///
/// Words are whitespace separated. Windows are returned in text order and
/// joined with single spaces.
pub fn windows(text: &str, length: usize, stopwords: &StopwordFilter) -> Vec<String> {
    if length == 0 {
        return Vec::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < length {
        return Vec::new();
    }

    words
        .windows(length)
        .filter(|window| !window.iter().any(|w| stopwords.is_stopword(w)))
        .map(|window| window.join(" "))
        .collect()
}

/// Number of whitespace-separated words in a term
pub fn word_count(term: &str) -> usize {
    term.split_whitespace().count()
}
