//! Free-text input sanitization.
//!
//! Applied on every user-supplied string before it reaches a prompt or a
//! response body. Server-side sanitization is authoritative; clients may
//! sanitize again as defense in depth.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum items kept in a sanitized list.
pub const MAX_LIST_ITEMS: usize = 10;
/// Maximum length of a single list item.
pub const MAX_LIST_ITEM_LEN: usize = 50;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("valid regex"));

/// Trims, truncates to `max_len` characters, and removes markup.
///
/// Complete tags (`<name ...>` or `</name>`) are removed whole; any stray
/// `<` or `>` (a comparison operator, a tag split by truncation) is stripped
/// character-wise, preserving the text between them. Never fails: empty or
/// whitespace-only input yields an empty string.
pub fn sanitize_text(raw: &str, max_len: usize) -> String {
    let truncated: String = raw.trim().chars().take(max_len).collect();
    let without_tags = MARKUP_TAG.replace_all(&truncated, "");
    without_tags.chars().filter(|c| *c != '<' && *c != '>').collect()
}

/// Sanitizes a list of free-text items.
///
/// Keeps non-empty entries, sanitizes each to `MAX_LIST_ITEM_LEN`, drops
/// entries that become empty after sanitization (a bare markup tag sanitizes
/// to nothing), and caps the result at `MAX_LIST_ITEMS`. Duplicates are
/// preserved.
pub fn sanitize_list(raw: &[String]) -> Vec<String> {
    raw.iter()
        .filter(|item| !item.is_empty())
        .map(|item| sanitize_text(item, MAX_LIST_ITEM_LEN))
        .filter(|item| !item.is_empty())
        .take(MAX_LIST_ITEMS)
        .collect()
}
