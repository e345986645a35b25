//! Utility functions shared by the indexer and the matcher.
//!
//! ## Modules
//!
//! - [`progress`] - Spinner shown while indexing (no-op without the `progress` feature)
//!
//! ## Case folding
//!
//! Both candidate paths and queries are folded one character at a time, so a
//! folded path always has exactly as many `char`s as the original and match
//! positions can be reported against the original string.
//!
//! ```
//! use ffip::utils::fold_char;
//!
//! assert_eq!(fold_char('A'), 'a');
//! assert_eq!(fold_char('/'), '/');
//! ```

pub mod progress;

/// Simple per-character lowercase mapping.
///
/// Characters whose lowercase form expands to several chars keep only the
/// first one.
#[inline]
pub fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    c.to_lowercase().next().unwrap_or(c)
}

/// Fold every character of `text`, keeping a 1:1 char mapping.
pub fn fold_chars(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

/// Returns true if `needle` appears in order (not necessarily contiguously)
/// within `haystack`.
pub fn is_subsequence(needle: &[char], haystack: &[char]) -> bool {
    let mut remaining = needle.iter().peekable();
    for c in haystack {
        match remaining.peek() {
            Some(&&n) if n == *c => {
                remaining.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    remaining.peek().is_none()
}
