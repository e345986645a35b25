//! Query normalisation
//!
//! A query line is trimmed and folded to lowercase one char at a time. There
//! is no query syntax: every remaining character, including spaces and
//! control characters, must appear in order in a matching path.

use crate::utils::fold_chars;

/// A normalised query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Trimmed query text, original case
    pub text: String,
    /// Lowercased chars of `text`
    pub chars: Vec<char>,
}

impl Query {
    /// An empty query matches every candidate
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }
}

/// Parse one request line into a query
pub fn parse_query(input: &str) -> Query {
    let text = input.trim().to_string();
    let chars = fold_chars(&text);
    Query { text, chars }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        let q = parse_query("  MainRS \t\r\n");
        assert_eq!(q.text, "MainRS");
        assert_eq!(q.chars, vec!['m', 'a', 'i', 'n', 'r', 's']);
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn test_blank_query_is_empty() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("   \t").is_empty());
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        let q = parse_query(" a b ");
        assert_eq!(q.chars, vec!['a', ' ', 'b']);
    }

    #[test]
    fn test_control_characters_are_kept() {
        let q = parse_query("a\u{1}b");
        assert_eq!(q.len(), 3);
    }
}
