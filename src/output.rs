//! Response formatting for the line protocol

use crate::query::ranker::PathMatch;
use std::io;
use std::ops::Range;
use termcolor::{Color, ColorSpec, WriteColor};

/// Line that terminates every response
pub const END_MARKER: &str = "END";

/// Write one response block: each matched path on its own line followed by
/// `END`. An empty result is written as a single blank line before `END`.
///
/// With `highlight` set, matched characters are coloured; writers created
/// with `ColorChoice::Never` (or wrapped in `NoColor`) ignore the colours.
pub fn write_response<W: WriteColor>(
    out: &mut W,
    matches: &[PathMatch<'_>],
    highlight: bool,
) -> io::Result<()> {
    if matches.is_empty() {
        writeln!(out)?;
    }

    for m in matches {
        if highlight {
            write_highlighted_path(out, m.path(), &m.positions)?;
        } else {
            out.write_all(m.path().as_bytes())?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", END_MARKER)?;
    out.flush()
}

/// Print a path with the matched runs highlighted
fn write_highlighted_path<W: WriteColor>(
    out: &mut W,
    path: &str,
    positions: &[usize],
) -> io::Result<()> {
    let mut cursor = 0;
    for range in highlight_ranges(path, positions) {
        write!(out, "{}", &path[cursor..range.start])?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", &path[range.clone()])?;
        out.reset()?;
        cursor = range.end;
    }
    write!(out, "{}", &path[cursor..])
}

/// Merge matched char positions into byte ranges of contiguous runs.
///
/// Positions past the end of `path` are ignored.
pub fn highlight_ranges(path: &str, positions: &[usize]) -> Vec<Range<usize>> {
    let offsets: Vec<(usize, char)> = path.char_indices().collect();
    let mut ranges: Vec<Range<usize>> = Vec::new();

    for &pos in positions {
        let Some(&(start, c)) = offsets.get(pos) else {
            continue;
        };
        let end = start + c.len_utf8();
        match ranges.last_mut() {
            Some(last) if last.end == start => last.end = end,
            _ => ranges.push(start..end),
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::Candidate;
    use termcolor::{Ansi, NoColor};

    fn render(matches: &[PathMatch<'_>], highlight: bool) -> String {
        let mut out = NoColor::new(Vec::new());
        write_response(&mut out, matches, highlight).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_response() {
        let a = Candidate::new("src/main.rs");
        let b = Candidate::new("tests/main_test.rs");
        let matches = vec![
            PathMatch::new(&a, 10, vec![4, 5, 6, 7]),
            PathMatch::new(&b, 5, vec![6, 7, 8, 9]),
        ];
        assert_eq!(render(&matches, false), "src/main.rs\ntests/main_test.rs\nEND\n");
    }

    #[test]
    fn test_empty_response_has_blank_line() {
        assert_eq!(render(&[], false), "\nEND\n");
        assert_eq!(render(&[], true), "\nEND\n");
    }

    #[test]
    fn test_highlight_without_color_is_plain() {
        let a = Candidate::new("src/main.rs");
        let matches = vec![PathMatch::new(&a, 10, vec![4, 5, 6, 7])];
        assert_eq!(render(&matches, true), "src/main.rs\nEND\n");
    }

    #[test]
    fn test_highlight_with_ansi() {
        let a = Candidate::new("src/main.rs");
        let matches = vec![PathMatch::new(&a, 10, vec![4, 5, 6, 7])];
        let mut out = Ansi::new(Vec::new());
        write_response(&mut out, &matches, true).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.starts_with("src/\x1b["));
        assert!(text.contains("main\x1b[0m.rs\n"));
        assert!(text.ends_with("END\n"));
    }

    #[test]
    fn test_highlight_ranges_merge_runs() {
        assert_eq!(highlight_ranges("src/main.rs", &[0, 4, 5, 6, 7]), vec![0..1, 4..8]);
        assert!(highlight_ranges("abc", &[]).is_empty());
        assert_eq!(highlight_ranges("abc", &[2, 9]), vec![2..3]);
    }

    #[test]
    fn test_highlight_ranges_multibyte() {
        // 'Ü' is two bytes, so char 1 starts at byte 2
        assert_eq!(highlight_ranges("Üb/x", &[0, 1]), vec![0..3]);
        assert_eq!(highlight_ranges("Üb/x", &[1]), vec![2..3]);
    }
}
