//! Line-oriented query server
//!
//! Protocol:
//! - one request per line: the query (leading/trailing whitespace ignored)
//! - the response is every matched path on its own line, then `END`
//! - an empty result is a single blank line, then `END`
//! - the session ends at end of input; a final line without a newline is
//!   treated as end of input and not answered
//!
//! The same loop serves stdin/stdout and, on Unix, socket connections.

#[cfg(unix)]
pub mod listener;

use crate::finder::Finder;
use crate::output::write_response;
use anyhow::{Context, Result};
use std::io::BufRead;
use termcolor::WriteColor;
use tracing::debug;

/// Counters for one protocol session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Requests answered
    pub queries: u64,
    /// Requests that matched nothing
    pub empty_responses: u64,
}

/// Answer queries from `reader` on `writer` until end of input.
pub fn serve_lines<R, W>(
    finder: &Finder,
    reader: &mut R,
    writer: &mut W,
    highlight: bool,
) -> Result<SessionStats>
where
    R: BufRead,
    W: WriteColor,
{
    let mut stats = SessionStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read request")?;
        if read == 0 || buf.last() != Some(&b'\n') {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let matches = finder.find(&line);
        if matches.is_empty() {
            stats.empty_responses += 1;
        }
        write_response(writer, &matches, highlight).context("Failed to write response")?;
        stats.queries += 1;
    }

    debug!(
        queries = stats.queries,
        empty = stats.empty_responses,
        "session finished"
    );
    Ok(stats)
}

/// Answer a single query and return
pub fn answer_once<W: WriteColor>(
    finder: &Finder,
    query: &str,
    writer: &mut W,
    highlight: bool,
) -> Result<()> {
    let matches = finder.find(query);
    write_response(writer, &matches, highlight).context("Failed to write response")
}
