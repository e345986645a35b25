//! # ffip - Fuzzy Find In Project
//!
//! ffip indexes every file path under a project root once, then answers
//! fuzzy queries against that snapshot over a line-oriented protocol. It is
//! meant to sit behind an editor plugin: the editor writes one query per
//! line and reads back ranked paths terminated by `END`.
//!
//! ## Architecture
//!
//! - [`index`] - Directory walk producing an immutable [`index::Corpus`]
//! - [`query`] - Subsequence matching, scoring and top-k ranking
//! - [`finder`] - The search context tying a corpus to its scorer and settings
//! - [`server`] - Request/response loop over stdin/stdout or a Unix socket
//! - [`output`] - Response formatting, optional match highlighting
//! - [`config`] - Settings file and defaults
//! - [`utils`] - Case folding and progress reporting
//!
//! ## Quick Start
//!
//! ```no_run
//! use ffip::config::FinderConfig;
//! use ffip::finder::Finder;
//! use std::path::Path;
//!
//! let finder = Finder::new(Path::new("/path/to/project"), FinderConfig::default())?;
//! for m in finder.find("main") {
//!     println!("{} ({})", m.path(), m.score);
//! }
//! # Ok::<(), ffip::index::IndexError>(())
//! ```
//!
//! ## Ranking
//!
//! A path matches when every query character appears in it, in order,
//! ignoring case. Matches are scored higher for contiguous runs, for hits at
//! the start of a path segment or word, for hits inside the filename, for an
//! early first hit and for shorter paths. Results are sorted by descending
//! score, ties broken by ascending path.

pub mod config;
pub mod finder;
pub mod index;
pub mod output;
pub mod query;
pub mod server;
pub mod utils;
