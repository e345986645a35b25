use crate::utils::fold_char;
use rustc_hash::FxHashSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Default ceiling on the number of indexed files
pub const DEFAULT_MAX_CANDIDATES: usize = 50_000;

/// Boundary class of a single path character, computed once at index time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// First char of the path, or first char after a `/`
    SegmentStart,
    /// First char after `_`, `-`, `.` or a space
    WordStart,
    /// Uppercase char following a lowercase one (`fooBar`)
    CamelCase,
    /// Anything else, including separators themselves
    Inner,
}

impl CharClass {
    fn classify(prev: Option<char>, current: char) -> Self {
        match prev {
            None | Some('/') => CharClass::SegmentStart,
            Some('_' | '-' | '.' | ' ') => CharClass::WordStart,
            Some(p) if p.is_lowercase() && current.is_uppercase() => CharClass::CamelCase,
            Some(_) => CharClass::Inner,
        }
    }
}

/// One indexed file path with precomputed match metadata.
///
/// Paths are relative to the project root and always use `/` as separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    path: String,
    lower: Vec<char>,
    classes: Vec<CharClass>,
    segments: Vec<Range<usize>>,
    filename_start: usize,
}

impl Candidate {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();

        let mut lower = Vec::with_capacity(path.len());
        let mut classes = Vec::with_capacity(path.len());
        let mut segments = Vec::new();
        let mut segment_start = 0;
        let mut prev = None;

        for (idx, c) in path.chars().enumerate() {
            lower.push(fold_char(c));
            classes.push(CharClass::classify(prev, c));
            if c == '/' {
                segments.push(segment_start..idx);
                segment_start = idx + 1;
            }
            prev = Some(c);
        }
        segments.push(segment_start..lower.len());

        Self {
            path,
            lower,
            classes,
            segments,
            filename_start: segment_start,
        }
    }

    /// The path as indexed
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lowercased path, one char per char of [`Candidate::path`]
    pub fn lower(&self) -> &[char] {
        &self.lower
    }

    pub fn classes(&self) -> &[CharClass] {
        &self.classes
    }

    /// Char ranges of every segment; the last one is the filename
    pub fn segments(&self) -> &[Range<usize>] {
        &self.segments
    }

    /// Char offset where the filename segment begins
    pub fn filename_start(&self) -> usize {
        self.filename_start
    }

    /// Path length in chars
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// The final path segment
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Immutable, ordered set of candidates for one project root.
#[derive(Debug, Default)]
pub struct Corpus {
    root: Option<PathBuf>,
    candidates: Vec<Candidate>,
    truncated: bool,
    skipped_subtrees: usize,
}

impl Corpus {
    /// Build a corpus from in-memory paths, applying the same dedupe and cap
    /// rules as the directory indexer.
    pub fn from_paths<I, S>(paths: I, max_candidates: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = CorpusBuilder::new(max_candidates);
        for path in paths {
            if !builder.push(path.into()) {
                break;
            }
        }
        builder.finish(None, 0)
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether files were left out because the ceiling was reached
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Number of subtrees skipped because they could not be read
    pub fn skipped_subtrees(&self) -> usize {
        self.skipped_subtrees
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Accumulates candidates in insertion order, dropping duplicates and
/// refusing new paths once the ceiling is reached.
pub(crate) struct CorpusBuilder {
    max_candidates: usize,
    seen: FxHashSet<String>,
    candidates: Vec<Candidate>,
    truncated: bool,
}

impl CorpusBuilder {
    pub(crate) fn new(max_candidates: usize) -> Self {
        Self {
            max_candidates,
            seen: FxHashSet::default(),
            candidates: Vec::new(),
            truncated: false,
        }
    }

    /// Add a path. Returns false once the ceiling has been hit and the path
    /// was rejected; callers should stop feeding paths at that point.
    pub(crate) fn push(&mut self, path: String) -> bool {
        if self.seen.contains(&path) {
            return true;
        }
        if self.candidates.len() >= self.max_candidates {
            self.truncated = true;
            return false;
        }
        self.seen.insert(path.clone());
        self.candidates.push(Candidate::new(path));
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.candidates.len()
    }

    pub(crate) fn finish(self, root: Option<PathBuf>, skipped_subtrees: usize) -> Corpus {
        Corpus {
            root,
            candidates: self.candidates,
            truncated: self.truncated,
            skipped_subtrees,
        }
    }
}
