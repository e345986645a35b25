use crate::index::error::IndexError;
use crate::index::types::{Corpus, CorpusBuilder, DEFAULT_MAX_CANDIDATES};
use crate::utils::progress::IndexSpinner;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Options controlling which files the indexer accepts.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Stop after this many files (soft cap, the rest are left out)
    pub max_candidates: usize,
    /// Index dot-files and descend into dot-directories
    pub include_hidden: bool,
    /// Honour .gitignore, .ignore and git exclude files
    pub respect_gitignore: bool,
    /// Descend into symlinked directories (links to files are always indexed)
    pub follow_symlinks: bool,
    /// Gitignore-style globs matched against root-relative paths
    pub ignore_patterns: Vec<String>,
    /// Directory names never descended into
    pub exclude_dirs: Vec<String>,
    /// Show a spinner on stderr while walking
    pub progress: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            include_hidden: true,
            respect_gitignore: false,
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
            exclude_dirs: default_exclude_dirs(),
            progress: false,
        }
    }
}

/// Version-control metadata directories
pub fn default_exclude_dirs() -> Vec<String> {
    [".git", ".hg", ".svn"].iter().map(|s| s.to_string()).collect()
}

/// Compile ignore patterns into a single matcher
pub fn compile_ignore_patterns(patterns: &[String]) -> Result<GlobSet, IndexError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| IndexError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| IndexError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Check that the root exists, is a directory and can be listed.
fn check_root(root: &Path) -> Result<(), IndexError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(IndexError::RootNotFound(root.to_path_buf()));
        }
        Err(source) => {
            return Err(IndexError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(IndexError::NotADirectory(root.to_path_buf()));
    }

    fs::read_dir(root).map_err(|source| IndexError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Join the components of a root-relative path with `/`
fn relative_path_string(rel: &Path) -> String {
    let mut out = String::new();
    for component in rel.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}

/// Regular files, or symlinks resolving to one. Dangling links and links to
/// directories are skipped.
fn is_regular_file(entry: &ignore::DirEntry) -> bool {
    match entry.file_type() {
        Some(t) if t.is_file() => true,
        Some(t) if t.is_symlink() => fs::metadata(entry.path()).is_ok_and(|m| m.is_file()),
        _ => false,
    }
}

/// Walk `root` and collect every regular file into a corpus.
///
/// Entries are visited sorted by file name so the corpus order is the same
/// from one run to the next. Unreadable subtrees are logged and skipped.
pub fn build_corpus(root: &Path, options: &IndexOptions) -> Result<Corpus, IndexError> {
    if options.max_candidates == 0 {
        return Err(IndexError::InvalidLimit);
    }
    check_root(root)?;

    let started = Instant::now();
    let ignore_set = compile_ignore_patterns(&options.ignore_patterns)?;

    let mut walk = WalkBuilder::new(root);
    walk.standard_filters(false)
        .hidden(!options.include_hidden)
        .parents(options.respect_gitignore)
        .ignore(options.respect_gitignore)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .require_git(false)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name(|a, b| a.cmp(b));

    let filter_root = root.to_path_buf();
    let exclude_dirs = options.exclude_dirs.clone();
    walk.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if is_dir {
            let name = entry.file_name().to_str();
            if exclude_dirs.iter().any(|d| Some(d.as_str()) == name) {
                return false;
            }
        }
        match entry.path().strip_prefix(&filter_root) {
            Ok(rel) => !ignore_set.is_match(rel),
            Err(_) => true,
        }
    });

    let spinner = options.progress.then(IndexSpinner::start);
    let mut builder = CorpusBuilder::new(options.max_candidates);
    let mut skipped_subtrees = 0;

    for result in walk.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                let err = IndexError::subtree(err);
                warn!("{}", err);
                skipped_subtrees += 1;
                continue;
            }
        };

        if !is_regular_file(&entry) {
            continue;
        }

        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        if !builder.push(relative_path_string(rel)) {
            debug!(
                "file ceiling of {} reached, remaining files are not indexed",
                options.max_candidates
            );
            break;
        }

        if let Some(ref spinner) = spinner {
            spinner.update(builder.len());
        }
    }

    let corpus = builder.finish(Some(PathBuf::from(root)), skipped_subtrees);

    if let Some(spinner) = spinner {
        spinner.finish(corpus.len());
    }

    debug!(
        root = %root.display(),
        files = corpus.len(),
        truncated = corpus.truncated(),
        skipped_subtrees,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "corpus built"
    );

    Ok(corpus)
}
