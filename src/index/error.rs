//! Error types for corpus indexing.

use std::path::{Path, PathBuf};

/// Errors raised while building a corpus.
///
/// Every variant except [`IndexError::SubtreeUnreadable`] aborts indexing.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The root directory does not exist.
    #[error("Root directory does not exist: {0}")]
    RootNotFound(PathBuf),

    /// The root path exists but is not a directory.
    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The root directory exists but cannot be listed.
    #[error("Failed to read root directory '{path}': {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Part of the tree could not be read; the walk skips it and continues.
    #[error("Skipping unreadable subtree '{}': {source}", display_path(.path))]
    SubtreeUnreadable {
        path: Option<PathBuf>,
        #[source]
        source: ignore::Error,
    },

    /// A gitignore-style ignore pattern failed to compile.
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The candidate ceiling must be at least one.
    #[error("Maximum file count must be positive")]
    InvalidLimit,
}

impl IndexError {
    /// Wrap a walker error, pulling out the path it refers to when there is one.
    pub fn subtree(source: ignore::Error) -> Self {
        let path = error_path(&source).map(Path::to_path_buf);
        IndexError::SubtreeUnreadable { path, source }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtree_error_extracts_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ignore::Error::WithDepth {
            depth: 2,
            err: Box::new(ignore::Error::WithPath {
                path: PathBuf::from("/project/secret"),
                err: Box::new(ignore::Error::Io(io)),
            }),
        };

        let wrapped = IndexError::subtree(err);
        match &wrapped {
            IndexError::SubtreeUnreadable { path, .. } => {
                assert_eq!(path.as_deref(), Some(Path::new("/project/secret")));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(wrapped.to_string().contains("/project/secret"));
    }

    #[test]
    fn test_subtree_error_without_path() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let wrapped = IndexError::subtree(ignore::Error::Io(io));
        assert!(wrapped.to_string().contains("<unknown>"));
    }
}
