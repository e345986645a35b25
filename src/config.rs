//! Finder configuration.
//!
//! Settings are read from a JSON file (by default
//! `<config dir>/ffip/config.json`) and then overridden by command-line
//! flags. Every field is optional in the file.

use crate::index::build::{compile_ignore_patterns, default_exclude_dirs, IndexOptions};
use crate::index::types::DEFAULT_MAX_CANDIDATES;
use crate::query::scorer::{ScoringWeights, MAX_WEIGHT};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "ffip";
const CONFIG_FILE: &str = "config.json";

/// Default number of results per query
pub const DEFAULT_RESULT_LIMIT: usize = 50;

/// Configuration for indexing and matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Maximum number of files to index
    pub max_candidates: usize,
    /// Maximum number of results per query
    pub result_limit: usize,
    /// Index dot-files and dot-directories
    pub include_hidden: bool,
    /// Skip files excluded by .gitignore / .ignore
    pub respect_gitignore: bool,
    /// Follow symbolic links while indexing
    pub follow_symlinks: bool,
    /// Gitignore-style globs to leave out of the index
    pub ignore_patterns: Vec<String>,
    /// Directory names never descended into
    pub exclude_dirs: Vec<String>,
    /// Score candidates on the rayon thread pool
    pub parallel: bool,
    /// Scoring weights
    pub weights: ScoringWeights,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            result_limit: DEFAULT_RESULT_LIMIT,
            include_hidden: true,
            respect_gitignore: false,
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
            exclude_dirs: default_exclude_dirs(),
            parallel: true,
            weights: ScoringWeights::default(),
        }
    }
}

impl FinderConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FinderConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load config from the default location, or return defaults if there is none
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject settings the indexer or matcher cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_candidates == 0 {
            bail!("max_candidates must be positive");
        }
        if self.result_limit == 0 {
            bail!("result_limit must be positive");
        }
        if let Some((name, value)) = self.weights.out_of_range() {
            bail!("weights.{name} = {value} is outside -{MAX_WEIGHT}..={MAX_WEIGHT}");
        }
        compile_ignore_patterns(&self.ignore_patterns)?;
        Ok(())
    }

    /// Indexer options derived from this config
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            max_candidates: self.max_candidates,
            include_hidden: self.include_hidden,
            respect_gitignore: self.respect_gitignore,
            follow_symlinks: self.follow_symlinks,
            ignore_patterns: self.ignore_patterns.clone(),
            exclude_dirs: self.exclude_dirs.clone(),
            progress: false,
        }
    }
}

/// `<config dir>/ffip/config.json`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = FinderConfig::default();
        assert_eq!(config.max_candidates, 50_000);
        assert_eq!(config.result_limit, 50);
        assert!(config.include_hidden);
        assert!(!config.respect_gitignore);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "result_limit": 10, "ignore_patterns": ["*.o"], "weights": { "length_penalty": 3 } }"#,
        )
        .unwrap();

        let config = FinderConfig::load(&path).unwrap();
        assert_eq!(config.result_limit, 10);
        assert_eq!(config.max_candidates, 50_000);
        assert_eq!(config.ignore_patterns, vec!["*.o".to_string()]);
        assert_eq!(config.weights.length_penalty, 3);
        assert_eq!(config.weights.match_base, ScoringWeights::default().match_base);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FinderConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file() {
        let err = FinderConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = FinderConfig {
            result_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FinderConfig {
            max_candidates: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_weights() {
        let mut config = FinderConfig::default();
        config.weights.length_penalty = -MAX_WEIGHT;
        assert!(config.validate().is_ok());

        config.weights.match_base = i64::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("weights.match_base"));
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let config = FinderConfig {
            ignore_patterns: vec!["src/[".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_index_options_follow_config() {
        let config = FinderConfig {
            max_candidates: 7,
            include_hidden: false,
            ..Default::default()
        };
        let options = config.index_options();
        assert_eq!(options.max_candidates, 7);
        assert!(!options.include_hidden);
        assert!(!options.progress);
    }
}
