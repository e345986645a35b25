//! The process-wide search context: one corpus snapshot plus the scorer and
//! settings used to query it.

use crate::config::FinderConfig;
use crate::index::build::build_corpus;
use crate::index::error::IndexError;
use crate::index::types::Corpus;
use crate::query::executor::QueryExecutor;
use crate::query::parser::parse_query;
use crate::query::ranker::PathMatch;
use crate::query::scorer::Scorer;
use std::path::Path;

pub struct Finder {
    corpus: Corpus,
    scorer: Scorer,
    config: FinderConfig,
}

impl Finder {
    /// Index `root` and build a finder over it
    pub fn new(root: &Path, config: FinderConfig) -> Result<Self, IndexError> {
        Self::with_progress(root, config, false)
    }

    /// Like [`Finder::new`], optionally showing a spinner while indexing
    pub fn with_progress(
        root: &Path,
        config: FinderConfig,
        progress: bool,
    ) -> Result<Self, IndexError> {
        let mut options = config.index_options();
        options.progress = progress;
        let corpus = build_corpus(root, &options)?;
        Ok(Self::from_corpus(corpus, config))
    }

    /// Wrap an already built corpus
    pub fn from_corpus(corpus: Corpus, config: FinderConfig) -> Self {
        let scorer = Scorer::new(config.weights.clone());
        Self {
            corpus,
            scorer,
            config,
        }
    }

    /// Answer one query line with the configured result limit
    pub fn find(&self, query: &str) -> Vec<PathMatch<'_>> {
        self.find_with_limit(query, self.config.result_limit)
    }

    /// Answer one query line, returning at most `limit` matches
    pub fn find_with_limit(&self, query: &str, limit: usize) -> Vec<PathMatch<'_>> {
        let query = parse_query(query);
        QueryExecutor::new(&self.corpus, &self.scorer)
            .parallel(self.config.parallel)
            .execute(&query, limit)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }
}
