use crate::index::types::Corpus;
use crate::query::parser::Query;
use crate::query::ranker::{PathMatch, TopK};
use crate::query::scorer::Scorer;
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

/// Corpora smaller than this are scored on the calling thread
const PARALLEL_THRESHOLD: usize = 1024;

/// Query executor
pub struct QueryExecutor<'a> {
    corpus: &'a Corpus,
    scorer: &'a Scorer,
    parallel: bool,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(corpus: &'a Corpus, scorer: &'a Scorer) -> Self {
        Self {
            corpus,
            scorer,
            parallel: true,
        }
    }

    /// Enable or disable parallel scoring
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Execute a query and return at most `limit` matches in ranking order
    pub fn execute(&self, query: &Query, limit: usize) -> Vec<PathMatch<'a>> {
        if limit == 0 || self.corpus.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let top = if self.parallel && self.corpus.len() >= PARALLEL_THRESHOLD {
            self.collect_parallel(query, limit)
        } else {
            self.collect_sequential(query, limit)
        };
        let results = top.into_sorted_vec();

        debug!(
            query = %query.text,
            candidates = self.corpus.len(),
            results = results.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "query executed"
        );

        results
    }

    fn collect_sequential(&self, query: &Query, limit: usize) -> TopK<'a> {
        let mut top = TopK::new(limit);
        for candidate in self.corpus.iter() {
            if let Some(s) = self.scorer.score(candidate, &query.chars) {
                top.insert(PathMatch::new(candidate, s.score, s.positions));
            }
        }
        top
    }

    fn collect_parallel(&self, query: &Query, limit: usize) -> TopK<'a> {
        let scorer = self.scorer;
        self.corpus
            .candidates()
            .par_iter()
            .filter_map(|candidate| {
                scorer
                    .score(candidate, &query.chars)
                    .map(|s| PathMatch::new(candidate, s.score, s.positions))
            })
            .fold(
                || TopK::new(limit),
                |mut top, m| {
                    top.insert(m);
                    top
                },
            )
            .reduce(|| TopK::new(limit), TopK::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parser::parse_query;
    use crate::utils::{fold_chars, is_subsequence};

    fn run(corpus: &Corpus, query: &str, limit: usize) -> Vec<String> {
        let scorer = Scorer::with_defaults();
        QueryExecutor::new(corpus, &scorer)
            .execute(&parse_query(query), limit)
            .iter()
            .map(|m| m.path().to_string())
            .collect()
    }

    fn synthetic_corpus(n: usize) -> Corpus {
        let dirs = ["src", "src/query", "tests", "benches", "docs/api"];
        let names = ["main", "lib", "query", "parser", "mod", "index_build", "QueryExecutor"];
        let exts = ["rs", "md", "toml"];
        let paths = (0..n).map(|i| {
            format!(
                "{}/{}_{}.{}",
                dirs[i % dirs.len()],
                names[(i / dirs.len()) % names.len()],
                i,
                exts[i % exts.len()]
            )
        });
        Corpus::from_paths(paths, n)
    }

    #[test]
    fn test_main_scenario() {
        let corpus = Corpus::from_paths(["src/main.rs", "src/lib.rs", "tests/main_test.rs"], 10);
        assert_eq!(run(&corpus, "main", 50), vec!["src/main.rs", "tests/main_test.rs"]);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::default();
        assert!(run(&corpus, "main", 50).is_empty());
        assert!(run(&corpus, "", 50).is_empty());
    }

    #[test]
    fn test_empty_query_returns_sorted_paths() {
        let corpus = Corpus::from_paths(["b/x.rs", "a.rs", "c.md", "a/z.rs"], 10);
        assert_eq!(run(&corpus, "   ", 50), vec!["a.rs", "a/z.rs", "b/x.rs", "c.md"]);
        assert_eq!(run(&corpus, "", 2), vec!["a.rs", "a/z.rs"]);
    }

    #[test]
    fn test_no_match() {
        let corpus = Corpus::from_paths(["src/main.rs", "src/lib.rs"], 10);
        assert!(run(&corpus, "qqq", 50).is_empty());
        assert!(run(&corpus, "src/main.rs/extra", 50).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        let corpus = Corpus::from_paths(["src/main.rs"], 10);
        assert!(run(&corpus, "main", 0).is_empty());
    }

    #[test]
    fn test_membership_is_exactly_subsequence() {
        let corpus = synthetic_corpus(300);
        for query in ["qe", "src/m", "PARSER", "mod_1", "d/a/i", "zz", "r.t"] {
            let results = run(&corpus, query, usize::MAX);
            let folded = fold_chars(query.trim());
            let expected: Vec<&str> = corpus
                .iter()
                .filter(|c| is_subsequence(&folded, c.lower()))
                .map(|c| c.path())
                .collect();
            assert_eq!(results.len(), expected.len(), "query {query:?}");
            for path in &expected {
                assert!(results.iter().any(|r| r == path), "{path} missing for {query:?}");
            }
        }
    }

    #[test]
    fn test_ranking_is_total_and_sorted() {
        let corpus = synthetic_corpus(500);
        let scorer = Scorer::with_defaults();
        let results = QueryExecutor::new(&corpus, &scorer).execute(&parse_query("qry"), 500);
        for pair in results.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.score > b.score || (a.score == b.score && a.path() < b.path()));
        }
    }

    #[test]
    fn test_cap_returns_top_k_prefix() {
        let corpus = synthetic_corpus(400);
        let all = run(&corpus, "src", usize::MAX);
        assert!(all.len() > 20);
        let capped = run(&corpus, "src", 20);
        assert_eq!(capped.len(), 20);
        assert_eq!(capped, all[..20].to_vec());
    }

    #[test]
    fn test_idempotent() {
        let corpus = synthetic_corpus(2000);
        assert_eq!(run(&corpus, "idx", 50), run(&corpus, "idx", 50));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let corpus = synthetic_corpus(5000);
        let scorer = Scorer::with_defaults();
        for query in ["main", "qe", "", "docs"] {
            let q = parse_query(query);
            let parallel = QueryExecutor::new(&corpus, &scorer).execute(&q, 50);
            let sequential = QueryExecutor::new(&corpus, &scorer)
                .parallel(false)
                .execute(&q, 50);
            assert_eq!(parallel, sequential, "query {query:?}");
        }
    }

    #[test]
    fn test_positions_reported() {
        let corpus = Corpus::from_paths(["src/main.rs"], 10);
        let scorer = Scorer::with_defaults();
        let results = QueryExecutor::new(&corpus, &scorer).execute(&parse_query("MAIN"), 10);
        assert_eq!(results[0].positions, vec![4, 5, 6, 7]);
    }
}
