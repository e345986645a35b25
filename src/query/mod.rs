pub mod executor;
pub mod parser;
pub mod ranker;
pub mod scorer;

pub use executor::QueryExecutor;
pub use parser::{parse_query, Query};
pub use ranker::{rank_order, PathMatch, TopK};
pub use scorer::{PathScore, Score, Scorer, ScoringWeights, BASELINE_SCORE};
