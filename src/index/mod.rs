pub mod build;
pub mod error;
pub mod types;

pub use build::{build_corpus, IndexOptions};
pub use error::IndexError;
pub use types::*;
