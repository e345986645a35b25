#![no_main]

use arbitrary::Arbitrary;
use ffip::index::Candidate;
use ffip::query::{parse_query, Scorer};
use ffip::utils::is_subsequence;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    path: &'a str,
    query: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    // A score exists exactly when the folded query is a subsequence of the
    // folded path, and its positions point at matching chars
    let candidate = Candidate::new(input.path);
    let query = parse_query(input.query);
    let scored = Scorer::with_defaults().score(&candidate, &query.chars);

    assert_eq!(scored.is_some(), is_subsequence(&query.chars, candidate.lower()));

    if let Some(s) = scored {
        assert_eq!(s.positions.len(), query.chars.len());
        assert!(s.positions.windows(2).all(|w| w[0] < w[1]));
        for (q, &p) in query.chars.iter().zip(&s.positions) {
            assert_eq!(candidate.lower()[p], *q);
        }
    }
});
