//! Ranking order and bounded top-k collection.
//!
//! Results are ordered by descending score, then by ascending path. Paths are
//! unique within a corpus, so this is a total order and the top-k set does not
//! depend on the order in which candidates were scored.

use crate::index::types::Candidate;
use crate::query::scorer::Score;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One ranked match. Borrows its candidate from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch<'a> {
    candidate: &'a Candidate,
    /// Relevance score
    pub score: Score,
    /// Matched char positions in the path, ascending
    pub positions: Vec<usize>,
}

impl<'a> PathMatch<'a> {
    pub fn new(candidate: &'a Candidate, score: Score, positions: Vec<usize>) -> Self {
        Self {
            candidate,
            score,
            positions,
        }
    }

    pub fn path(&self) -> &'a str {
        self.candidate.path()
    }

    pub fn candidate(&self) -> &'a Candidate {
        self.candidate
    }
}

/// Compare two matches in ranking order: `Less` means `a` is listed first.
pub fn rank_order(a: &PathMatch<'_>, b: &PathMatch<'_>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.path().cmp(b.path()))
}

/// Heap entry whose maximum is the worst-ranked match
struct Ranked<'a>(PathMatch<'a>);

impl PartialEq for Ranked<'_> {
    fn eq(&self, other: &Self) -> bool {
        rank_order(&self.0, &other.0) == Ordering::Equal
    }
}

impl Eq for Ranked<'_> {}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_order(&self.0, &other.0)
    }
}

/// Keeps the best `k` matches seen so far.
pub struct TopK<'a> {
    heap: BinaryHeap<Ranked<'a>>,
    capacity: usize,
}

impl<'a> TopK<'a> {
    pub fn new(k: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(4096)),
            capacity: k,
        }
    }

    /// Offer a match. Returns true if it is currently among the best `k`.
    pub fn insert(&mut self, m: PathMatch<'a>) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Ranked(m));
            return true;
        }
        let entry = Ranked(m);
        match self.heap.peek() {
            Some(worst) if entry < *worst => {
                self.heap.pop();
                self.heap.push(entry);
                true
            }
            _ => false,
        }
    }

    /// Fold another collector into this one
    pub fn merge(mut self, other: TopK<'a>) -> Self {
        for Ranked(m) in other.heap {
            self.insert(m);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consume the collector and return matches in ranking order
    pub fn into_sorted_vec(self) -> Vec<PathMatch<'a>> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Ranked(m)| m)
            .collect()
    }
}
