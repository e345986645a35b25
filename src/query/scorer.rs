//! Fuzzy path scoring
//!
//! A candidate matches when the folded query is a subsequence of the folded
//! path. Among all ways to place the query characters, the scorer picks the
//! alignment with the highest total using a dynamic program over
//! (query index, path index). Each placed character earns:
//! - a base score
//! - a boundary bonus (segment start > word start > camelCase hump > inner)
//! - a filename bonus when it lies in the last path segment
//! - a consecutive bonus that grows with the length of the current run, so a
//!   run of L characters is worth more than L isolated ones
//!
//! The alignment total is then adjusted by a bonus for an early first match
//! and a small penalty per path character.

use crate::index::types::{Candidate, CharClass};
use crate::utils::is_subsequence;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Relevance score. Integer so that equal scores compare exactly.
pub type Score = i64;

/// Score given to every candidate by an empty query
pub const BASELINE_SCORE: Score = 0;

/// Largest magnitude accepted for a single weight
pub const MAX_WEIGHT: Score = 1 << 20;

/// Configurable weights for scoring factors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Score for every matched character
    pub match_base: Score,
    /// Bonus for a match at the path start or right after `/`
    pub segment_start_bonus: Score,
    /// Bonus for a match right after `_`, `-`, `.` or a space
    pub word_start_bonus: Score,
    /// Bonus for a match on a lower-to-upper case transition
    pub camel_case_bonus: Score,
    /// Bonus for a match inside the filename segment
    pub filename_bonus: Score,
    /// Added per preceding character of the same contiguous run
    pub consecutive_bonus: Score,
    /// Bonus for a first match at position 0, minus one per position after
    pub first_match_bonus: Score,
    /// Subtracted per character of the candidate path
    pub length_penalty: Score,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            match_base: 16,
            segment_start_bonus: 32,
            word_start_bonus: 24,
            camel_case_bonus: 16,
            filename_bonus: 16,
            consecutive_bonus: 16,
            first_match_bonus: 15,
            length_penalty: 1,
        }
    }
}

impl ScoringWeights {
    /// First weight outside `-MAX_WEIGHT..=MAX_WEIGHT`, by field name
    pub fn out_of_range(&self) -> Option<(&'static str, Score)> {
        [
            ("match_base", self.match_base),
            ("segment_start_bonus", self.segment_start_bonus),
            ("word_start_bonus", self.word_start_bonus),
            ("camel_case_bonus", self.camel_case_bonus),
            ("filename_bonus", self.filename_bonus),
            ("consecutive_bonus", self.consecutive_bonus),
            ("first_match_bonus", self.first_match_bonus),
            ("length_penalty", self.length_penalty),
        ]
        .into_iter()
        .find(|(_, w)| !(-MAX_WEIGHT..=MAX_WEIGHT).contains(w))
    }
}

/// Score and matched char positions of one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathScore {
    pub score: Score,
    /// Ascending char indices into the candidate path
    pub positions: Vec<usize>,
}

/// Scorer calculates relevance scores for candidate paths
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Create a scorer with default weights
    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `candidate` against a folded query.
    ///
    /// Returns `None` when the query is not a subsequence of the path. An
    /// empty query matches with [`BASELINE_SCORE`] and no positions.
    pub fn score(&self, candidate: &Candidate, query: &[char]) -> Option<PathScore> {
        if query.is_empty() {
            return Some(PathScore {
                score: BASELINE_SCORE,
                positions: Vec::new(),
            });
        }

        let path = candidate.lower();
        if query.len() > path.len() || !is_subsequence(query, path) {
            return None;
        }

        let (total, positions) =
            SCRATCH.with(|scratch| self.align(candidate, query, &mut scratch.borrow_mut()))?;
        let first = *positions.first()?;
        let score = total
            .saturating_add(self.first_match_bonus(first))
            .saturating_sub(self.length_penalty(candidate.len()));

        Some(PathScore { score, positions })
    }

    /// Best alignment of `query` within the candidate.
    ///
    /// Query char `i` can only sit at path index `i + k` for `k < width`,
    /// where `width = n - m + 1`. Only the previous row of cells is kept; the
    /// predecessor offsets of every row are kept for the backtrack.
    fn align(
        &self,
        candidate: &Candidate,
        query: &[char],
        scratch: &mut AlignScratch,
    ) -> Option<(Score, Vec<usize>)> {
        let path = candidate.lower();
        let m = query.len();
        let width = path.len() - m + 1;
        scratch.reset(m, width);
        let AlignScratch { prev, cur, from } = scratch;

        for (i, &qc) in query.iter().enumerate() {
            cur.fill(None);
            // Best cell of the previous row left of the adjacent one
            let mut gap: Option<(Cell, usize)> = None;

            for k in 0..width {
                if i > 0 && k > 0 {
                    if let Some(c) = prev[k - 1] {
                        if gap.is_none_or(|(g, _)| c.score > g.score) {
                            gap = Some((c, k - 1));
                        }
                    }
                }

                let j = i + k;
                if path[j] != qc {
                    continue;
                }

                if i == 0 {
                    cur[k] = Some(Cell {
                        score: self.char_score(candidate, j, 1),
                        run: 1,
                    });
                    continue;
                }

                let mut here = prev[k].map(|adjacent| {
                    let run = adjacent.run + 1;
                    let score = adjacent
                        .score
                        .saturating_add(self.char_score(candidate, j, run));
                    (Cell { score, run }, k)
                });

                if let Some((g, g_k)) = gap {
                    let score = g.score.saturating_add(self.char_score(candidate, j, 1));
                    if here.is_none_or(|(h, _)| score > h.score) {
                        here = Some((Cell { score, run: 1 }, g_k));
                    }
                }

                if let Some((cell, prev_k)) = here {
                    cur[k] = Some(cell);
                    from[i * width + k] = prev_k as u32;
                }
            }

            std::mem::swap(prev, cur);
        }

        // `prev` now holds the last row; earliest cell wins ties
        let mut end: Option<(usize, Score)> = None;
        for (k, c) in prev.iter().enumerate() {
            if let Some(c) = c {
                if end.is_none_or(|(_, best)| c.score > best) {
                    end = Some((k, c.score));
                }
            }
        }
        let (mut k, total) = end?;

        let mut positions = vec![0; m];
        for i in (0..m).rev() {
            positions[i] = i + k;
            if i > 0 {
                k = from[i * width + k] as usize;
            }
        }

        Some((total, positions))
    }

    /// Score of one matched char at path index `j`, being the `run`-th char of
    /// a contiguous run.
    fn char_score(&self, candidate: &Candidate, j: usize, run: u32) -> Score {
        let w = &self.weights;
        let boundary = match candidate.classes()[j] {
            CharClass::SegmentStart => w.segment_start_bonus,
            CharClass::WordStart => w.word_start_bonus,
            CharClass::CamelCase => w.camel_case_bonus,
            CharClass::Inner => 0,
        };
        let filename = if j >= candidate.filename_start() {
            w.filename_bonus
        } else {
            0
        };

        w.match_base
            .saturating_add(boundary)
            .saturating_add(filename)
            .saturating_add(w.consecutive_bonus.saturating_mul(Score::from(run) - 1))
    }

    fn first_match_bonus(&self, position: usize) -> Score {
        let position = Score::try_from(position).unwrap_or(Score::MAX);
        self.weights.first_match_bonus.saturating_sub(position).max(0)
    }

    fn length_penalty(&self, len: usize) -> Score {
        let len = Score::try_from(len).unwrap_or(Score::MAX);
        self.weights.length_penalty.saturating_mul(len)
    }
}

/// Best partial alignment ending at one cell
#[derive(Debug, Clone, Copy)]
struct Cell {
    score: Score,
    /// Length of the contiguous run ending here
    run: u32,
}

/// Alignment buffers, grown to the largest candidate seen and reused.
#[derive(Debug, Default)]
struct AlignScratch {
    prev: Vec<Option<Cell>>,
    cur: Vec<Option<Cell>>,
    /// Predecessor offset in the previous row, per (row, offset)
    from: Vec<u32>,
}

impl AlignScratch {
    fn reset(&mut self, rows: usize, width: usize) {
        self.prev.clear();
        self.prev.resize(width, None);
        self.cur.clear();
        self.cur.resize(width, None);
        // Only cells written in this call are read back
        if self.from.len() < rows * width {
            self.from.resize(rows * width, 0);
        }
    }
}

thread_local! {
    static SCRATCH: RefCell<AlignScratch> = RefCell::new(AlignScratch::default());
}
