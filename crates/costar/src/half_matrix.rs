//! Half-matrix counting over the global actor order.
//!
//! Only pairs `(x, y)` with `x` ranked before `y` are visited, so each
//! co-occurrence is counted exactly once: `k * (k - 1) / 2` increments per
//! movie and no collapsing afterwards.

use crate::roster::{Roster, for_each_half_pair};
use crate::traits::DuoStrategy;
use crate::types::PairCounts;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct HalfMatrix;

impl HalfMatrix {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip_all, fields(movies = roster.movie_count()))]
    pub fn tally(&self, roster: &Roster) -> PairCounts {
        let mut counts = PairCounts::new();

        for cast in roster.casts() {
            for_each_half_pair(cast, |pair| {
                *counts.entry(pair).or_insert(0) += 1;
            });
        }

        debug!(pairs = counts.len(), "Half-matrix tally complete");
        counts
    }
}

impl DuoStrategy for HalfMatrix {
    fn name(&self) -> &str {
        "half-matrix"
    }

    fn pair_counts(&self, roster: &Roster) -> PairCounts {
        self.tally(roster)
    }
}
