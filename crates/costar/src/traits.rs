//! Core trait shared by the duo-counting strategies.

use crate::roster::Roster;
use crate::types::{DuoCount, PairCounts, best_of};

/// What a strategy run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Winning pair, `None` when no movie has two or more actors
    pub best: Option<DuoCount>,
    /// Entries in the strategy's top-level count map: ordered pairs,
    /// unordered pairs, or graph rows for the sharded strategy
    pub map_size: usize,
}

/// A way of counting how many movies each pair of actors shares.
///
/// Implementations differ in cost, not in results: for the same roster they
/// all return the same counts and the same winning pair.
///
/// ## Design Note
/// - `Send + Sync` so strategies can be boxed and timed side by side
/// - The roster is borrowed; strategies never mutate catalog data
pub trait DuoStrategy: Send + Sync {
    /// Returns the name of this strategy (for logging/reporting)
    fn name(&self) -> &str;

    /// Shared-movie count for every pair that co-stars at least once
    fn pair_counts(&self, roster: &Roster) -> PairCounts;

    /// Count once and reduce to the winner.
    ///
    /// Ties go to the alphabetically smaller pair.
    fn evaluate(&self, roster: &Roster) -> Evaluation {
        let counts = self.pair_counts(roster);
        Evaluation {
            map_size: counts.len(),
            best: best_of(
                counts
                    .into_iter()
                    .map(|(pair, movies)| DuoCount::new(pair, movies)),
            ),
        }
    }

    /// The pair sharing the most movies
    fn most_frequent(&self, roster: &Roster) -> Option<DuoCount> {
        self.evaluate(roster).best
    }
}
