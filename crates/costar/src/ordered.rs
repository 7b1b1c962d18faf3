//! Ordered-pair double counting.
//!
//! Every cast is scanned as a full square: for each actor `x` and each
//! actor `y` with `x != y` the ordered pair `(x, y)` is incremented. Both
//! orientations of a pair therefore always hold the same value, and each
//! movie costs `k * (k - 1)` increments for a cast of `k`.
//!
//! The sequential mode fills one map in a plain loop. The parallel mode
//! gives every rayon job its own map over a share of the casts and sums the
//! maps at the end.

use crate::roster::Roster;
use crate::traits::{DuoStrategy, Evaluation};
use crate::types::{ActorId, DuoCount, OrderedPair, PairCounts, best_of};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedPairs {
    parallel: bool,
}

impl OrderedPairs {
    /// Sequential counting
    pub fn new() -> Self {
        Self::default()
    }

    /// Counting spread over the rayon pool
    pub fn parallel() -> Self {
        Self::new().with_parallel(true)
    }

    /// Configure whether casts are counted in parallel (default: false)
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Count every ordered pair of distinct co-stars
    #[instrument(skip_all, fields(movies = roster.movie_count(), parallel = self.parallel))]
    pub fn tally(&self, roster: &Roster) -> HashMap<OrderedPair, u64> {
        let counts = if self.parallel {
            roster
                .casts()
                .par_iter()
                .fold(HashMap::new, |mut local, cast| {
                    count_cast(cast, &mut local);
                    local
                })
                .reduce(HashMap::new, |mut acc, local| {
                    for (pair, count) in local {
                        *acc.entry(pair).or_insert(0) += count;
                    }
                    acc
                })
        } else {
            let mut counts = HashMap::new();
            for cast in roster.casts() {
                count_cast(cast, &mut counts);
            }
            counts
        };

        debug!(ordered_pairs = counts.len(), "Ordered pair tally complete");
        counts
    }
}

fn count_cast(cast: &[ActorId], counts: &mut HashMap<OrderedPair, u64>) {
    for &x in cast {
        for &y in cast {
            // None for x == y: an actor never pairs with themselves
            let Some(pair) = OrderedPair::new(x, y) else {
                continue;
            };
            *counts.entry(pair).or_insert(0) += 1;
        }
    }
}

impl DuoStrategy for OrderedPairs {
    fn name(&self) -> &str {
        if self.parallel {
            "ordered-pairs-parallel"
        } else {
            "ordered-pairs"
        }
    }

    /// Collapses `(a, b)` and `(b, a)` onto one entry. The two always agree,
    /// so the canonical orientation's value is kept rather than the sum.
    fn pair_counts(&self, roster: &Roster) -> PairCounts {
        self.tally(roster)
            .into_iter()
            .filter(|(pair, _)| pair.is_canonical())
            .map(|(pair, movies)| (pair.unordered(), movies))
            .collect()
    }

    fn evaluate(&self, roster: &Roster) -> Evaluation {
        let counts = self.tally(roster);
        Evaluation {
            map_size: counts.len(),
            best: best_of(
                counts
                    .into_iter()
                    .map(|(pair, movies)| DuoCount::new(pair.unordered(), movies)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Actor, Movie};

    fn roster() -> Roster {
        Roster::from_movies(&[
            Movie::new("M1", 2000).with_actors([
                Actor::new("A", ""),
                Actor::new("B", ""),
                Actor::new("C", ""),
            ]),
            Movie::new("M2", 2001).with_actors([Actor::new("A", ""), Actor::new("B", "")]),
            Movie::new("M3", 2002).with_actors([Actor::new("D", "")]),
        ])
    }

    #[test]
    fn test_both_orientations_counted() {
        let counts = OrderedPairs::new().tally(&roster());

        let ab = OrderedPair::new(0, 1).unwrap();
        let ba = OrderedPair::new(1, 0).unwrap();
        assert_eq!(counts[&ab], 2);
        assert_eq!(counts[&ba], 2);
        // 3 actors -> 6 ordered pairs, 2 actors -> 2, 1 actor -> 0
        assert_eq!(counts.values().sum::<u64>(), 8);
    }

    #[test]
    fn test_no_self_pairs() {
        let counts = OrderedPairs::new().tally(&roster());
        assert!(counts.keys().all(|pair| pair.first() != pair.second()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let roster = roster();
        assert_eq!(
            OrderedPairs::parallel().tally(&roster),
            OrderedPairs::new().tally(&roster)
        );
        assert!(OrderedPairs::parallel().is_parallel());
        assert_eq!(OrderedPairs::parallel().name(), "ordered-pairs-parallel");
    }

    #[test]
    fn test_pair_counts_collapsed() {
        let counts = OrderedPairs::new().pair_counts(&roster());
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.values().sum::<u64>(), 4);
    }

    #[test]
    fn test_evaluate() {
        let evaluation = OrderedPairs::new().evaluate(&roster());
        // (A,B) (A,C) (B,C) in both orientations
        assert_eq!(evaluation.map_size, 6);

        let best = evaluation.best.unwrap();
        assert_eq!(best.movies, 2);
        assert_eq!((best.pair.low(), best.pair.high()), (0, 1));
    }
}
