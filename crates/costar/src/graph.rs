//! Weighted co-star graph used by the sharded strategy.
//!
//! Adjacency is two-level: outer key is an actor, inner key a co-star,
//! value the number of shared movies. Every edge lives under its LOWER
//! endpoint only. If an edge could sit under either endpoint, the same pair
//! might be split over two rows and each half would be undercounted when
//! the rows are maximised separately.

use crate::types::{ActorId, ActorPair, DuoCount, PairCounts, best_of};
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoStarGraph {
    adjacency: HashMap<ActorId, HashMap<ActorId, u64>>,
}

impl CoStarGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` shared movies to an edge
    pub fn add(&mut self, pair: ActorPair, weight: u64) {
        *self
            .adjacency
            .entry(pair.low())
            .or_default()
            .entry(pair.high())
            .or_insert(0) += weight;
    }

    /// Shared movies for a pair, 0 if never seen
    pub fn weight(&self, pair: ActorPair) -> u64 {
        self.adjacency
            .get(&pair.low())
            .and_then(|row| row.get(&pair.high()))
            .copied()
            .unwrap_or(0)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|row| row.len()).sum()
    }

    /// Number of actors that own at least one edge
    pub fn row_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Combines two partial graphs by summing matching edges.
    ///
    /// Associative and commutative, so partials can be merged in any
    /// grouping. The smaller graph is folded into the larger one.
    pub fn merge(self, other: CoStarGraph) -> CoStarGraph {
        let (mut target, source) = if self.edge_count() >= other.edge_count() {
            (self, other)
        } else {
            (other, self)
        };

        for (low, row) in source.adjacency {
            let target_row = target.adjacency.entry(low).or_default();
            for (high, weight) in row {
                *target_row.entry(high).or_insert(0) += weight;
            }
        }
        target
    }

    /// Heaviest edge, found in two stages: best co-star per row (rows in
    /// parallel), then best across rows.
    pub fn best_edge(&self) -> Option<DuoCount> {
        self.adjacency
            .par_iter()
            .filter_map(|(&low, row)| {
                best_of(row.iter().filter_map(|(&high, &weight)| {
                    ActorPair::new(low, high).map(|pair| DuoCount::new(pair, weight))
                }))
            })
            .reduce_with(DuoCount::better)
    }

    pub fn into_pair_counts(self) -> PairCounts {
        self.adjacency
            .into_iter()
            .flat_map(|(low, row)| {
                row.into_iter().filter_map(move |(high, weight)| {
                    ActorPair::new(low, high).map(|pair| (pair, weight))
                })
            })
            .collect()
    }
}

impl FromIterator<(ActorPair, u64)> for CoStarGraph {
    fn from_iter<I: IntoIterator<Item = (ActorPair, u64)>>(iter: I) -> Self {
        let mut graph = CoStarGraph::new();
        for (pair, weight) in iter {
            graph.add(pair, weight);
        }
        graph
    }
}
