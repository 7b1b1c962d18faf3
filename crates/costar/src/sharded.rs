//! Partitioned accumulate-then-merge counting.
//!
//! The work is split into independent shards, each shard fills its own
//! partial `CoStarGraph` on the rayon pool, and the partials are merged by
//! summing matching edges. No shard touches shared state while counting.
//!
//! Two partitioning schemes are available:
//!
//! - **by actor** (default): each actor is a shard key. The shard visits the
//!   movies that actor appears in and counts co-stars ranked after them, so
//!   every pair is counted by its lower-ranked member only.
//! - **by movie chunks**: the movie list is cut into `n` contiguous chunks,
//!   each chunk is counted half-matrix style.

use crate::graph::CoStarGraph;
use crate::roster::{Roster, for_each_half_pair};
use crate::traits::{DuoStrategy, Evaluation};
use crate::types::{ActorId, ActorPair, PairCounts};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// How the sharded strategy partitions its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShardBy {
    /// One shard per actor
    #[default]
    Actor,
    /// This many contiguous chunks of movies (at least 1, at most one per movie)
    Movies(usize),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sharded {
    shard_by: ShardBy,
}

impl Sharded {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the partitioning scheme (default: by actor)
    pub fn with_shard_by(mut self, shard_by: ShardBy) -> Self {
        self.shard_by = shard_by;
        self
    }

    pub fn shard_by(&self) -> ShardBy {
        self.shard_by
    }

    /// Accumulate every shard and merge the partial graphs
    #[instrument(skip_all, fields(shard_by = ?self.shard_by))]
    pub fn tally(&self, roster: &Roster) -> CoStarGraph {
        let graph = match self.shard_by {
            ShardBy::Actor => tally_by_actor(roster),
            ShardBy::Movies(shards) => tally_by_movie_chunks(roster, shards),
        };

        debug!(
            rows = graph.row_count(),
            edges = graph.edge_count(),
            "Merged shard graphs"
        );
        graph
    }
}

fn tally_by_actor(roster: &Roster) -> CoStarGraph {
    let actor_count = roster.actor_count() as ActorId;

    (0..actor_count)
        .into_par_iter()
        .fold(CoStarGraph::new, |mut local, actor| {
            for &movie in roster.appearances(actor) {
                let cast = &roster.casts()[movie];
                // Casts are sorted, so co-stars ranked after `actor` form a suffix
                let after = cast.partition_point(|&id| id <= actor);
                for &costar in &cast[after..] {
                    if let Some(pair) = ActorPair::new(actor, costar) {
                        local.add(pair, 1);
                    }
                }
            }
            local
        })
        .reduce(CoStarGraph::new, CoStarGraph::merge)
}

fn tally_by_movie_chunks(roster: &Roster, shards: usize) -> CoStarGraph {
    let movie_count = roster.movie_count();
    if movie_count == 0 {
        return CoStarGraph::new();
    }

    let shards = shards.clamp(1, movie_count);
    let chunk_size = movie_count.div_ceil(shards);
    debug!(shards, chunk_size, "Partitioning movies");

    roster
        .casts()
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut local = CoStarGraph::new();
            for cast in chunk {
                for_each_half_pair(cast, |pair| local.add(pair, 1));
            }
            local
        })
        .reduce(CoStarGraph::new, CoStarGraph::merge)
}

impl DuoStrategy for Sharded {
    fn name(&self) -> &str {
        match self.shard_by {
            ShardBy::Actor => "sharded-by-actor",
            ShardBy::Movies(_) => "sharded-by-movies",
        }
    }

    fn pair_counts(&self, roster: &Roster) -> PairCounts {
        self.tally(roster).into_pair_counts()
    }

    /// Two-stage reduction over the merged graph; `map_size` is its row count
    fn evaluate(&self, roster: &Roster) -> Evaluation {
        let graph = self.tally(roster);
        Evaluation {
            best: graph.best_edge(),
            map_size: graph.row_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::half_matrix::HalfMatrix;
    use data_loader::{Actor, Movie};

    fn roster() -> Roster {
        let a = Actor::new("A", "");
        let b = Actor::new("B", "");
        let c = Actor::new("C", "");
        let d = Actor::new("D", "");
        Roster::from_movies(&[
            Movie::new("M1", 2000).with_actors([a.clone(), b.clone(), c.clone()]),
            Movie::new("M2", 2001).with_actors([a.clone(), b.clone()]),
            Movie::new("M3", 2002).with_actors([b.clone(), c.clone(), d.clone()]),
            Movie::new("M4", 2003).with_actors([c, d]),
            Movie::new("M5", 2004).with_actors([a]),
        ])
    }

    #[test]
    fn test_by_actor_matches_half_matrix() {
        let roster = roster();
        assert_eq!(
            Sharded::new().pair_counts(&roster),
            HalfMatrix.pair_counts(&roster)
        );
    }

    #[test]
    fn test_any_chunk_count_matches_half_matrix() {
        let roster = roster();
        let expected = HalfMatrix.pair_counts(&roster);

        for shards in [0, 1, 2, 3, 5, 64] {
            let sharded = Sharded::new().with_shard_by(ShardBy::Movies(shards));
            assert_eq!(sharded.pair_counts(&roster), expected, "shards = {shards}");
        }
    }

    #[test]
    fn test_best_edge_with_tie() {
        // (A,B), (B,C) and (C,D) all share 2 movies; (A,B) is smallest
        let best = Sharded::new().most_frequent(&roster()).unwrap();
        assert_eq!(best.movies, 2);
        assert_eq!((best.pair.low(), best.pair.high()), (0, 1));
    }

    #[test]
    fn test_evaluate_reports_graph_rows() {
        // A, B and C each own at least one edge; D is only ever the higher end
        let evaluation = Sharded::new().evaluate(&roster());
        assert_eq!(evaluation.map_size, 3);
        assert_eq!(evaluation.best.map(|best| best.movies), Some(2));
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::default();
        assert!(Sharded::new().tally(&roster).is_empty());
        let by_movies = Sharded::new().with_shard_by(ShardBy::Movies(4));
        assert_eq!(by_movies.most_frequent(&roster), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Sharded::new().name(), "sharded-by-actor");
        assert_eq!(
            Sharded::new().with_shard_by(ShardBy::Movies(2)).name(),
            "sharded-by-movies"
        );
    }
}
