//! # Costar Crate
//!
//! Finds the pair of actors who appear together in the most movies.
//!
//! ## Components
//!
//! ### Roster
//! Ranks every distinct actor by (last name, first name) and rewrites each
//! cast as sorted ids. All strategies count over the roster.
//!
//! ### Strategies
//! Three interchangeable ways to count shared movies per pair:
//! - **OrderedPairs**: full square per cast, `(a, b)` and `(b, a)` counted
//!   separately and collapsed afterwards; sequential or on the rayon pool
//! - **HalfMatrix**: only `(x, y)` with `x` ranked before `y`, one increment
//!   per pair per movie
//! - **Sharded**: independent partial graphs built in parallel, then merged
//!
//! They return identical counts and the same winner; they exist to compare
//! cost.
//!
//! ## Example Usage
//!
//! ```ignore
//! use costar::{DuoStrategy, HalfMatrix, Roster};
//! use data_loader::Loader;
//!
//! let catalog = Loader::new("files/movies-mpaa.txt").load()?;
//! let roster = Roster::from_catalog(&catalog);
//!
//! if let Some(best) = HalfMatrix.most_frequent(&roster) {
//!     let duo = roster.resolve(best).unwrap();
//!     println!("Most seen actor duo = {}", duo);
//! }
//! ```

pub mod types;
pub mod roster;
pub mod traits;
pub mod graph;
pub mod ordered;
pub mod half_matrix;
pub mod sharded;

// Re-export commonly used types
pub use graph::CoStarGraph;
pub use half_matrix::HalfMatrix;
pub use ordered::OrderedPairs;
pub use roster::Roster;
pub use sharded::{ShardBy, Sharded};
pub use traits::{DuoStrategy, Evaluation};
pub use types::{ActorId, ActorPair, Duo, DuoCount, OrderedPair, PairCounts};

/// One instance of every strategy, in increasing order of sophistication
pub fn all_strategies(shard_by: ShardBy) -> Vec<Box<dyn DuoStrategy>> {
    vec![
        Box::new(OrderedPairs::new()),
        Box::new(OrderedPairs::parallel()),
        Box::new(HalfMatrix),
        Box::new(Sharded::new().with_shard_by(shard_by)),
    ]
}

/// Run one strategy over a roster and resolve the winner to names
pub fn best_duo(roster: &Roster, strategy: &dyn DuoStrategy) -> Option<Duo> {
    strategy
        .most_frequent(roster)
        .and_then(|best| roster.resolve(best))
}
