//! Pair and result types shared by every duo strategy.

use data_loader::Actor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Rank of an actor in the (last name, first name) order.
///
/// Ids are handed out by the `Roster`, so comparing two ids compares the
/// actors they stand for.
pub type ActorId = u32;

/// Co-occurrence count per unordered pair
pub type PairCounts = HashMap<ActorPair, u64>;

/// Two distinct actors, order irrelevant.
///
/// Always stored as `(low, high)` with `low < high`, so `new(a, b)` and
/// `new(b, a)` produce equal (and equally hashed) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorPair {
    low: ActorId,
    high: ActorId,
}

impl ActorPair {
    /// Returns `None` when both ids are the same actor
    pub fn new(a: ActorId, b: ActorId) -> Option<Self> {
        match a.cmp(&b) {
            Ordering::Less => Some(Self { low: a, high: b }),
            Ordering::Greater => Some(Self { low: b, high: a }),
            Ordering::Equal => None,
        }
    }

    pub fn low(self) -> ActorId {
        self.low
    }

    pub fn high(self) -> ActorId {
        self.high
    }

    pub fn contains(self, id: ActorId) -> bool {
        self.low == id || self.high == id
    }
}

/// Two distinct actors in a given order; `(a, b)` and `(b, a)` differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderedPair {
    first: ActorId,
    second: ActorId,
}

impl OrderedPair {
    /// Returns `None` when both ids are the same actor
    pub fn new(first: ActorId, second: ActorId) -> Option<Self> {
        (first != second).then_some(Self { first, second })
    }

    pub fn first(self) -> ActorId {
        self.first
    }

    pub fn second(self) -> ActorId {
        self.second
    }

    /// Whether this orientation is the canonical one (`first < second`)
    pub fn is_canonical(self) -> bool {
        self.first < self.second
    }

    /// Forget the orientation
    pub fn unordered(self) -> ActorPair {
        ActorPair {
            low: self.first.min(self.second),
            high: self.first.max(self.second),
        }
    }
}

/// A pair together with the number of movies it shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuoCount {
    pub pair: ActorPair,
    pub movies: u64,
}

impl DuoCount {
    pub fn new(pair: ActorPair, movies: u64) -> Self {
        Self { pair, movies }
    }

    /// Ranking used by every final reduction: more movies first, then the
    /// alphabetically smaller pair.
    pub fn beats(&self, other: &DuoCount) -> bool {
        match self.movies.cmp(&other.movies) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.pair < other.pair,
        }
    }

    /// Keeps whichever of the two wins; usable as a `reduce` step
    pub fn better(self, other: DuoCount) -> DuoCount {
        if other.beats(&self) { other } else { self }
    }
}

/// Winner of a set of candidates, `None` if there are none.
///
/// The result does not depend on the iteration order of `candidates`.
pub fn best_of(candidates: impl IntoIterator<Item = DuoCount>) -> Option<DuoCount> {
    candidates.into_iter().reduce(DuoCount::better)
}

/// A duo resolved back to actor names, ready for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duo {
    pub first: Actor,
    pub second: Actor,
    pub movies: u64,
}

impl fmt::Display for Duo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {} ({} movies)", self.first, self.second, self.movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_pair_is_symmetric() {
        assert_eq!(ActorPair::new(3, 7), ActorPair::new(7, 3));
        let pair = ActorPair::new(7, 3).unwrap();
        assert_eq!(pair.low(), 3);
        assert_eq!(pair.high(), 7);
        assert!(pair.contains(7));
        assert!(!pair.contains(5));
    }

    #[test]
    fn test_self_pair_rejected() {
        assert!(ActorPair::new(4, 4).is_none());
        assert!(OrderedPair::new(4, 4).is_none());
    }

    #[test]
    fn test_ordered_pair_collapses() {
        let ab = OrderedPair::new(1, 2).unwrap();
        let ba = OrderedPair::new(2, 1).unwrap();
        assert_ne!(ab, ba);
        assert!(ab.is_canonical());
        assert!(!ba.is_canonical());
        assert_eq!(ab.unordered(), ba.unordered());
    }

    #[test]
    fn test_best_of_prefers_count_then_smallest_pair() {
        let ab = ActorPair::new(0, 1).unwrap();
        let bc = ActorPair::new(1, 2).unwrap();
        let ac = ActorPair::new(0, 2).unwrap();

        let winner = best_of([
            DuoCount::new(bc, 2),
            DuoCount::new(ac, 1),
            DuoCount::new(ab, 2),
        ]);
        assert_eq!(winner, Some(DuoCount::new(ab, 2)));

        let winner = best_of([DuoCount::new(ab, 1), DuoCount::new(bc, 3)]);
        assert_eq!(winner, Some(DuoCount::new(bc, 3)));
    }

    #[test]
    fn test_best_of_empty() {
        assert_eq!(best_of(Vec::new()), None);
    }
}
