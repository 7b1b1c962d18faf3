//! Ranked view of a catalog's actors and casts.
//!
//! Every strategy works on `ActorId`s rather than names: the roster sorts
//! all distinct actors by (last name, first name), uses the position as the
//! id, and rewrites each cast as a sorted list of ids. Building it once up
//! front keeps string hashing out of the counting loops.

use crate::types::{ActorId, ActorPair, Duo, DuoCount};
use data_loader::{Actor, Catalog, Movie};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Actors in rank order plus each movie's cast as ids
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Sorted; the index of an actor is its id
    actors: Vec<Actor>,
    /// One entry per movie, ids ascending
    casts: Vec<Vec<ActorId>>,
    /// Movie indices each actor appears in
    appearances: Vec<Vec<usize>>,
}

impl Roster {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::from_movies(catalog.movies())
    }

    pub fn from_movies(movies: &[Movie]) -> Self {
        let distinct: HashSet<&Actor> = movies
            .par_iter()
            .flat_map_iter(|movie| movie.cast().iter())
            .collect();

        let mut ranked: Vec<&Actor> = distinct.into_iter().collect();
        ranked.par_sort_unstable();

        let ids: HashMap<&Actor, ActorId> = ranked
            .iter()
            .enumerate()
            .map(|(rank, &actor)| (actor, rank as ActorId))
            .collect();

        // A cast is a BTreeSet<Actor>, so it already iterates in rank order
        let casts: Vec<Vec<ActorId>> = movies
            .par_iter()
            .map(|movie| movie.cast().iter().map(|actor| ids[actor]).collect())
            .collect();

        let mut appearances = vec![Vec::new(); ranked.len()];
        for (movie_idx, cast) in casts.iter().enumerate() {
            for &id in cast {
                appearances[id as usize].push(movie_idx);
            }
        }

        debug!(
            actors = ranked.len(),
            movies = casts.len(),
            "Built actor roster"
        );

        Self {
            actors: ranked.into_iter().cloned().collect(),
            casts,
            appearances,
        }
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn movie_count(&self) -> usize {
        self.casts.len()
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id as usize)
    }

    pub fn actor_id(&self, actor: &Actor) -> Option<ActorId> {
        self.actors
            .binary_search(actor)
            .ok()
            .map(|rank| rank as ActorId)
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Every cast as ascending ids, in catalog order
    pub fn casts(&self) -> &[Vec<ActorId>] {
        &self.casts
    }

    /// Indices into `casts()` of the movies an actor plays in
    pub fn appearances(&self, id: ActorId) -> &[usize] {
        self.appearances
            .get(id as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Pair of ids for two actors, if both are known and distinct
    pub fn pair_of(&self, a: &Actor, b: &Actor) -> Option<ActorPair> {
        ActorPair::new(self.actor_id(a)?, self.actor_id(b)?)
    }

    /// Turn a counted pair back into names
    pub fn resolve(&self, duo: DuoCount) -> Option<Duo> {
        Some(Duo {
            first: self.actor(duo.pair.low())?.clone(),
            second: self.actor(duo.pair.high())?.clone(),
            movies: duo.movies,
        })
    }
}

/// Calls `f` once for every pair `(x, y)` of a sorted cast with `x` ranked
/// before `y`: `k * (k - 1) / 2` calls for a cast of `k`.
pub fn for_each_half_pair(cast: &[ActorId], mut f: impl FnMut(ActorPair)) {
    for (i, &x) in cast.iter().enumerate() {
        for &y in &cast[i + 1..] {
            if let Some(pair) = ActorPair::new(x, y) {
                f(pair);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies() -> Vec<Movie> {
        vec![
            Movie::new("M1", 2000).with_actors([
                Actor::new("Zeta", "Zoe"),
                Actor::new("Alpha", "Bob"),
                Actor::new("Alpha", "Ann"),
            ]),
            Movie::new("M2", 2001).with_actors([Actor::new("Alpha", "Bob")]),
            Movie::new("M3", 2002),
        ]
    }

    #[test]
    fn test_ids_follow_name_order() {
        let roster = Roster::from_movies(&movies());

        assert_eq!(roster.actor_count(), 3);
        assert_eq!(roster.actor_id(&Actor::new("Alpha", "Ann")), Some(0));
        assert_eq!(roster.actor_id(&Actor::new("Alpha", "Bob")), Some(1));
        assert_eq!(roster.actor_id(&Actor::new("Zeta", "Zoe")), Some(2));
        assert_eq!(roster.actor_id(&Actor::new("Nobody", "")), None);
    }

    #[test]
    fn test_casts_sorted_and_appearances() {
        let roster = Roster::from_movies(&movies());

        assert_eq!(roster.movie_count(), 3);
        assert_eq!(roster.casts()[0], vec![0, 1, 2]);
        assert_eq!(roster.casts()[1], vec![1]);
        assert!(roster.casts()[2].is_empty());

        assert_eq!(roster.appearances(1), &[0, 1]);
        assert_eq!(roster.appearances(2), &[0]);
        assert!(roster.appearances(99).is_empty());
    }

    #[test]
    fn test_resolve() {
        let roster = Roster::from_movies(&movies());
        let pair = roster
            .pair_of(&Actor::new("Zeta", "Zoe"), &Actor::new("Alpha", "Ann"))
            .unwrap();

        let duo = roster.resolve(DuoCount::new(pair, 4)).unwrap();
        assert_eq!(duo.first, Actor::new("Alpha", "Ann"));
        assert_eq!(duo.second, Actor::new("Zeta", "Zoe"));
        assert_eq!(duo.movies, 4);
    }

    #[test]
    fn test_half_pairs_count() {
        let mut seen = Vec::new();
        for_each_half_pair(&[1, 4, 6, 9], |pair| seen.push(pair));

        assert_eq!(seen.len(), 6);
        assert!(seen.iter().all(|p| p.low() < p.high()));

        let mut none = 0;
        for_each_half_pair(&[5], |_| none += 1);
        for_each_half_pair(&[], |_| none += 1);
        assert_eq!(none, 0);
    }
}
