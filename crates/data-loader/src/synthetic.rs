//! Synthetic catalogs for benchmarking.
//!
//! Generates movies with random casts drawn from a fixed pool of actors. A
//! fixed seed always yields the same catalog.

use crate::types::{Actor, Catalog, Movie, Year};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of a generated catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticConfig {
    pub movies: usize,
    /// Size of the actor pool casts are drawn from
    pub actors: usize,
    /// Upper bound on cast size; actual casts are 0..=max_cast distinct actors
    pub max_cast: usize,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            movies: 5_000,
            actors: 2_000,
            max_cast: 12,
            seed: 42,
        }
    }
}

pub fn generate(config: &SyntheticConfig) -> Catalog {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let pool: Vec<Actor> = (0..config.actors)
        .map(|i| Actor::new(format!("Actor{:06}", i), format!("First{}", i % 97)))
        .collect();
    let max_cast = config.max_cast.min(pool.len());

    (0..config.movies)
        .map(|i| {
            let year = 1900 + (i % 120) as Year;
            let mut movie = Movie::new(format!("Movie {}", i), year);
            let cast_size = rng.random_range(0..=max_cast);
            // Duplicate draws collapse in the cast set
            for _ in 0..cast_size {
                let idx = rng.random_range(0..pool.len());
                movie.add_actor(pool[idx].clone());
            }
            movie
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let config = SyntheticConfig {
            movies: 50,
            actors: 20,
            max_cast: 5,
            seed: 7,
        };
        let first = generate(&config);
        let second = generate(&config);

        assert_eq!(first.len(), 50);
        assert_eq!(first.movies(), second.movies());
        assert!(first.movies().iter().all(|m| m.cast().len() <= 5));
    }

    #[test]
    fn test_generate_without_actors() {
        let config = SyntheticConfig {
            movies: 3,
            actors: 0,
            max_cast: 5,
            seed: 1,
        };
        let catalog = generate(&config);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.movies().iter().all(|m| m.cast().is_empty()));
    }
}
