//! Core domain types for the movie/actor catalog.
//!
//! An `Actor` is nothing more than a name, a `Movie` is a title, a release
//! year and a cast, and the `Catalog` is the deduplicated set of movies read
//! from one data file.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Release year as written in the title field, e.g. `1995` in `Heat (1995)`
pub type Year = u16;

// =============================================================================
// Actor
// =============================================================================

/// An actor, identified by name only.
///
/// Field order matters: the derived `Ord` sorts by last name first and then
/// by first name, which is the global actor order the duo strategies rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Actor {
    pub last_name: String,
    /// Empty when the record only carried a single name
    pub first_name: String,
}

impl Actor {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_name.is_empty() {
            write!(f, "{}", self.last_name)
        } else {
            write!(f, "{} {}", self.first_name, self.last_name)
        }
    }
}

// =============================================================================
// Movie
// =============================================================================

/// Identity of a movie: two records with the same title and year are the
/// same movie, whatever their casts say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieKey {
    pub title: String,
    pub release_year: Year,
}

/// A movie and its cast.
///
/// The cast is a set, so adding the same actor twice is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub release_year: Year,
    cast: BTreeSet<Actor>,
}

impl Movie {
    pub fn new(title: impl Into<String>, release_year: Year) -> Self {
        Self {
            title: title.into(),
            release_year,
            cast: BTreeSet::new(),
        }
    }

    /// Builder-style helper, mostly for tests and synthetic data
    pub fn with_actors(mut self, actors: impl IntoIterator<Item = Actor>) -> Self {
        for actor in actors {
            self.add_actor(actor);
        }
        self
    }

    /// Adds an actor to the cast. Returns `false` if they were already in it.
    pub fn add_actor(&mut self, actor: Actor) -> bool {
        self.cast.insert(actor)
    }

    pub fn cast(&self) -> &BTreeSet<Actor> {
        &self.cast
    }

    pub fn key(&self) -> MovieKey {
        MovieKey {
            title: self.title.clone(),
            release_year: self.release_year,
        }
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Summary figures reported before the duo search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub movies: usize,
    /// Distinct actors over every cast
    pub actors: usize,
    pub distinct_years: usize,
    /// `None` when the catalog is empty
    pub min_year: Option<Year>,
    pub max_year: Option<Year>,
}

// =============================================================================
// Catalog
// =============================================================================

/// The deduplicated set of movies read from a data file.
///
/// Movies keep their insertion order so that anything iterating the catalog
/// sees the file order. The key index enforces set semantics on
/// `(title, release_year)`.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) keys: HashMap<MovieKey, usize>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a movie unless one with the same title and year is already
    /// present. Returns whether the movie was added.
    pub fn insert_movie(&mut self, movie: Movie) -> bool {
        let key = movie.key();
        if self.keys.contains_key(&key) {
            return false;
        }
        self.keys.insert(key, self.movies.len());
        self.movies.push(movie);
        true
    }

    pub fn get_movie(&self, title: &str, release_year: Year) -> Option<&Movie> {
        let key = MovieKey {
            title: title.to_string(),
            release_year,
        };
        self.keys.get(&key).map(|&idx| &self.movies[idx])
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl FromIterator<Movie> for Catalog {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for movie in iter {
            catalog.insert_movie(movie);
        }
        catalog
    }
}

/// How the parser treats a line it cannot make sense of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Abort the load on the first structurally broken line
    #[default]
    Strict,
    /// Log the broken line and carry on
    Lenient,
}
