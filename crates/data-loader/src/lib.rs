//! # Data Loader Crate
//!
//! Reads the `/`-delimited movie/actor file into a deduplicated catalog.
//!
//! ## Main Components
//!
//! - **types**: Actor, Movie, Catalog and CatalogStats
//! - **parser**: Windows-1252 decoding and per-line record parsing
//! - **index**: Catalog loading and summary statistics
//! - **synthetic**: Seeded random catalogs for benchmarks
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Loader, ParseMode};
//!
//! let catalog = Loader::new("files/movies-mpaa.txt")
//!     .with_mode(ParseMode::Lenient)
//!     .load()?;
//!
//! let stats = catalog.stats();
//! println!("{} movies, {} actors", stats.movies, stats.actors);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod synthetic;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, RecordError, Result};
pub use index::Loader;
pub use parser::{ParsedLine, ParsedMovies, parse_line};
pub use synthetic::SyntheticConfig;
pub use types::{Actor, Catalog, CatalogStats, Movie, MovieKey, ParseMode, Year};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_insert_movie_is_idempotent() {
        let mut catalog = Catalog::new();

        let movie = Movie::new("Heat", 1995).with_actors([Actor::new("Pacino", "Al")]);

        assert!(catalog.insert_movie(movie.clone()));
        assert!(!catalog.insert_movie(movie));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_same_title_different_year() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert_movie(Movie::new("Scarface", 1932)));
        assert!(catalog.insert_movie(Movie::new("Scarface", 1983)));
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get_movie("Scarface", 1983).is_some());
        assert!(catalog.get_movie("Scarface", 2000).is_none());
    }

    #[test]
    fn test_actor_order_is_last_then_first() {
        let mut actors = vec![
            Actor::new("Smith", "Will"),
            Actor::new("Baldwin", "William"),
            Actor::new("Baldwin", "Alec"),
        ];
        actors.sort();
        assert_eq!(actors[0], Actor::new("Baldwin", "Alec"));
        assert_eq!(actors[1], Actor::new("Baldwin", "William"));
        assert_eq!(actors[2], Actor::new("Smith", "Will"));
    }

    #[test]
    fn test_actor_display() {
        assert_eq!(Actor::new("Pacino", "Al").to_string(), "Al Pacino");
        assert_eq!(Actor::new("Cher", "").to_string(), "Cher");
    }
}
