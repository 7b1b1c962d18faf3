//! Catalog loading and summary statistics.
//!
//! `Loader` reads a file through the parser and folds the movies into a
//! deduplicated `Catalog`. `Catalog::stats` computes the figures printed
//! ahead of the duo search.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configurable entry point for reading a catalog from disk
#[derive(Debug, Clone)]
pub struct Loader {
    path: PathBuf,
    mode: ParseMode,
}

impl Loader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: ParseMode::Strict,
        }
    }

    /// Configure how malformed lines are handled (default: strict)
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn load(&self) -> Result<Catalog> {
        Catalog::load_from_file(&self.path, self.mode)
    }
}

impl Catalog {
    /// Load a catalog from a movie file.
    ///
    /// Steps:
    /// 1. Decode and parse every line
    /// 2. Insert the movies, dropping repeated `(title, year)` records
    pub fn load_from_file(path: &Path, mode: ParseMode) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);

        let parsed = parser::parse_movies(path, mode)?;
        let parsed_count = parsed.movies.len();

        let catalog: Catalog = parsed.movies.into_iter().collect();

        debug!(
            parsed = parsed_count,
            duplicates = parsed_count - catalog.len(),
            "Deduplicated movie records"
        );
        info!(
            movies = catalog.len(),
            skipped = parsed.skipped,
            rejected = parsed.rejected,
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Distinct actors over every cast
    pub fn actors(&self) -> HashSet<&Actor> {
        self.movies
            .par_iter()
            .flat_map_iter(|movie| movie.cast().iter())
            .collect()
    }

    /// Compute movie, actor and release-year figures
    pub fn stats(&self) -> CatalogStats {
        let years: HashSet<Year> = self.movies.iter().map(|m| m.release_year).collect();

        CatalogStats {
            movies: self.movies.len(),
            actors: self.actors().len(),
            distinct_years: years.len(),
            min_year: years.iter().min().copied(),
            max_year: years.iter().max().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_catalog() -> Catalog {
        [
            Movie::new("M1", 1990).with_actors([Actor::new("A", "a"), Actor::new("B", "b")]),
            Movie::new("M2", 1995).with_actors([Actor::new("B", "b"), Actor::new("C", "c")]),
            Movie::new("M3", 1995),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_stats() {
        let stats = sample_catalog().stats();
        assert_eq!(stats.movies, 3);
        assert_eq!(stats.actors, 3);
        assert_eq!(stats.distinct_years, 2);
        assert_eq!(stats.min_year, Some(1990));
        assert_eq!(stats.max_year, Some(1995));
    }

    #[test]
    fn test_empty_stats() {
        let stats = Catalog::new().stats();
        assert_eq!(stats.movies, 0);
        assert_eq!(stats.actors, 0);
        assert_eq!(stats.min_year, None);
        assert_eq!(stats.max_year, None);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("costar-loader-{}.txt", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            // Windows-1252 bytes: 0xE9 is 'é'
            file.write_all(b"Am\xE9lie (2001)/Tautou, Audrey/Kassovitz, Mathieu\n")
                .unwrap();
            file.write_all(b"Am\xE9lie (2001)/Tautou, Audrey\n").unwrap();
            file.write_all(b"Serial (1990, 1991)/Doe, John\n").unwrap();
        }

        let catalog = Loader::new(path.clone()).load().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 1);
        let movie = catalog.get_movie("Amélie", 2001).unwrap();
        // first record wins
        assert_eq!(movie.cast().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = Loader::new("does/not/exist.txt").load().unwrap_err();
        assert!(matches!(err, crate::DataLoadError::FileNotFound { .. }));
    }
}
