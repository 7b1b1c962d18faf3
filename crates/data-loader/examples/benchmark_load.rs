use data_loader::{Loader, ParseMode};
use std::time::Instant;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "files/movies-mpaa.txt".to_string());

    println!("Loading movie catalog from {}...\n", path);

    let start = Instant::now();
    let catalog = Loader::new(path)
        .with_mode(ParseMode::Lenient)
        .load()
        .expect("Failed to load catalog");
    let load_elapsed = start.elapsed();

    let start = Instant::now();
    let stats = catalog.stats();
    let stats_elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Load time: {:?}", load_elapsed);
    println!("Stats time: {:?}", stats_elapsed);
    println!("Movies: {}", stats.movies);
    println!("Actors: {}", stats.actors);
    println!("\nPerformance: {:.0} movies/second",
             stats.movies as f64 / load_elapsed.as_secs_f64());
}
