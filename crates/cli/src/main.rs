use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use costar::{Duo, DuoStrategy, HalfMatrix, OrderedPairs, Roster, ShardBy, Sharded};
use data_loader::synthetic::{self, SyntheticConfig};
use data_loader::{Catalog, CatalogStats, Loader, ParseMode};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Costar - movie catalog statistics and most frequent co-star duo
#[derive(Parser)]
#[command(name = "costar")]
#[command(about = "Finds the pair of actors who appear together most often", long_about = None)]
struct Cli {
    /// Path to the `/`-delimited movie file (Windows-1252)
    #[arg(short, long, default_value = "files/movies-mpaa.txt", global = true)]
    input: PathBuf,

    /// Skip and log malformed lines instead of aborting
    #[arg(long, global = true)]
    lenient: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show movie, actor and release-year statistics
    Stats,

    /// Find the most frequent co-star duo
    Duo {
        /// Counting strategy to run
        #[arg(long, value_enum, default_value_t = StrategyArg::All)]
        strategy: StrategyArg,

        /// How the sharded strategy partitions its work
        #[arg(long, value_enum, default_value_t = ShardArg::Actor)]
        shard_by: ShardArg,

        /// Number of movie chunks when sharding by movies
        #[arg(long, default_value = "8")]
        shards: usize,
    },

    /// Time every strategy on a generated catalog
    Bench {
        /// Number of movies to generate
        #[arg(long, default_value = "5000")]
        movies: usize,

        /// Size of the actor pool
        #[arg(long, default_value = "2000")]
        actors: usize,

        /// Maximum cast size per movie
        #[arg(long, default_value = "12")]
        cast: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of movie chunks for the movie-sharded run
        #[arg(long, default_value = "8")]
        shards: usize,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Ordered,
    OrderedParallel,
    HalfMatrix,
    Sharded,
    All,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShardArg {
    Actor,
    Movies,
}

/// Outcome of one strategy run
#[derive(Serialize)]
struct StrategyReport {
    strategy: String,
    duo: Option<Duo>,
    /// Entries in the strategy's count map (graph rows when sharded)
    map_size: usize,
    elapsed_ms: f64,
}

/// Everything printed by `duo` and `bench`
#[derive(Serialize)]
struct RunReport {
    stats: CatalogStats,
    /// Distinct actors ranked by the roster
    key_actors: usize,
    roster_ms: f64,
    strategies: Vec<StrategyReport>,
    /// Whether every strategy found the same pair and count
    consistent: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = if cli.lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Stats => {
            let catalog = load_catalog(&cli.input, mode)?;
            handle_stats(&catalog, cli.format)?
        }
        Commands::Duo {
            strategy,
            shard_by,
            shards,
        } => {
            let catalog = load_catalog(&cli.input, mode)?;
            let strategies = select_strategies(strategy, shard_by, shards);
            handle_duo(&catalog, &strategies, cli.format)?
        }
        Commands::Bench {
            movies,
            actors,
            cast,
            seed,
            shards,
        } => handle_bench(
            SyntheticConfig {
                movies,
                actors,
                max_cast: cast,
                seed,
            },
            shards,
            cli.format,
        )?,
    }

    Ok(())
}

fn load_catalog(input: &Path, mode: ParseMode) -> Result<Catalog> {
    let start = Instant::now();
    let catalog = Loader::new(input)
        .with_mode(mode)
        .load()
        .with_context(|| format!("Failed to load movie catalog from {}", input.display()))?;
    tracing::info!(elapsed = ?start.elapsed(), "Catalog ready");
    Ok(catalog)
}

fn select_strategies(
    strategy: StrategyArg,
    shard_by: ShardArg,
    shards: usize,
) -> Vec<Box<dyn DuoStrategy>> {
    let shard_by = match shard_by {
        ShardArg::Actor => ShardBy::Actor,
        ShardArg::Movies => ShardBy::Movies(shards),
    };

    match strategy {
        StrategyArg::Ordered => vec![Box::new(OrderedPairs::new())],
        StrategyArg::OrderedParallel => vec![Box::new(OrderedPairs::parallel())],
        StrategyArg::HalfMatrix => vec![Box::new(HalfMatrix)],
        StrategyArg::Sharded => vec![Box::new(Sharded::new().with_shard_by(shard_by))],
        StrategyArg::All => costar::all_strategies(shard_by),
    }
}

/// Handle the 'stats' command
fn handle_stats(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let stats = catalog.stats();
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?
            );
        }
        OutputFormat::Text => print_stats(&stats),
    }
    Ok(())
}

/// Handle the 'duo' command
fn handle_duo(
    catalog: &Catalog,
    strategies: &[Box<dyn DuoStrategy>],
    format: OutputFormat,
) -> Result<()> {
    let report = run_strategies(catalog, strategies);
    print_report(&report, format)
}

/// Handle the 'bench' command
fn handle_bench(config: SyntheticConfig, shards: usize, format: OutputFormat) -> Result<()> {
    let start = Instant::now();
    let catalog = synthetic::generate(&config);
    tracing::info!(
        movies = config.movies,
        actors = config.actors,
        seed = config.seed,
        elapsed = ?start.elapsed(),
        "Generated synthetic catalog"
    );

    let mut strategies = costar::all_strategies(ShardBy::Actor);
    strategies.push(Box::new(
        Sharded::new().with_shard_by(ShardBy::Movies(shards)),
    ));

    let report = run_strategies(&catalog, &strategies);
    print_report(&report, format)
}

fn run_strategies(catalog: &Catalog, strategies: &[Box<dyn DuoStrategy>]) -> RunReport {
    let stats = catalog.stats();

    let start = Instant::now();
    let roster = Roster::from_catalog(catalog);
    let roster_elapsed = start.elapsed();

    let reports: Vec<StrategyReport> = strategies
        .iter()
        .map(|strategy| {
            let start = Instant::now();
            let evaluation = strategy.evaluate(&roster);
            let duo = evaluation.best.and_then(|best| roster.resolve(best));
            let elapsed = start.elapsed();
            tracing::debug!(
                strategy = strategy.name(),
                map_size = evaluation.map_size,
                ?elapsed,
                "Strategy finished"
            );

            StrategyReport {
                strategy: strategy.name().to_string(),
                duo,
                map_size: evaluation.map_size,
                elapsed_ms: millis(elapsed),
            }
        })
        .collect();

    let consistent = reports.windows(2).all(|w| w[0].duo == w[1].duo);
    if !consistent {
        tracing::warn!("Strategies disagree on the most frequent duo");
    }

    RunReport {
        stats,
        key_actors: roster.actor_count(),
        roster_ms: millis(roster_elapsed),
        strategies: reports,
        consistent,
    }
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(report).context("Failed to serialize report")?
            );
        }
        OutputFormat::Text => {
            print_stats(&report.stats);
            println!("{} Roster built in {:.1}ms", "✓".green(), report.roster_ms);
            println!("# Key actors = {}", report.key_actors);

            for run in &report.strategies {
                println!("\n{}", run.strategy.bold().blue());
                match &run.duo {
                    Some(duo) => println!("Most seen actor duo = {}", duo),
                    None => println!("Most seen actor duo = {}", "none".yellow()),
                }
                println!("Count map entries = {}", run.map_size);
                println!("T = {:.1}ms", run.elapsed_ms);
            }

            if report.strategies.len() > 1 {
                if report.consistent {
                    println!("\n{} All strategies agree", "✓".green());
                } else {
                    println!("\n{} Strategies disagree", "✗".red());
                }
            }
        }
    }
    Ok(())
}

fn print_stats(stats: &CatalogStats) {
    println!("{}", "Catalog:".bold().blue());
    println!("{}# actors = {}", "• ".green(), stats.actors);
    println!("{}# movies = {}", "• ".green(), stats.movies);
    println!("{}# years = {}", "• ".green(), stats.distinct_years);
    match (stats.min_year, stats.max_year) {
        (Some(min), Some(max)) => println!("{}From {} to {}", "• ".green(), min, max),
        _ => println!("{}No release years", "• ".green()),
    }
}
