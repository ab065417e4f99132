//! Command-line entry point for the rating tool
//!
//! Loads configuration, initializes logging, and runs one of two batch
//! commands: `rate` computes ratings from a JSON match file, `simulate`
//! generates synthetic matches from a known ground truth and rates them.

use alliance_rating::config::AppConfig;
use alliance_rating::ingest::{CachedSource, JsonFileCache, MatchSource, StaticMatchSource};
use alliance_rating::rating::{compute_ratings, RatingModel, RatingRequest, TeamIndex};
use alliance_rating::report::{render_histogram, render_table};
use alliance_rating::synth::{generate_matches, linspace_truth, SyntheticConfig};
use alliance_rating::types::MatchRecord;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Alliance Rating - least-squares contribution ratings for team matches
#[derive(Parser)]
#[command(
    name = "alliance-rating",
    version,
    about = "Compute least-squares contribution ratings from alliance match results",
    long_about = "Alliance Rating solves a least-squares system over match participation to \
                 estimate each team's contribution, either to the match result (signed \
                 two-sided model) or to its alliance's score (single-sided offense model)."
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compute ratings from a JSON file of match records
    Rate {
        /// Input file: a JSON array of match records
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Use the single-sided offense model instead of match results
        #[arg(long)]
        offense: bool,

        /// Z-score the ratings
        #[arg(long)]
        normalize: bool,

        /// Rescale the ratings after solving
        #[arg(long, value_name = "FACTOR")]
        scale: Option<f64>,

        /// Print a rating histogram after the table
        #[arg(long)]
        histogram: bool,
    },
    /// Rate synthetic matches generated from a known ground truth
    Simulate {
        /// Number of teams in the synthetic universe
        #[arg(long, default_value_t = 30)]
        teams: usize,

        /// Number of matches to generate
        #[arg(long, default_value_t = 200)]
        matches: usize,

        /// Half-width of uniform score noise
        #[arg(long, default_value_t = 0.0)]
        noise: f64,

        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Print a rating histogram after the table
        #[arg(long)]
        histogram: bool,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    Ok(config)
}

/// Read match records from a JSON file, through the cache if one is configured
fn load_matches(input: &PathBuf, config: &AppConfig) -> Result<Vec<MatchRecord>> {
    let raw = std::fs::read_to_string(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", input.display(), e))?;
    let records: Vec<MatchRecord> = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", input.display(), e))?;

    let keyed = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| (format!("m{}", i), record))
        .collect();
    let source = StaticMatchSource::new(keyed);

    if config.ingest.cache_path.is_empty() {
        source.fetch_all()
    } else {
        let cache = JsonFileCache::open(&config.ingest.cache_path)?;
        CachedSource::new(source, cache).fetch_all()
    }
}

fn run_rate(
    config: &AppConfig,
    input: &PathBuf,
    offense: bool,
    normalize: bool,
    scale: Option<f64>,
    histogram: bool,
) -> Result<()> {
    let matches = load_matches(input, config)?;
    let universe = TeamIndex::from_matches(&matches)?.keys().to_vec();
    info!(
        teams = universe.len(),
        matches = matches.len(),
        "computing ratings"
    );

    let model = if offense {
        RatingModel::Offense
    } else {
        RatingModel::MatchResult {
            policy: config.engine.outcome_policy,
        }
    };
    let request = RatingRequest {
        universe,
        matches,
        model,
        normalize: normalize || config.engine.normalize,
        scale: scale.or(config.engine.scale),
    };

    let mapping = compute_ratings(&request)?;
    print!("{}", render_table(&mapping));
    if histogram {
        println!();
        print!("{}", render_histogram(&mapping));
    }
    Ok(())
}

fn run_simulate(
    config: &AppConfig,
    teams: usize,
    match_count: usize,
    noise: f64,
    seed: u64,
    histogram: bool,
) -> Result<()> {
    let truth = linspace_truth(teams, 0.0, 100.0);
    let synth = SyntheticConfig {
        noise,
        seed,
        ..Default::default()
    };
    let matches = generate_matches(&truth, match_count, &synth)?;
    info!(teams, matches = match_count, noise, "rating synthetic matches");

    let request = RatingRequest::match_result(
        truth.iter().map(|(key, _)| key.clone()).collect(),
        matches,
        config.engine.outcome_policy,
    );

    let mapping = compute_ratings(&request)?;
    print!("{}", render_table(&mapping));
    if histogram {
        println!();
        print!("{}", render_histogram(&mapping));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    match &args.command {
        Command::Rate {
            input,
            offense,
            normalize,
            scale,
            histogram,
        } => run_rate(&config, input, *offense, *normalize, *scale, *histogram),
        Command::Simulate {
            teams,
            matches,
            noise,
            seed,
            histogram,
        } => run_simulate(&config, *teams, *matches, *noise, *seed, *histogram),
    }
}
