//! fe - food emission calculator
//!
//! Usage:
//!   fe countries --dataset area.json                 # List countries
//!   fe predict --dataset area.json --country Japan   # Predict at the country's means
//!   fe predict ... --population 120000000 --urban 92 --year 2030
//!   fe compare --dataset sources.json --country Brazil --population 220000000 --urban 90
//!   fe summary --dataset area.json --country Japan   # Coefficient table

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{CompareArgs, Context, PredictArgs};

/// fe - estimate agricultural emissions from population figures
#[derive(Parser)]
#[command(name = "fe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dataset file (JSON); overrides the config file
    #[arg(long, global = true, value_name = "FILE")]
    dataset: Option<PathBuf>,

    /// Calculator config file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the countries in a dataset
    Countries {
        /// Dataset is keyed by emission category
        #[arg(long)]
        scenario: bool,
    },

    /// Predict emissions for one country
    Predict {
        /// Country name as it appears in the dataset
        #[arg(long)]
        country: String,

        /// Year (defaults to the configured year)
        #[arg(long)]
        year: Option<String>,

        /// Total population (defaults to the country's training mean)
        #[arg(long)]
        population: Option<u64>,

        /// Urban share in percent (defaults to the country's training mean)
        #[arg(long)]
        urban: Option<f64>,
    },

    /// Compare a scenario against a baseline for every emission category
    Compare {
        #[arg(long)]
        country: String,

        /// Scenario total population
        #[arg(long)]
        population: Option<u64>,

        /// Scenario urban share in percent
        #[arg(long)]
        urban: Option<f64>,

        /// Baseline total population (defaults to the training mean)
        #[arg(long)]
        baseline_population: Option<u64>,

        /// Baseline urban share in percent (defaults to the training mean)
        #[arg(long)]
        baseline_urban: Option<f64>,
    },

    /// Show the coefficient table of a model
    Summary {
        #[arg(long)]
        country: String,

        /// Emission category (scenario datasets only)
        #[arg(long)]
        category: Option<String>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let ctx = match Context::load(cli.config.as_deref(), cli.dataset, cli.json) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Countries { scenario } => commands::countries(&ctx, scenario),

        Commands::Predict {
            country,
            year,
            population,
            urban,
        } => commands::predict(
            &ctx,
            &PredictArgs {
                country,
                year,
                population,
                urban,
            },
        ),

        Commands::Compare {
            country,
            population,
            urban,
            baseline_population,
            baseline_urban,
        } => commands::compare(
            &ctx,
            &CompareArgs {
                country,
                population,
                urban,
                baseline_population,
                baseline_urban,
            },
        ),

        Commands::Summary { country, category } => {
            commands::summary(&ctx, &country, category.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
