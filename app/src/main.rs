#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod command;

use command::{
    CheckStrategy, CommandStrategy, GleanInput, GleanStrategy, InfoStrategy, InitStrategy,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "reglean")]
#[command(about = "Glean experiment metadata from filenames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Glean names given as arguments, or one per stdin line
    Glean {
        /// Names to glean
        names: Vec<String>,

        /// Config file (default: ~/reglean/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Extra category as NAME=PATTERN (repeatable)
        #[arg(short = 'p', long = "category", value_parser = command::parse_category)]
        categories: Vec<(String, String)>,

        /// Value for categories that find nothing
        #[arg(short, long)]
        fill: Option<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Compile every pattern in the config
    Check {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show configured categories
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Initialize configuration
    Init {
        /// Write to this path instead of ~/reglean/config.json
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Glean {
            names,
            config,
            categories,
            fill,
            pretty,
        } => GleanStrategy.execute(GleanInput {
            names,
            config,
            categories,
            fill,
            pretty,
        }),
        Commands::Check { config } => CheckStrategy.execute(config),
        Commands::Info { config } => InfoStrategy.execute(config),
        Commands::Init { path } => InitStrategy.execute(path),
        Commands::Version => VersionStrategy.execute(()),
    }
}
