//! # Brevsok CLI
//!
//! Command-line interface for searching the Brevsok letter corpus.
//!
//! ## Commands
//!
//! - `brevsok query <expression>` - Search the corpus with the mini-language
//! - `brevsok show <id>` - Display a single letter
//! - `brevsok stats` - Show corpus statistics and facet values
//!
//! ## Example Usage
//!
//! ```bash
//! # Letters from Olsen written in 1904 mentioning a storm
//! brevsok query "f:Olsen y:1904 storm"
//!
//! # Everything tagged both "family" and "emigration", newest first
//! brevsok query "t:family t:emigration" --sort date-desc
//!
//! # Print a shareable link for the current search
//! brevsok query "!t:weather winter" --link
//! ```

mod app;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Brevsok - faceted search over a historical letter corpus
#[derive(Parser)]
#[command(name = "brevsok")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the corpus export (overrides the configured path)
    #[arg(short = 'C', long, global = true, env = "BREVSOK_CORPUS")]
    corpus: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the corpus with the search mini-language
    Query {
        /// Search expression (e.g. 'f:Olsen y:1904 !t:weather "dear brother"')
        expression: String,

        /// Sort order (date-asc, date-desc, creator, location, destination, length)
        #[arg(short, long)]
        sort: Option<String>,

        /// Maximum number of results to show (0 = use configured limit)
        #[arg(short, long, default_value = "0")]
        limit: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,

        /// Print the query string form of the search for sharing
        #[arg(short = 'L', long)]
        link: bool,
    },

    /// Display a single letter
    Show {
        /// Letter id
        id: u64,
    },

    /// Show corpus statistics and facet values
    Stats,
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => brevsok_core::Config::load_from(path)?,
        None => brevsok_core::Config::load()?,
    };

    // Execute command
    match cli.command {
        Commands::Query {
            expression,
            sort,
            limit,
            output,
            link,
        } => commands::query::run(config, cli.corpus, &expression, sort, limit, output, link),
        Commands::Show { id } => commands::show::run(config, cli.corpus, id),
        Commands::Stats => commands::stats::run(config, cli.corpus),
    }
}
