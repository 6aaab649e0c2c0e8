//! # BookMood Sync CLI (`bookmood`)
//!
//! The `bookmood` binary batch-fetches book metadata from the Aladin TTB
//! API and ingests it into the BookMood catalog database.
//!
//! ## Usage
//!
//! ```bash
//! bookmood --config ./config/bookmood.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bookmood init` | Create the catalog database and run schema migrations |
//! | `bookmood queries` | List configured sync queries and credential status |
//! | `bookmood sync` | Fetch, normalize, and ingest all configured queries |
//! | `bookmood stats` | Show catalog row counts and per-category breakdown |
//!
//! The Aladin API key is read from the `ALADIN_TTB_KEY` environment
//! variable; `sync` refuses to start without it. Individual record or page
//! failures never fail the process — `sync` exits non-zero only on missing
//! configuration or an unexpected top-level error.

mod config;
mod db;
mod migrate;
mod models;
mod normalize;
mod source;
mod sources;
mod stats;
mod store;
mod sync;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BookMood Sync — batch ingestion of Aladin book metadata into the
/// BookMood catalog.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/bookmood.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "bookmood",
    about = "BookMood Sync — batch ingestion of Aladin book metadata",
    version,
    long_about = "BookMood Sync walks a configured set of Aladin TTB API queries (bestsellers, \
    new arrivals, category browses), normalizes the results, and inserts them into the \
    book_external catalog table keyed by ISBN-13. Records already present are skipped."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/bookmood.toml`. Database path, API paging,
    /// and the query list are read from this file.
    #[arg(long, global = true, default_value = "./config/bookmood.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the catalog database schema.
    ///
    /// Creates the SQLite database file and the `book_external` table.
    /// This command is idempotent — running it multiple times is safe.
    Init,

    /// List configured sync queries and credential status.
    ///
    /// Shows the (query type, category) pairs a sync run will walk and
    /// whether the API key environment variable is set. Useful for
    /// verifying configuration before running a sync.
    Queries,

    /// Fetch and ingest all configured queries.
    ///
    /// Walks every configured query page by page, normalizes the returned
    /// items, and inserts new records into the catalog. Already-known
    /// ISBNs are skipped; per-record failures are counted, reported, and
    /// never abort the run.
    Sync {
        /// Dry run — fetch and normalize, but write nothing.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of persist attempts across the whole run
        /// (counts inserted, skipped, and failed records alike).
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Show catalog statistics.
    ///
    /// Prints row counts, newest/oldest fetch timestamps, and a
    /// per-category breakdown.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Queries => {
            sources::list_queries(&cfg)?;
        }
        Commands::Sync { dry_run, limit } => {
            sync::run_sync(&cfg, dry_run, limit).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
