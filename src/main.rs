//! # Knowledge Hub CLI (`kb`)
//!
//! Browse, search and serve the knowledge base.
//!
//! ## Usage
//!
//! ```bash
//! kb --config ./config/kb.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kb list <collection>` | List a collection, optionally filtered by one field |
//! | `kb get <collection> <id>` | Show one record and what it links to |
//! | `kb facets <collection> <field>` | Distinct field values with counts |
//! | `kb search "<query>"` | Case-insensitive substring search |
//! | `kb ask "<question>"` | Canned assistant answer with sources |
//! | `kb analyze-rfp` | Mock RFP analysis, optionally exported as text |
//! | `kb check` | Referential integrity report |
//! | `kb stats` | Record counts and breakdowns |
//! | `kb serve` | Start the HTTP API |

use clap::{Parser, Subcommand};
use knowledge_core::Collection;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use knowledge_hub::{ask, check, config, get, knowledge, list, search, server, stats};

/// Knowledge Hub CLI: capabilities, case studies, RFP answers and glossary.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "kb",
    about = "Knowledge Hub — look up capabilities, case studies, RFP answers and glossary terms",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/kb.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the records of a collection.
    ///
    /// Collections: `capabilities`, `case-studies`, `rfp-answers`, `glossary`.
    List {
        collection: Collection,

        /// Field to filter on (e.g. `pillar`, `category`, `tags`).
        #[arg(long, requires = "value")]
        field: Option<String>,

        /// Value the field must equal (or contain, for list fields).
        #[arg(long, requires = "field")]
        value: Option<String>,
    },

    /// Show one record by primary key.
    ///
    /// Capabilities and case studies use their id; RFP answers use the
    /// question text; glossary entries use the term.
    Get { collection: Collection, id: String },

    /// Show the distinct values of a field with record counts.
    Facets { collection: Collection, field: String },

    /// Search every collection for a substring.
    Search {
        query: String,

        /// Restrict the search to one collection.
        #[arg(long)]
        collection: Option<Collection>,

        /// Maximum number of results to print (default: `[search].max_results`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Ask the assistant a question.
    Ask { question: String },

    /// Run the mock RFP analysis.
    AnalyzeRfp {
        /// Write the plain-text export to this file.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Check referential integrity of the dataset.
    Check,

    /// Show record counts and breakdowns.
    Stats,

    /// Start the HTTP API on `[server].bind`.
    Serve,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_config_or_minimal(&cli.config)?;
    let loaded = knowledge::load_knowledge(&cfg)?;

    match cli.command {
        Commands::List {
            collection,
            field,
            value,
        } => {
            list::run_list(&loaded.kb, collection, field.as_deref(), value.as_deref())?;
        }
        Commands::Get { collection, id } => {
            get::run_get(&loaded.kb, collection, &id)?;
        }
        Commands::Facets { collection, field } => {
            list::run_facets(&loaded.kb, collection, &field)?;
        }
        Commands::Search {
            query,
            collection,
            limit,
        } => {
            search::run_search(&cfg, &loaded.kb, &query, collection, limit)?;
        }
        Commands::Ask { question } => {
            ask::run_ask(&loaded.kb, &question)?;
        }
        Commands::AnalyzeRfp { export } => {
            ask::run_analyze_rfp(&loaded.kb, export.as_deref())?;
        }
        Commands::Check => {
            check::run_check(&loaded)?;
        }
        Commands::Stats => {
            stats::run_stats(&loaded)?;
        }
        Commands::Serve => {
            server::run_server(&cfg, loaded).await?;
        }
    }

    Ok(())
}
