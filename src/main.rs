//! articlecorpus - Journal Article Corpus Statistics
//!
//! Loads harvested article metadata and extracted full-text files, then
//! exports per-article keyword counts as CSV.
//!
//! ## Usage
//!
//! ```bash
//! articlecorpus export --metadata article_subset_master.json \
//!     --text-dir ./txt \
//!     --journal "Cogent Economics & Finance=cef" \
//!     --journal "Essays in Economic and Business History=eebh"
//!
//! articlecorpus export --metadata master.json --paths paths.txt --queries queries.json
//! ```

use anyhow::{Context, Result};
use articlecorpus::{
    corpus::{Corpus, ListingOptions},
    export,
    loader::{self, JournalSource},
    queries::{self, QuerySet},
};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Journal Article Corpus - Pattern Frequency Statistics
#[derive(Parser)]
#[command(name = "articlecorpus")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the corpus and export keyword counts as CSV
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Query definitions (JSON array); defaults to the built-in set
        #[arg(long)]
        queries: Option<PathBuf>,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for a timestamped CSV when --output is not given
        #[arg(long, default_value = "./output")]
        output_dir: PathBuf,
    },

    /// List loaded article titles in year order
    Titles {
        #[command(flatten)]
        input: InputArgs,

        /// Hide the year column
        #[arg(long)]
        no_year: bool,

        /// Hide the character count column
        #[arg(long)]
        no_chars: bool,
    },

    /// Print the built-in query definitions as JSON
    Queries,
}

#[derive(Args)]
struct InputArgs {
    /// Metadata JSON array (flat entries or DOAJ `bibjson` records)
    #[arg(long)]
    metadata: PathBuf,

    /// File listing one text path per metadata entry, in the same order
    #[arg(long, conflicts_with = "journals", required_unless_present = "journals")]
    paths: Option<PathBuf>,

    /// Directory holding numbered text files ({prefix}_000.txt, ...)
    #[arg(long, default_value = "./txt")]
    text_dir: PathBuf,

    /// Journal to include, as "TITLE=PREFIX" (repeatable)
    #[arg(long = "journal")]
    journals: Vec<String>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if cli.log_json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .init();
    }

    match cli.command {
        Commands::Export {
            input,
            queries,
            output,
            output_dir,
        } => run_export(input, queries, output, output_dir).await,
        Commands::Titles {
            input,
            no_year,
            no_chars,
        } => {
            let corpus = load_corpus(&input)?;
            for line in corpus.listing(ListingOptions {
                year: !no_year,
                chars: !no_chars,
            }) {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Queries => {
            let json = serde_json::to_string_pretty(&queries::default_queries())?;
            println!("{}", json);
            Ok(())
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Read metadata, pair it with text files, and build the corpus
fn load_corpus(input: &InputArgs) -> Result<Corpus> {
    let entries = loader::read_metadata(&input.metadata)
        .with_context(|| format!("Failed to read metadata from {}", input.metadata.display()))?;

    let (paths, entries) = match &input.paths {
        Some(list) => {
            let paths = loader::read_path_list(list)
                .with_context(|| format!("Failed to read path list {}", list.display()))?;
            (paths, entries)
        }
        None => {
            let sources = input
                .journals
                .iter()
                .map(|s| JournalSource::parse(s))
                .collect::<articlecorpus::Result<Vec<_>>>()
                .context("Invalid --journal value")?;
            loader::plan_journal_sources(&entries, &sources, &input.text_dir)
        }
    };

    let records = loader::load(&paths, &entries).context("Failed to load articles")?;
    let corpus = Corpus::build(records).context("Failed to build corpus")?;

    info!(
        corpus = %corpus,
        corrupt = corpus.corrupt_count(),
        abstract_fallback = corpus.abstract_fallback_count(),
        "Corpus ready"
    );
    Ok(corpus)
}

async fn run_export(
    input: InputArgs,
    queries_path: Option<PathBuf>,
    output: Option<PathBuf>,
    output_dir: PathBuf,
) -> Result<()> {
    // Compile queries before touching any article so bad patterns fail fast
    let definitions = match &queries_path {
        Some(path) => queries::read_queries(path)
            .with_context(|| format!("Failed to read queries from {}", path.display()))?,
        None => queries::default_queries(),
    };
    let query_set = QuerySet::compile(&definitions).context("Invalid query configuration")?;

    let corpus = Arc::new(load_corpus(&input)?);

    println!(
        "Articles: {} ({} corrupt, {} abstract fallback)",
        corpus.len(),
        corpus.corrupt_count(),
        corpus.abstract_fallback_count()
    );
    println!("Scanning {} query columns...", query_set.len());

    let table = export::export_concurrent(Arc::clone(&corpus), &query_set).await?;

    let output_path = match output {
        Some(path) => path,
        None => {
            let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
            output_dir.join(format!("{}_article_metadata.csv", timestamp))
        }
    };
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    table
        .save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("Saved: {:?}", output_path);
    Ok(())
}
