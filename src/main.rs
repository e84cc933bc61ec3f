//! # Mayoral News Pipeline
//!
//! A batch pipeline that attributes scraped Chicago mayoral-election news
//! articles to candidates, cleans the text, and exports the deduplicated
//! dataset consumed by the analysis and dashboard layers.
//!
//! ## Usage
//!
//! ```sh
//! mayoral_news_pipeline -s ./data -o ./data \
//!     --tokens-csv ./data/cleaning_name_tokens.csv \
//!     --announcements ./data/announcement_dates.yaml
//! ```
//!
//! ## Architecture
//!
//! The pipeline runs as a single-threaded sequence over an in-memory
//! collection of articles:
//! 1. **Registry**: load candidate name tokens and announcement dates
//! 2. **Ingest**: normalize each source's JSON records to one schema
//! 3. **Attribute**: match name tokens, enforce the eligibility window
//! 4. **Normalize**: clean titles and text, extract candidate sentences
//! 5. **Export**: deduplicate across sources and write both dataset files
//!
//! The scrapers that produce the per-source JSON files and the analysis
//! scripts that consume `clean_articles.json` are external collaborators.

use clap::Parser;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod attribution;
mod cli;
mod error;
mod export;
mod models;
mod normalize;
mod registry;
mod sources;
mod stopwords;

use attribution::{AttributionEngine, AttributionPolicy};
use cli::Cli;
use error::PipelineError;
use models::CleanedArticle;
use normalize::TextCleaner;
use registry::CandidateRegistry;

#[instrument]
fn main() -> Result<(), PipelineError> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("mayoral_news_pipeline starting up");

    let args = Cli::parse();
    debug!(?args.source_dir, ?args.output_dir, exhaustive = args.exhaustive, "Parsed CLI arguments");

    // Early check: surface permission problems before doing any work.
    export::ensure_writable_dir(&args.output_dir)?;

    // Registry problems are fatal; attribution needs the complete table.
    let registry = CandidateRegistry::load(&args.tokens_csv, &args.announcements)?;

    let policy = if args.exhaustive {
        AttributionPolicy::Exhaustive
    } else {
        AttributionPolicy::FirstMatch
    };
    let engine = AttributionEngine::new(&registry, policy)?;
    let stopword_set = stopwords::default_stopwords();
    let cleaner = TextCleaner::new(&stopword_set)?;

    // ---- Ingest, attribute, and clean each source in order ----
    // SOURCES order decides which copy survives deduplication (last wins).
    let mut all_cleaned: Vec<CleanedArticle> = Vec::new();
    for source in sources::SOURCES {
        let path = args.source_dir.join(source.file_name);
        let records = match sources::load_source_file(&path) {
            Ok(records) => records,
            Err(e) => {
                error!(
                    newspaper_id = %source.newspaper_id,
                    path = %path.display(),
                    error = %e,
                    "Failed to load source file; skipping source"
                );
                continue;
            }
        };

        let raw = sources::ingest(records, source.newspaper_id);
        let attributed = engine.attribute_all(&raw);
        info!(
            newspaper_id = %source.newspaper_id,
            ingested = raw.len(),
            attributed = attributed.len(),
            "Attributed source articles"
        );

        all_cleaned.extend(cleaner.normalize_all(attributed, &registry));
    }
    info!(count = all_cleaned.len(), "Cleaned articles across all sources");

    // ---- Deduplicate and export ----
    let deduplicated = export::deduplicate(all_cleaned);
    export::export(&deduplicated, &args.output_dir)?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = deduplicated.len(),
        "Execution complete"
    );

    Ok(())
}
