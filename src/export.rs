//! Deduplication and dataset export.
//!
//! The cleaned records from all six sources are concatenated, deduplicated
//! by `(candidate_id, url)`, and written out twice:
//!
//! ```text
//! output_dir/
//! ├── clean_articles.json       — every CleanedArticle field
//! └── clean_articles_abr.json   — minus title, text, clean_text
//! ```
//!
//! Both files are whole-file overwrites each run; there is no append or
//! incremental mode.

use crate::error::PipelineError;
use crate::models::{AbridgedArticle, ArticleUrl, CleanedArticle};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// File name of the full dataset, stable across runs.
pub const CLEAN_ARTICLES_FILE: &str = "clean_articles.json";
/// File name of the abridged dataset.
pub const CLEAN_ARTICLES_ABR_FILE: &str = "clean_articles_abr.json";

/// Remove duplicate `(candidate_id, url)` records, keeping the last
/// occurrence.
///
/// Later sources are ingested later, so last-write-wins means the most
/// recently scraped copy of an article survives. Survivors keep their
/// relative input order; nothing is re-sorted. Total over any input,
/// including the empty one.
#[instrument(level = "info", skip_all)]
pub fn deduplicate(articles: Vec<CleanedArticle>) -> Vec<CleanedArticle> {
    let total = articles.len();
    let mut last_index: HashMap<(String, ArticleUrl), usize> = HashMap::with_capacity(total);
    for (index, article) in articles.iter().enumerate() {
        last_index.insert(article.dedup_key(), index);
    }
    let deduplicated: Vec<CleanedArticle> = articles
        .into_iter()
        .enumerate()
        .filter(|(index, article)| last_index[&article.dedup_key()] == *index)
        .map(|(_, article)| article)
        .collect();
    info!(
        total,
        kept = deduplicated.len(),
        dropped = total - deduplicated.len(),
        "Deduplicated cleaned articles"
    );
    deduplicated
}

/// Ensure the output directory exists and is writable.
///
/// Creates the directory if needed, then probes it with a throwaway file so
/// permission problems surface before the pipeline does any work.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn ensure_writable_dir(path: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(path)?;
    let probe_path = path.join("..__probe_write__");
    fs::File::create(&probe_path)?;
    let _ = fs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

/// Write the full and abridged datasets into `out_dir`.
#[instrument(level = "info", skip_all, fields(out_dir = %out_dir.display(), count = articles.len()))]
pub fn export(articles: &[CleanedArticle], out_dir: &Path) -> Result<(), PipelineError> {
    let full_path = out_dir.join(CLEAN_ARTICLES_FILE);
    fs::write(&full_path, serde_json::to_string(articles)?)?;
    info!(path = %full_path.display(), "Wrote full dataset");

    let abridged: Vec<AbridgedArticle> = articles.iter().map(CleanedArticle::abridged).collect();
    let abridged_path = out_dir.join(CLEAN_ARTICLES_ABR_FILE);
    fs::write(&abridged_path, serde_json::to_string(&abridged)?)?;
    info!(path = %abridged_path.display(), "Wrote abridged dataset");

    Ok(())
}
