//! Per-source article ingestion.
//!
//! Each of the six outlets is scraped by an external collaborator that
//! writes one JSON array per paper into the source directory. Two schema
//! families exist, mirroring how the files were produced:
//!
//! | Family | Files | Shape |
//! |--------|-------|-------|
//! | Web scrapes | `defender.json`, `hph.json`, `ln.json`, `triibe.json` | lowercase keys, `url` is a link |
//! | ProQuest exports | `chicago_tribune.json`, `crain.json` | capitalized keys, `Url` is a synthetic counter |
//!
//! Serde aliases fold both families onto one [`SourceRecord`], and
//! [`ingest`] maps records onto the canonical [`RawArticle`] schema. The
//! mapping is a pure, stateless field transform: no matching, no cleaning.
//!
//! A record missing its text, url, or date (or carrying an unparseable
//! date) is skipped with a warning and the run continues; losing one
//! article never fails a source.

use crate::models::{ArticleUrl, RawArticle};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};

/// A newspaper the pipeline ingests, tied to its scraper output file.
#[derive(Debug, Clone, Copy)]
pub struct Source {
    pub newspaper_id: &'static str,
    pub file_name: &'static str,
}

/// The six outlets, in ingestion order.
///
/// This order is load-bearing: deduplication keeps the last occurrence of a
/// `(candidate_id, url)` pair, so later sources here win conflicts.
pub const SOURCES: [Source; 6] = [
    Source { newspaper_id: "news_cc", file_name: "crain.json" },
    Source { newspaper_id: "news_ct", file_name: "chicago_tribune.json" },
    Source { newspaper_id: "news_cd", file_name: "defender.json" },
    Source { newspaper_id: "news_hp", file_name: "hph.json" },
    Source { newspaper_id: "news_ln", file_name: "ln.json" },
    Source { newspaper_id: "news_tt", file_name: "triibe.json" },
];

/// One raw record as found in a scraper output file.
///
/// Every field is optional so that a single malformed record deserializes
/// instead of poisoning its whole file; [`ingest`] decides what to do with
/// the gaps. Extra keys some scrapers emit (pre-filled candidate columns)
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    #[serde(default, alias = "Url")]
    pub url: Option<ArticleUrl>,
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, alias = "Text")]
    pub text: Option<String>,
    #[serde(default, alias = "Date")]
    pub date: Option<String>,
}

/// Read one scraper output file as a list of [`SourceRecord`]s.
///
/// A missing or malformed *file* is an error for the caller to handle; the
/// run-level policy (log and continue with the remaining papers) lives in
/// `main`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_source_file(path: &Path) -> Result<Vec<SourceRecord>, crate::error::PipelineError> {
    let raw = fs::read_to_string(path)?;
    let records: Vec<SourceRecord> = serde_json::from_str(&raw)?;
    info!(count = records.len(), "Loaded source records");
    Ok(records)
}

/// Map source records onto the canonical [`RawArticle`] schema.
///
/// Records with no url, no text, or no parseable `YYYY-MM-DD` date are
/// skipped and logged. A missing title becomes the empty string; titles are
/// not required for attribution.
#[instrument(level = "info", skip_all, fields(%newspaper_id))]
pub fn ingest(records: Vec<SourceRecord>, newspaper_id: &str) -> Vec<RawArticle> {
    let total = records.len();
    let mut articles = Vec::with_capacity(total);
    let mut skipped = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let Some(url) = record.url else {
            warn!(index, "Record has no url; skipping");
            skipped += 1;
            continue;
        };
        let text = match record.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                warn!(index, url = %url, "Record has no text; skipping");
                skipped += 1;
                continue;
            }
        };
        let Some(date) = record.date else {
            warn!(index, url = %url, "Record has no date; skipping");
            skipped += 1;
            continue;
        };
        let published_date = match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(index, url = %url, date = %date, error = %e, "Unparseable date; skipping");
                skipped += 1;
                continue;
            }
        };

        articles.push(RawArticle {
            newspaper_id: newspaper_id.to_string(),
            url,
            title: record.title.unwrap_or_default(),
            text,
            published_date,
        });
    }

    info!(total, ingested = articles.len(), skipped, "Ingested source records");
    articles
}
