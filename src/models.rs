//! Data models for articles at each stage of the cleaning pipeline.
//!
//! This module defines the record types the pipeline passes between stages:
//! - [`Candidate`]: a mayoral candidate with their known name tokens
//! - [`RawArticle`]: a scraped article normalized to the canonical schema
//! - [`AttributedArticle`]: an article assigned to a candidate
//! - [`CleanedArticle`]: the terminal record written to `clean_articles.json`
//! - [`AbridgedArticle`]: a [`CleanedArticle`] with the heavy text fields
//!   removed, written to `clean_articles_abr.json`
//!
//! Each stage produces a new record; nothing is mutated in place. Articles
//! that never match a candidate, or fall outside the eligibility window, are
//! dropped between stages rather than carried forward as null records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A mayoral candidate as loaded from the registry.
///
/// `name_tokens` holds every alias, nickname, and spelling variant used to
/// detect mentions of the candidate. Tokens are lowercased and trimmed at
/// load time, and the set collapses duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Stable registry identifier, e.g. `"cand_ll"`.
    pub candidate_id: String,
    /// Lowercased name variants used for mention detection.
    pub name_tokens: BTreeSet<String>,
    /// The date the candidacy was publicly declared; lower bound of the
    /// eligible article window.
    pub announcement_date: NaiveDate,
}

/// An article identifier: a real URL for web sources, or a synthetic counter
/// for archive exports that have no stable URL.
///
/// The ProQuest-derived sources (Tribune, Crain's) number their records
/// instead of linking them, so the dedup key has to accept both forms.
/// Serialized untagged, matching the mixed `url` column of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleUrl {
    Counter(u64),
    Link(String),
}

impl fmt::Display for ArticleUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleUrl::Link(url) => write!(f, "{url}"),
            ArticleUrl::Counter(n) => write!(f, "{n}"),
        }
    }
}

/// A scraped article after source-schema normalization, before attribution.
///
/// Produced once per scrape by the ingestor and treated as immutable. The
/// text is still raw: no lowercasing, no stopword removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    pub newspaper_id: String,
    pub url: ArticleUrl,
    pub title: String,
    pub text: String,
    pub published_date: NaiveDate,
}

/// An article assigned to a single candidate.
///
/// Only articles that matched a name token *and* fall inside
/// `[announcement_date, election cutoff]` become `AttributedArticle`s;
/// everything else is dropped by the attribution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedArticle {
    pub newspaper_id: String,
    pub url: ArticleUrl,
    pub title: String,
    pub text: String,
    pub published_date: NaiveDate,
    /// Registry id of the assigned candidate.
    pub candidate_id: String,
    /// The specific name token that triggered the match.
    pub name_token_matched: String,
    pub announcement_date: NaiveDate,
}

/// The terminal article record, serialized to the canonical dataset.
///
/// Field names mirror the published dataset schema: the matched token is
/// stored under `name_tokens` and the publication date under `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedArticle {
    pub candidate_id: String,
    #[serde(rename = "name_tokens")]
    pub name_token_matched: String,
    pub announcement_date: NaiveDate,
    pub newspaper_id: String,
    pub url: ArticleUrl,
    #[serde(rename = "date")]
    pub published_date: NaiveDate,
    pub title: String,
    pub text: String,
    pub clean_title: String,
    pub clean_text: String,
    /// Space-joined subset of `clean_text` sentences that mention the
    /// assigned candidate.
    pub clean_sentences: String,
}

/// A [`CleanedArticle`] without `title`, `text`, and `clean_text`.
///
/// About half the size of the full record; exists purely so a human can open
/// and skim the dataset. Analysis consumers read the full file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbridgedArticle {
    pub candidate_id: String,
    #[serde(rename = "name_tokens")]
    pub name_token_matched: String,
    pub announcement_date: NaiveDate,
    pub newspaper_id: String,
    pub url: ArticleUrl,
    #[serde(rename = "date")]
    pub published_date: NaiveDate,
    pub clean_title: String,
    pub clean_sentences: String,
}

impl CleanedArticle {
    /// Project this record down to its human-readable abridged form.
    pub fn abridged(&self) -> AbridgedArticle {
        AbridgedArticle {
            candidate_id: self.candidate_id.clone(),
            name_token_matched: self.name_token_matched.clone(),
            announcement_date: self.announcement_date,
            newspaper_id: self.newspaper_id.clone(),
            url: self.url.clone(),
            published_date: self.published_date,
            clean_title: self.clean_title.clone(),
            clean_sentences: self.clean_sentences.clone(),
        }
    }

    /// Dedup key for the export stage: one surviving record per candidate
    /// per article.
    pub fn dedup_key(&self) -> (String, ArticleUrl) {
        (self.candidate_id.clone(), self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_cleaned() -> CleanedArticle {
        CleanedArticle {
            candidate_id: "cand_jd".to_string(),
            name_token_matched: "jane doe".to_string(),
            announcement_date: date(2022, 1, 1),
            newspaper_id: "news_tt".to_string(),
            url: ArticleUrl::Link("https://example.com/a".to_string()),
            published_date: date(2022, 2, 1),
            title: "Jane Doe announces".to_string(),
            text: "Jane Doe announced today.".to_string(),
            clean_title: "jane doe announces".to_string(),
            clean_text: "jane doe announced today.".to_string(),
            clean_sentences: "jane doe announced today".to_string(),
        }
    }

    #[test]
    fn test_article_url_untagged_serialization() {
        let link = ArticleUrl::Link("https://example.com".to_string());
        let counter = ArticleUrl::Counter(7001);
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            "\"https://example.com\""
        );
        assert_eq!(serde_json::to_string(&counter).unwrap(), "7001");
    }

    #[test]
    fn test_article_url_untagged_deserialization() {
        let link: ArticleUrl = serde_json::from_str("\"https://example.com\"").unwrap();
        let counter: ArticleUrl = serde_json::from_str("42").unwrap();
        assert_eq!(link, ArticleUrl::Link("https://example.com".to_string()));
        assert_eq!(counter, ArticleUrl::Counter(42));
    }

    #[test]
    fn test_cleaned_article_dataset_field_names() {
        let json = serde_json::to_string(&sample_cleaned()).unwrap();
        assert!(json.contains("\"name_tokens\":\"jane doe\""));
        assert!(json.contains("\"date\":\"2022-02-01\""));
        assert!(json.contains("\"announcement_date\":\"2022-01-01\""));
        assert!(!json.contains("name_token_matched"));
        assert!(!json.contains("published_date"));
    }

    #[test]
    fn test_cleaned_article_round_trip() {
        let article = sample_cleaned();
        let json = serde_json::to_string(&article).unwrap();
        let reloaded: CleanedArticle = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, article);
    }

    #[test]
    fn test_abridged_drops_heavy_fields() {
        let article = sample_cleaned();
        let abridged = article.abridged();
        let json = serde_json::to_string(&abridged).unwrap();
        assert!(!json.contains("\"text\""));
        assert!(!json.contains("\"clean_text\""));
        assert!(!json.contains("\"title\""));
        assert!(json.contains("\"clean_title\""));
        assert!(json.contains("\"clean_sentences\""));
        assert_eq!(abridged.candidate_id, article.candidate_id);
        assert_eq!(abridged.url, article.url);
    }

    #[test]
    fn test_dedup_key_pairs_candidate_and_url() {
        let article = sample_cleaned();
        let (cand, url) = article.dedup_key();
        assert_eq!(cand, "cand_jd");
        assert_eq!(url, ArticleUrl::Link("https://example.com/a".to_string()));
    }
}
