//! Attribution engine: assign each article to a candidate.
//!
//! Matching walks candidates in registry order (sorted by id) and each
//! candidate's tokens in set order, testing whole-word occurrence of the
//! token in the lowercased article text. The first token that matches
//! assigns its candidate.
//!
//! Two policies govern what happens after that first hit:
//!
//! - [`AttributionPolicy::FirstMatch`] (default): the search stops. An
//!   article mentioning several candidates is attributed only to the
//!   earliest-ordered one. This is a documented choice, not a claim that it
//!   is optimal.
//! - [`AttributionPolicy::Exhaustive`]: every matching candidate yields its
//!   own attributed record, first matching token each.
//!
//! After assignment the eligibility window applies: an article published
//! before the candidate's announcement date, or after the election cutoff,
//! is dropped. Under `FirstMatch` an ineligible first hit drops the whole
//! article; the search does not resume with later candidates.
//!
//! Token matching is anchored at word boundaries, so a token that happens
//! to be a substring of an unrelated word does not fire.

use crate::error::PipelineError;
use crate::models::{AttributedArticle, RawArticle};
use crate::registry::{CandidateRegistry, election_cutoff};
use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, instrument};

/// How to treat an article whose text mentions more than one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributionPolicy {
    /// Attribute to the first matching candidate only.
    #[default]
    FirstMatch,
    /// Emit one attributed record per matching candidate.
    Exhaustive,
}

/// A candidate's compiled token matchers, in deterministic token order.
#[derive(Debug)]
struct CandidateMatcher {
    candidate_id: String,
    announcement_date: NaiveDate,
    tokens: Vec<(String, Regex)>,
}

/// Matches articles against the registry's name tokens.
///
/// Construction compiles one whole-word regex per token; attribution itself
/// is allocation-light and deterministic for a given registry.
#[derive(Debug)]
pub struct AttributionEngine {
    matchers: Vec<CandidateMatcher>,
    policy: AttributionPolicy,
    cutoff: NaiveDate,
}

impl AttributionEngine {
    pub fn new(
        registry: &CandidateRegistry,
        policy: AttributionPolicy,
    ) -> Result<Self, PipelineError> {
        let mut matchers = Vec::with_capacity(registry.len());
        for candidate in registry.candidates() {
            let mut tokens = Vec::with_capacity(candidate.name_tokens.len());
            for token in &candidate.name_tokens {
                let pattern = format!(r"\b{}\b", regex::escape(token));
                tokens.push((token.clone(), Regex::new(&pattern)?));
            }
            matchers.push(CandidateMatcher {
                candidate_id: candidate.candidate_id.clone(),
                announcement_date: candidate.announcement_date,
                tokens,
            });
        }
        Ok(AttributionEngine {
            matchers,
            policy,
            cutoff: election_cutoff(),
        })
    }

    /// Attribute one article.
    ///
    /// Returns zero records when no token matches or the match is outside
    /// the eligibility window, one record under `FirstMatch`, and up to one
    /// per candidate under `Exhaustive`.
    #[instrument(level = "debug", skip_all, fields(url = %article.url))]
    pub fn attribute(&self, article: &RawArticle) -> Vec<AttributedArticle> {
        let text = article.text.to_lowercase();
        let mut attributed = Vec::new();

        for matcher in &self.matchers {
            let Some((token, _)) = matcher
                .tokens
                .iter()
                .find(|(_, regex)| regex.is_match(&text))
            else {
                continue;
            };

            let eligible = article.published_date >= matcher.announcement_date
                && article.published_date <= self.cutoff;
            if eligible {
                attributed.push(AttributedArticle {
                    newspaper_id: article.newspaper_id.clone(),
                    url: article.url.clone(),
                    title: article.title.clone(),
                    text: article.text.clone(),
                    published_date: article.published_date,
                    candidate_id: matcher.candidate_id.clone(),
                    name_token_matched: token.clone(),
                    announcement_date: matcher.announcement_date,
                });
            } else {
                debug!(
                    candidate_id = %matcher.candidate_id,
                    published = %article.published_date,
                    announced = %matcher.announcement_date,
                    "Matched outside eligibility window; dropping"
                );
            }

            if self.policy == AttributionPolicy::FirstMatch {
                // First hit decides the article, eligible or not.
                break;
            }
        }

        if attributed.is_empty() {
            debug!("No eligible candidate match");
        }
        attributed
    }

    /// Attribute a whole batch, flattening per-article results and
    /// preserving input order.
    #[instrument(level = "info", skip_all)]
    pub fn attribute_all(&self, articles: &[RawArticle]) -> Vec<AttributedArticle> {
        articles
            .iter()
            .flat_map(|article| self.attribute(article))
            .collect()
    }
}
