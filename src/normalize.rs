//! Text normalization: stopword removal, punctuation stripping, and
//! candidate-sentence extraction.
//!
//! [`TextCleaner`] is constructed once per run from an explicit stopword
//! slice and holds every compiled pattern it needs; nothing lives in module
//! globals, so tests can build cleaners over tiny synthetic stopword sets.
//!
//! The cleaning rules reproduce the dataset's published semantics:
//!
//! - titles lose stopwords and *all* punctuation;
//! - body text keeps the sentence terminators `.` `!` `?`, then newlines,
//!   `!`, and `?` all collapse to `.` so the text splits cleanly on periods;
//! - `clean_sentences` is the space-joined subset of sentences that mention
//!   any of the assigned candidate's name tokens.
//!
//! Stopword removal is whole-word (a word-boundary alternation built from
//! the set), applied identically to titles and body text. On its own output
//! `clean_text` is a fixed point: cleaning already-cleaned text changes
//! nothing.

use crate::error::PipelineError;
use crate::models::{AttributedArticle, CleanedArticle};
use crate::registry::CandidateRegistry;
use itertools::Itertools;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

/// Compiled cleaning patterns over a fixed stopword set.
#[derive(Debug)]
pub struct TextCleaner {
    /// `None` when the stopword set is empty.
    stopword_re: Option<Regex>,
    title_punct_re: Regex,
    text_punct_re: Regex,
    terminator_re: Regex,
    whitespace_re: Regex,
}

impl TextCleaner {
    /// Build a cleaner over `stopwords`.
    ///
    /// Words are escaped and matched whole-word, in slice order; the caller
    /// decides the set (see [`crate::stopwords::default_stopwords`]).
    pub fn new(stopwords: &[&str]) -> Result<Self, PipelineError> {
        let stopword_re = if stopwords.is_empty() {
            None
        } else {
            let alternation = stopwords
                .iter()
                .map(|w| regex::escape(&w.to_lowercase()))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b(?:{alternation})\b"))?)
        };
        Ok(TextCleaner {
            stopword_re,
            title_punct_re: Regex::new(r"[^\w\s]+")?,
            text_punct_re: Regex::new(r"[^\w\s.!?]+")?,
            terminator_re: Regex::new(r"[\n?!]")?,
            whitespace_re: Regex::new(r"\s+")?,
        })
    }

    fn remove_stopwords(&self, text: &str) -> String {
        match &self.stopword_re {
            Some(re) => re.replace_all(text, " ").into_owned(),
            None => text.to_string(),
        }
    }

    /// Clean a title: lowercase, drop stopwords, drop all punctuation,
    /// collapse whitespace.
    pub fn clean_title(&self, title: &str) -> String {
        let lowered = title.to_lowercase();
        let without_stopwords = self.remove_stopwords(&lowered);
        let without_punct = self.title_punct_re.replace_all(&without_stopwords, " ");
        self.whitespace_re
            .replace_all(&without_punct, " ")
            .trim()
            .to_string()
    }

    /// Clean body text, preserving sentence structure as `.`-terminated
    /// runs: lowercase, drop stopwords, drop punctuation except `.` `!` `?`,
    /// normalize newlines and `!`/`?` to `.`, collapse whitespace.
    pub fn clean_text(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let without_stopwords = self.remove_stopwords(&lowered);
        let without_punct = self.text_punct_re.replace_all(&without_stopwords, " ");
        let terminated = self.terminator_re.replace_all(&without_punct, ".");
        self.whitespace_re
            .replace_all(&terminated, " ")
            .trim()
            .to_string()
    }

    /// Extract the sentences of `clean_text` that mention the candidate.
    ///
    /// Sentences are the `.`-separated pieces of the cleaned text, trimmed;
    /// one is kept when it contains any of `name_tokens` as a substring
    /// (tokens are already lowercase). Kept sentences are joined with a
    /// single space.
    pub fn clean_sentences(&self, clean_text: &str, name_tokens: &BTreeSet<String>) -> String {
        clean_text
            .split('.')
            .map(str::trim)
            .filter(|sentence| {
                !sentence.is_empty()
                    && name_tokens.iter().any(|token| sentence.contains(token.as_str()))
            })
            .join(" ")
    }

    /// Produce the terminal [`CleanedArticle`] for an attributed article,
    /// using the full token set of the assigned candidate for sentence
    /// extraction.
    pub fn normalize(
        &self,
        article: AttributedArticle,
        name_tokens: &BTreeSet<String>,
    ) -> CleanedArticle {
        let clean_title = self.clean_title(&article.title);
        let clean_text = self.clean_text(&article.text);
        let clean_sentences = self.clean_sentences(&clean_text, name_tokens);
        CleanedArticle {
            candidate_id: article.candidate_id,
            name_token_matched: article.name_token_matched,
            announcement_date: article.announcement_date,
            newspaper_id: article.newspaper_id,
            url: article.url,
            published_date: article.published_date,
            title: article.title,
            text: article.text,
            clean_title,
            clean_text,
            clean_sentences,
        }
    }

    /// Normalize a batch, resolving each article's candidate token set from
    /// the registry. An article whose candidate is somehow absent falls back
    /// to its single matched token.
    #[instrument(level = "info", skip_all)]
    pub fn normalize_all(
        &self,
        articles: Vec<AttributedArticle>,
        registry: &CandidateRegistry,
    ) -> Vec<CleanedArticle> {
        let count = articles.len();
        let cleaned = articles
            .into_iter()
            .map(|article| {
                match registry.name_tokens(&article.candidate_id) {
                    Some(tokens) => {
                        let tokens = tokens.clone();
                        self.normalize(article, &tokens)
                    }
                    None => {
                        warn!(
                            candidate_id = %article.candidate_id,
                            "Candidate missing from registry; using matched token only"
                        );
                        let fallback: BTreeSet<String> =
                            BTreeSet::from([article.name_token_matched.clone()]);
                        self.normalize(article, &fallback)
                    }
                }
            })
            .collect();
        info!(count, "Normalized attributed articles");
        cleaned
    }
}
