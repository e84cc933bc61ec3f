//! Error types for the cleaning pipeline.
//!
//! Registry problems are fatal: attribution cannot run without a complete
//! candidate table, so [`PipelineError::Config`] aborts the run. Everything
//! at the per-article level (missing fields, unparseable dates) is handled
//! where it occurs by skipping the record, and never surfaces here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The candidate registry is incomplete or malformed. Always fatal.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}
