//! Command-line interface definitions for the cleaning pipeline.
//!
//! All options can be provided as flags or environment variables. The CLI
//! carries only paths and the attribution policy switch; everything else
//! (stopword lists, the election cutoff, source file names) is fixed
//! configuration.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the article cleaning pipeline.
///
/// # Examples
///
/// ```sh
/// # Standard run over the scraper outputs in ./data
/// mayoral_news_pipeline -s ./data -o ./data \
///     --tokens-csv ./data/cleaning_name_tokens.csv \
///     --announcements ./data/announcement_dates.yaml
///
/// # Attribute multi-candidate articles to every matching candidate
/// mayoral_news_pipeline -s ./data -o ./data \
///     --tokens-csv ./data/cleaning_name_tokens.csv \
///     --announcements ./data/announcement_dates.yaml --exhaustive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory containing the per-source scraper JSON files
    #[arg(short, long, env = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Directory the cleaned datasets are written to
    #[arg(short, long, env = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// CSV of candidate name tokens, columns candidate_id,name_tokens
    #[arg(long, env = "NAME_TOKENS_CSV")]
    pub tokens_csv: PathBuf,

    /// YAML map of candidate_id to announcement date
    #[arg(long, env = "ANNOUNCEMENTS_YAML")]
    pub announcements: PathBuf,

    /// Attribute an article to every matching candidate instead of stopping
    /// at the first match
    #[arg(long)]
    pub exhaustive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "mayoral_news_pipeline",
            "--source-dir",
            "./data",
            "--output-dir",
            "./out",
            "--tokens-csv",
            "./data/cleaning_name_tokens.csv",
            "--announcements",
            "./data/announcement_dates.yaml",
        ]);

        assert_eq!(cli.source_dir, PathBuf::from("./data"));
        assert_eq!(cli.output_dir, PathBuf::from("./out"));
        assert!(!cli.exhaustive);
    }

    #[test]
    fn test_cli_exhaustive_flag() {
        let cli = Cli::parse_from([
            "mayoral_news_pipeline",
            "-s",
            "/tmp/data",
            "-o",
            "/tmp/out",
            "--tokens-csv",
            "/tmp/tokens.csv",
            "--announcements",
            "/tmp/dates.yaml",
            "--exhaustive",
        ]);

        assert!(cli.exhaustive);
    }
}
