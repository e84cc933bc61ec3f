//! Candidate registry: name tokens and announcement dates.
//!
//! The registry is assembled from two files:
//! - a CSV of name tokens, columns `candidate_id,name_tokens`, one row per
//!   token (aliases, nicknames, diacritic and non-diacritic spellings);
//! - a YAML map of `candidate_id` to announcement date.
//!
//! Both pieces are required for every candidate: a candidate with zero
//! tokens can never match, and one without an announcement date cannot be
//! checked against the eligibility window. Either gap is a fatal
//! [`PipelineError::Config`].
//!
//! Candidate iteration order is sorted by `candidate_id`, and token order is
//! lexicographic within a candidate. First-match attribution depends on this
//! order, so it is deliberately deterministic rather than inherited from
//! file order.

use crate::error::PipelineError;
use crate::models::Candidate;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Last date an article can carry and still enter the dataset. Coverage
/// tracking stops on 2023-02-27, the eve of the election.
pub fn election_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 2, 27).unwrap()
}

/// One row of the name-token CSV.
#[derive(Debug, Deserialize)]
struct TokenRow {
    candidate_id: String,
    name_tokens: String,
}

/// Read-only candidate table, loaded once per pipeline run.
#[derive(Debug, Clone)]
pub struct CandidateRegistry {
    candidates: BTreeMap<String, Candidate>,
}

impl CandidateRegistry {
    /// Load and validate the registry from its two source files.
    ///
    /// Tokens are lowercased and whitespace-trimmed; duplicate tokens within
    /// a candidate collapse into the set. Announcement dates keyed to an
    /// unknown `candidate_id` are ignored with a warning.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Config`] if the token file yields no candidates, if
    /// any token is empty after trimming, or if a candidate is missing an
    /// announcement date.
    #[instrument(level = "info", skip_all, fields(tokens = %tokens_csv.display(), announcements = %announcements_yaml.display()))]
    pub fn load(tokens_csv: &Path, announcements_yaml: &Path) -> Result<Self, PipelineError> {
        let mut tokens_by_candidate: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut reader = csv::Reader::from_path(tokens_csv)?;
        for row in reader.deserialize() {
            let row: TokenRow = row?;
            let candidate_id = row.candidate_id.trim().to_string();
            let token = row.name_tokens.trim().to_lowercase();
            if candidate_id.is_empty() {
                return Err(PipelineError::Config(
                    "name-token row with empty candidate_id".to_string(),
                ));
            }
            if token.is_empty() {
                return Err(PipelineError::Config(format!(
                    "candidate {candidate_id} has an empty name token"
                )));
            }
            tokens_by_candidate.entry(candidate_id).or_default().insert(token);
        }

        if tokens_by_candidate.is_empty() {
            return Err(PipelineError::Config(format!(
                "no candidates found in {}",
                tokens_csv.display()
            )));
        }

        let announcements: BTreeMap<String, NaiveDate> =
            serde_yaml::from_str(&fs::read_to_string(announcements_yaml)?)?;
        for candidate_id in announcements.keys() {
            if !tokens_by_candidate.contains_key(candidate_id) {
                warn!(%candidate_id, "Announcement date for unknown candidate; ignoring");
            }
        }

        let mut candidates = BTreeMap::new();
        for (candidate_id, name_tokens) in tokens_by_candidate {
            let announcement_date = announcements.get(&candidate_id).copied().ok_or_else(|| {
                PipelineError::Config(format!(
                    "candidate {candidate_id} has no announcement date"
                ))
            })?;
            candidates.insert(
                candidate_id.clone(),
                Candidate {
                    candidate_id,
                    name_tokens,
                    announcement_date,
                },
            );
        }

        info!(count = candidates.len(), "Loaded candidate registry");
        Ok(CandidateRegistry { candidates })
    }

    /// Build a registry directly from candidates. Used by tests and by any
    /// caller that already has the table in memory.
    pub fn from_candidates(
        candidates: impl IntoIterator<Item = Candidate>,
    ) -> Result<Self, PipelineError> {
        let mut map = BTreeMap::new();
        for candidate in candidates {
            if candidate.name_tokens.is_empty() {
                return Err(PipelineError::Config(format!(
                    "candidate {} has no name tokens",
                    candidate.candidate_id
                )));
            }
            map.insert(candidate.candidate_id.clone(), candidate);
        }
        if map.is_empty() {
            return Err(PipelineError::Config("registry has no candidates".to_string()));
        }
        Ok(CandidateRegistry { candidates: map })
    }

    /// Candidates in id order. This is the attribution search order.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    pub fn announcement_date(&self, candidate_id: &str) -> Option<NaiveDate> {
        self.candidates.get(candidate_id).map(|c| c.announcement_date)
    }

    pub fn name_tokens(&self, candidate_id: &str) -> Option<&BTreeSet<String>> {
        self.candidates.get(candidate_id).map(|c| &c.name_tokens)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_registry_files(dir: &TempDir, csv: &str, yaml: &str) -> (std::path::PathBuf, std::path::PathBuf) {
        let csv_path = dir.path().join("name_tokens.csv");
        let yaml_path = dir.path().join("announcements.yaml");
        let mut f = fs::File::create(&csv_path).unwrap();
        f.write_all(csv.as_bytes()).unwrap();
        let mut f = fs::File::create(&yaml_path).unwrap();
        f.write_all(yaml.as_bytes()).unwrap();
        (csv_path, yaml_path)
    }

    #[test]
    fn test_load_lowercases_and_collapses_tokens() {
        let dir = TempDir::new().unwrap();
        let (csv_path, yaml_path) = write_registry_files(
            &dir,
            "candidate_id,name_tokens\n\
             cand_jd,Jane Doe\n\
             cand_jd,  jane doe \n\
             cand_jd,J. Doe\n",
            "cand_jd: 2022-01-01\n",
        );
        let registry = CandidateRegistry::load(&csv_path, &yaml_path).unwrap();
        let tokens = registry.name_tokens("cand_jd").unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("jane doe"));
        assert!(tokens.contains("j. doe"));
    }

    #[test]
    fn test_load_missing_announcement_date_is_fatal() {
        let dir = TempDir::new().unwrap();
        let (csv_path, yaml_path) = write_registry_files(
            &dir,
            "candidate_id,name_tokens\ncand_jd,jane doe\ncand_js,john smith\n",
            "cand_jd: 2022-01-01\n",
        );
        let err = CandidateRegistry::load(&csv_path, &yaml_path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(err.to_string().contains("cand_js"));
    }

    #[test]
    fn test_load_empty_token_is_fatal() {
        let dir = TempDir::new().unwrap();
        let (csv_path, yaml_path) = write_registry_files(
            &dir,
            "candidate_id,name_tokens\ncand_jd,   \n",
            "cand_jd: 2022-01-01\n",
        );
        let err = CandidateRegistry::load(&csv_path, &yaml_path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_load_empty_csv_is_fatal() {
        let dir = TempDir::new().unwrap();
        let (csv_path, yaml_path) =
            write_registry_files(&dir, "candidate_id,name_tokens\n", "{}\n");
        let err = CandidateRegistry::load(&csv_path, &yaml_path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_unknown_announcement_is_ignored() {
        let dir = TempDir::new().unwrap();
        let (csv_path, yaml_path) = write_registry_files(
            &dir,
            "candidate_id,name_tokens\ncand_jd,jane doe\n",
            "cand_jd: 2022-01-01\ncand_zz: 2022-06-01\n",
        );
        let registry = CandidateRegistry::load(&csv_path, &yaml_path).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.announcement_date("cand_zz").is_none());
    }

    #[test]
    fn test_candidates_iterate_in_id_order() {
        let dir = TempDir::new().unwrap();
        let (csv_path, yaml_path) = write_registry_files(
            &dir,
            "candidate_id,name_tokens\n\
             cand_zz,zed zeta\n\
             cand_aa,ann alpha\n\
             cand_mm,mia middle\n",
            "cand_zz: 2022-01-01\ncand_aa: 2022-01-01\ncand_mm: 2022-01-01\n",
        );
        let registry = CandidateRegistry::load(&csv_path, &yaml_path).unwrap();
        let ids: Vec<&str> = registry.candidates().map(|c| c.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["cand_aa", "cand_mm", "cand_zz"]);
    }

    #[test]
    fn test_from_candidates_rejects_empty_token_set() {
        let candidate = Candidate {
            candidate_id: "cand_x".to_string(),
            name_tokens: BTreeSet::new(),
            announcement_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
        };
        let err = CandidateRegistry::from_candidates([candidate]).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_election_cutoff_is_fixed() {
        assert_eq!(
            election_cutoff(),
            NaiveDate::from_ymd_opt(2023, 2, 27).unwrap()
        );
    }
}
