//! Match result persistence.
//!
//! Results live in a single JSON Lines file, one `MatchResult` per line.
//! Every recorded match is stored twice, once from each player's side.

mod jsonl;

pub use jsonl::*;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::{MatchError, MatchResult, NewMatch};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Rejected match: {0}")]
    InvalidMatch(#[from] MatchError),
}

/// The match results file.
#[derive(Debug, Clone)]
pub struct MatchStore {
    path: PathBuf,
}

impl MatchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored result. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<MatchResult>, StorageError> {
        JsonlReader::new(self.path.clone()).read_all()
    }

    /// Validate a submitted match and append both perspectives.
    pub fn record(&self, submission: NewMatch) -> Result<[MatchResult; 2], StorageError> {
        let results = submission.into_results()?;
        JsonlWriter::new(self.path.clone()).append_batch(&results)?;
        info!(
            "Recorded match {} ({} vs {})",
            results[0].match_id, results[0].player.name, results[0].opponent.name
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchType, PlayerScore, TournamentInfo, TournamentStage};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn submission(player: u32, opponent: u32) -> NewMatch {
        NewMatch {
            match_type: MatchType::Short,
            date: Utc.with_ymd_and_hms(2024, 5, 4, 18, 30, 0).unwrap(),
            tournament: Some(TournamentInfo {
                name: "Spring Cup".to_string(),
                stage: Some(TournamentStage::Group),
            }),
            player: PlayerScore {
                name: "Alice".to_string(),
                score: player,
            },
            opponent: PlayerScore {
                name: "Bob".to_string(),
                score: opponent,
            },
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = MatchStore::new(temp_dir.path().join("matches.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_record_stores_both_sides() {
        let temp_dir = TempDir::new().unwrap();
        let store = MatchStore::new(temp_dir.path().join("data").join("matches.jsonl"));

        store.record(submission(11, 7)).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].match_id, loaded[1].match_id);
        assert_eq!(loaded[0].player.name, "Alice");
        assert!(loaded[0].winner);
        assert_eq!(loaded[1].player.name, "Bob");
        assert_eq!((loaded[1].scored, loaded[1].missed), (7, 11));
        assert_eq!(loaded[1].tournament.as_deref(), Some("Spring Cup"));
    }

    #[test]
    fn test_record_rejects_invalid_score() {
        let temp_dir = TempDir::new().unwrap();
        let store = MatchStore::new(temp_dir.path().join("matches.jsonl"));

        let err = store.record(submission(11, 11)).unwrap_err();
        assert!(matches!(err, StorageError::InvalidMatch(MatchError::BothAtCap)));
        assert!(store.load().unwrap().is_empty());
    }
}
