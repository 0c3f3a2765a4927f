//! Bulk-load games from a YAML file.
//!
//! Each entry goes through the game service, so it is validated exactly like
//! an interactive submission. A rejected entry is recorded and skipped; the
//! rest of the file still loads.
//!
//! ## YAML Format
//!
//! ```yaml
//! games:
//!   - sport: Soccer
//!     league: Premier League
//!     team1: Arsenal
//!     team2: Chelsea
//!     score: "2-1"
//!     date: "2024-03-01"
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use matchbook_core::GameDraft;

use crate::db::GameStore;
use crate::services::games::{GameError, GameService};

/// Errors that abort a seed run.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A store failure, as opposed to a rejected entry.
    #[error("database error: {0}")]
    Repository(#[from] crate::db::RepositoryError),
}

/// Full seed file structure.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub games: Vec<GameDraft>,
}

/// Outcome of a seed run.
#[derive(Debug, Default)]
pub struct SeedResult {
    /// Number of games stored.
    pub inserted: usize,
    /// Rejected entries: 1-based position in the file and the reason.
    pub rejected: Vec<(usize, String)>,
}

/// Parse seed file contents.
///
/// # Errors
///
/// Returns `SeedError::Parse` if the YAML does not match [`SeedFile`].
pub fn parse_seed(content: &str) -> Result<SeedFile, SeedError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Read, parse and load a seed file.
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read or parsed, or the store fails.
#[instrument(skip(service, path), fields(path = %path.as_ref().display()))]
pub async fn seed_from_file<S: GameStore, P: AsRef<Path>>(
    service: &GameService<S>,
    path: P,
    today: NaiveDate,
) -> Result<SeedResult, SeedError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let file = parse_seed(&content)?;
    info!(entries = file.games.len(), "Parsed seed file");

    seed_games(service, &file.games, today).await
}

/// Load drafts through the game service.
///
/// # Errors
///
/// Returns `SeedError::Repository` if the store fails. Rejected entries do not
/// abort the run.
pub async fn seed_games<S: GameStore>(
    service: &GameService<S>,
    drafts: &[GameDraft],
    today: NaiveDate,
) -> Result<SeedResult, SeedError> {
    let mut result = SeedResult::default();

    for (n, draft) in (1..).zip(drafts) {
        match service.create(draft, today).await {
            Ok(_) => result.inserted += 1,
            Err(GameError::Repository(e)) => return Err(SeedError::Repository(e)),
            Err(e) => {
                warn!(entry = n, error = %e, "Seed entry rejected");
                result.rejected.push((n, e.to_string()));
            }
        }
    }

    info!(
        inserted = result.inserted,
        rejected = result.rejected.len(),
        "Seeding complete"
    );
    Ok(result)
}
