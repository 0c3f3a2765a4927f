//! Seed the database with games from a YAML file.
//!
//! Entries are validated like interactive submissions. Rejected entries are
//! reported and skipped.

use std::path::Path;

use tracing::{error, info};

use matchbook_admin::db::GameRepository;
use matchbook_admin::seed;
use matchbook_admin::services::GameService;

use super::{emit, today};

/// Load games from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the database fails.
/// Rejected entries are not errors.
pub async fn games(file_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let service = GameService::new(GameRepository::new(&pool));

    let result = seed::seed_from_file(&service, file_path, today()).await?;

    info!(inserted = result.inserted, "Seed finished");
    for (entry, reason) in &result.rejected {
        error!(entry, "Rejected: {reason}");
    }
    emit(format_args!(
        "Inserted {} game(s), rejected {}",
        result.inserted,
        result.rejected.len()
    ))?;
    Ok(())
}
