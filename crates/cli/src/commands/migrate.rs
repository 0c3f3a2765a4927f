//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! mb-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `MATCHBOOK_DATABASE_URL` - `PostgreSQL` connection string (or `DATABASE_URL`)
//!
//! # Migration Files
//!
//! `crates/admin/migrations/`, embedded at build time.

use matchbook_admin::db;

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database is unreachable,
/// or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
