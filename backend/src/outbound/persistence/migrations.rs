//! Embedded schema migrations.
//!
//! Diesel's migration harness needs a synchronous connection, so the run
//! happens on the blocking pool.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;
use zeroize::Zeroizing;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connect(String),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    #[error("migration task aborted: {0}")]
    Join(String),
}

/// Apply every pending migration and return how many ran.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_pending_migrations(
    database_url: Zeroizing<String>,
) -> Result<usize, MigrationError> {
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(database_url.as_str())
            .map_err(|err| MigrationError::Connect(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| MigrationError::Apply(err.to_string()))
    })
    .await
    .map_err(|err| MigrationError::Join(err.to_string()))??;

    info!(applied, "database migrations complete");
    Ok(applied)
}
