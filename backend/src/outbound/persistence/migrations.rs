//! Embedded schema migrations and development reset.
//!
//! Migrations run on a synchronous `PgConnection` inside `spawn_blocking`
//! because `diesel_migrations` has no async harness.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_async::SimpleAsyncConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::PersistenceError;

use super::error_mapping::map_diesel_error;
use super::pool::DbPool;

/// Migrations compiled from the `backend/migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    #[error("migration task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Apply pending migrations, returning how many ran.
pub async fn run_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || -> Result<usize, MigrationError> {
        let mut conn = PgConnection::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply(err.to_string()))?;
        Ok(applied.len())
    })
    .await??;
    info!(applied, "database migrations applied");
    Ok(applied)
}

/// Remove every user and hash job row.
///
/// Backs the `clear_on_startup` development switch.
pub async fn truncate_all(pool: &DbPool) -> Result<(), PersistenceError> {
    let mut conn = pool.get().await?;
    conn.batch_execute("TRUNCATE TABLE hashjobs, users")
        .await
        .map_err(map_diesel_error)?;
    info!("cleared users and hash jobs");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn unreachable_database_fails_to_connect() {
        let result = run_migrations("postgres://unhash@127.0.0.1:1/unhash").await;
        assert!(matches!(result, Err(MigrationError::Connect(_))));
    }
}
