//! Embedded schema migrations for the users, persons and contacts tables.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use contactbook_core::error::{AppError, ErrorKind};

/// Compiled in from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the schema up to date. Already-applied versions are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying contactbook schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Schema migration failed: {e}"), e)
    })?;

    info!("Schema is up to date");
    Ok(())
}
