//! Embedded schema migrations
//!
//! The SQL files live in `crates/story-db/migrations` and are applied with
//! sqlx's runtime migrator, which holds an advisory lock while running.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPool;
use std::path::Path;
use tracing::info;

/// Directory holding the `NNNN_name.sql` migration files
pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Apply every pending migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let migrator = Migrator::new(Path::new(MIGRATIONS_DIR)).await?;
    migrator.run(pool).await?;

    info!(count = migrator.iter().count(), "Database migrations applied");
    Ok(())
}
