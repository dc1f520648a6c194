//! Helpers shared by the workspace's database-backed tests.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use platform_db::Store;
use sea_orm::{ConnectOptions, Database};

/// A fresh in-memory SQLite database with every migration applied.
///
/// The pool is pinned to one connection so every query sees the same
/// in-memory database.
pub async fn sqlite_store() -> Result<Store> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let pool = Database::connect(options)
        .await
        .context("failed to open in-memory sqlite")?;
    Migrator::up(&pool, None)
        .await
        .context("failed to migrate in-memory sqlite")?;
    Ok(Store::new(pool))
}
