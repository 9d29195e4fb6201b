use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://hangman.db?mode=rwc";

pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    Database::connect("sqlite::memory:").await
}

/// Open the database at `database_url` and bring its schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", database_url))?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run session migrations")?;
    tracing::info!("Session database ready at {}", database_url);
    Ok(db)
}
