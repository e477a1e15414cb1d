//! Database initialization
//!
//! Opens (creating if necessary) the SQLite database and applies the schema.
//! Schema creation is idempotent and runs on every startup.

use crate::config::DatabaseLocation;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the database described by the resolved configuration
pub async fn open_database(location: &DatabaseLocation) -> Result<SqlitePool> {
    match location {
        DatabaseLocation::File(path) => init_database(path).await,
        DatabaseLocation::Url(url) => init_database_url(url).await,
    }
}

/// Initialize database file and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Initialize database from an explicit sqlx SQLite URL
pub async fn init_database_url(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    info!("Opened database: {}", url);

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_manufacturer_table(pool).await?;
    create_filament_table(pool).await?;
    create_inventory_table(pool).await?;
    Ok(())
}

async fn create_manufacturer_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS manufacturer (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Filament variants; (manufacturer_id, type, color_name) is the identity,
/// the hex code is descriptive only
async fn create_filament_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS filament (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            manufacturer_id INTEGER NOT NULL REFERENCES manufacturer(id),
            type TEXT NOT NULL,
            color_name TEXT NOT NULL,
            color_hex_code TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_filament_variant
        ON filament (manufacturer_id, type, color_name)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_inventory_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inventory (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filament_id INTEGER NOT NULL REFERENCES filament(id),
            location TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Required by the ON CONFLICT upsert in the inventory writer
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_inventory_slot
        ON inventory (filament_id, location)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
