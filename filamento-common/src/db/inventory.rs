//! Inventory writer and inventory queries
//!
//! There is at most one inventory row per (filament_id, location). Adding spools
//! to a slot that already holds the same filament accumulates the quantity.

use sqlx::SqlitePool;
use tracing::info;

use super::models::{InventoryEntry, InventoryRow, LocationOccupancy};
use crate::{Error, Result};

/// Add `quantity` spools of a filament at a location
///
/// Inserts a new row on the first assignment, otherwise increments the existing
/// row. The increment is a single `ON CONFLICT ... DO UPDATE` statement, so
/// concurrent submissions for the same slot cannot lose updates.
///
/// Returns the row as stored after the write. An unknown filament is
/// [`Error::NotFound`] and nothing is written.
pub async fn add_inventory(
    pool: &SqlitePool,
    filament_id: i64,
    location: &str,
    quantity: i64,
) -> Result<InventoryEntry> {
    let location = location.trim();
    if location.is_empty() {
        return Err(Error::InvalidInput("Location must not be empty".to_string()));
    }
    if quantity <= 0 {
        return Err(Error::InvalidInput(format!(
            "Quantity must be a positive whole number, got {}",
            quantity
        )));
    }

    let mut tx = pool.begin().await?;

    let filament_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM filament WHERE id = ?")
        .bind(filament_id)
        .fetch_optional(&mut *tx)
        .await?;
    if filament_exists.is_none() {
        return Err(Error::NotFound(format!("Filament {}", filament_id)));
    }

    // The WHERE guard skips the update (and returns no row) when the sum would
    // leave the INTEGER range; SQLite would otherwise store it as REAL.
    let entry = sqlx::query_as::<_, InventoryEntry>(
        r#"
        INSERT INTO inventory (filament_id, location, quantity)
        VALUES (?, ?, ?)
        ON CONFLICT (filament_id, location)
        DO UPDATE SET quantity = inventory.quantity + excluded.quantity
        WHERE inventory.quantity <= ? - excluded.quantity
        RETURNING id, filament_id, location, quantity
        "#,
    )
    .bind(filament_id)
    .bind(location)
    .bind(quantity)
    .bind(i64::MAX)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(entry) = entry else {
        return Err(Error::InvalidInput(format!(
            "Adding {} spool(s) at '{}' would exceed the largest storable quantity",
            quantity, location
        )));
    };

    tx.commit().await?;

    info!(
        filament_id,
        inventory_id = entry.id,
        "Stored {} spool(s) at '{}', now {}",
        quantity,
        entry.location,
        entry.quantity
    );

    Ok(entry)
}

/// The inventory row for one (filament, location) pair, if any
pub async fn get_inventory_entry(
    pool: &SqlitePool,
    filament_id: i64,
    location: &str,
) -> Result<Option<InventoryEntry>> {
    let entry = sqlx::query_as::<_, InventoryEntry>(
        "SELECT id, filament_id, location, quantity FROM inventory WHERE filament_id = ? AND location = ?",
    )
    .bind(filament_id)
    .bind(location)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Spools stored per location across all filaments, ordered by location
pub async fn location_occupancy(pool: &SqlitePool) -> Result<Vec<LocationOccupancy>> {
    let occupancy = sqlx::query_as::<_, LocationOccupancy>(
        r#"
        SELECT location, SUM(quantity) AS quantity
        FROM inventory
        GROUP BY location
        ORDER BY location
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(occupancy)
}

/// Full denormalized inventory, ordered by manufacturer, type, color, location
pub async fn list_inventory(pool: &SqlitePool) -> Result<Vec<InventoryRow>> {
    let rows = sqlx::query_as::<_, InventoryRow>(
        r#"
        SELECT m.name AS manufacturer_name, f.type, f.color_name, f.color_hex_code,
               i.location, i.quantity
        FROM inventory i
        JOIN filament f ON i.filament_id = f.id
        JOIN manufacturer m ON f.manufacturer_id = m.id
        ORDER BY m.name, f.type, f.color_name, i.location
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
