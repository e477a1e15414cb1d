//! Catalog operations: manufacturers and filament variants
//!
//! Manufacturers and filaments are only ever inserted; the application never
//! updates or deletes them. Duplicate inserts are reported through
//! [`InsertOutcome::Duplicate`] rather than as errors.

use sqlx::SqlitePool;
use tracing::info;

use super::models::{ColorChoice, Filament, FilamentDetails, InsertOutcome, Manufacturer, NewFilament};
use crate::{Error, HexColor, Result};

/// All manufacturers ordered by name
pub async fn list_manufacturers(pool: &SqlitePool) -> Result<Vec<Manufacturer>> {
    let manufacturers = sqlx::query_as::<_, Manufacturer>(
        "SELECT id, name FROM manufacturer ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(manufacturers)
}

pub async fn get_manufacturer(pool: &SqlitePool, manufacturer_id: i64) -> Result<Option<Manufacturer>> {
    let manufacturer = sqlx::query_as::<_, Manufacturer>(
        "SELECT id, name FROM manufacturer WHERE id = ?",
    )
    .bind(manufacturer_id)
    .fetch_optional(pool)
    .await?;

    Ok(manufacturer)
}

/// Insert a manufacturer; an existing name (exact, case-sensitive) is a duplicate
pub async fn add_manufacturer(pool: &SqlitePool, name: &str) -> Result<InsertOutcome> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("Manufacturer name must not be empty".to_string()));
    }

    let inserted = sqlx::query_scalar::<_, i64>(
        "INSERT INTO manufacturer (name) VALUES (?) RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(Error::from);

    match inserted {
        Ok(id) => {
            info!(manufacturer_id = id, "Added manufacturer '{}'", name);
            Ok(InsertOutcome::Created(id))
        }
        Err(e) if e.is_unique_violation() => {
            info!("Manufacturer '{}' already exists, not inserted", name);
            Ok(InsertOutcome::Duplicate)
        }
        Err(e) => Err(e),
    }
}

/// Distinct material types offered by a manufacturer, lexically ordered
///
/// A manufacturer without filaments (or an unknown id) yields an empty list.
pub async fn list_filament_types(pool: &SqlitePool, manufacturer_id: i64) -> Result<Vec<String>> {
    let types = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT type FROM filament WHERE manufacturer_id = ? ORDER BY type",
    )
    .bind(manufacturer_id)
    .fetch_all(pool)
    .await?;

    Ok(types)
}

/// Colors available for a manufacturer and type, ordered by color name
pub async fn list_colors(
    pool: &SqlitePool,
    manufacturer_id: i64,
    filament_type: &str,
) -> Result<Vec<ColorChoice>> {
    let colors = sqlx::query_as::<_, ColorChoice>(
        r#"
        SELECT id AS filament_id, color_name, color_hex_code
        FROM filament
        WHERE manufacturer_id = ? AND type = ?
        ORDER BY color_name
        "#,
    )
    .bind(manufacturer_id)
    .bind(filament_type)
    .fetch_all(pool)
    .await?;

    Ok(colors)
}

/// Filament with its manufacturer name
pub async fn get_filament(pool: &SqlitePool, filament_id: i64) -> Result<Option<FilamentDetails>> {
    let filament = sqlx::query_as::<_, FilamentDetails>(
        r#"
        SELECT f.id, f.manufacturer_id, m.name AS manufacturer_name,
               f.type, f.color_name, f.color_hex_code
        FROM filament f
        JOIN manufacturer m ON f.manufacturer_id = m.id
        WHERE f.id = ?
        "#,
    )
    .bind(filament_id)
    .fetch_optional(pool)
    .await?;

    Ok(filament)
}

/// Look up a filament by its identity triple
pub async fn find_filament(
    pool: &SqlitePool,
    manufacturer_id: i64,
    filament_type: &str,
    color_name: &str,
) -> Result<Option<Filament>> {
    let filament = sqlx::query_as::<_, Filament>(
        r#"
        SELECT id, manufacturer_id, type, color_name, color_hex_code
        FROM filament
        WHERE manufacturer_id = ? AND type = ? AND color_name = ?
        "#,
    )
    .bind(manufacturer_id)
    .bind(filament_type)
    .bind(color_name)
    .fetch_optional(pool)
    .await?;

    Ok(filament)
}

/// Every filament, ordered by manufacturer name, type, color name
pub async fn list_filaments(pool: &SqlitePool) -> Result<Vec<FilamentDetails>> {
    let filaments = sqlx::query_as::<_, FilamentDetails>(
        r#"
        SELECT f.id, f.manufacturer_id, m.name AS manufacturer_name,
               f.type, f.color_name, f.color_hex_code
        FROM filament f
        JOIN manufacturer m ON f.manufacturer_id = m.id
        ORDER BY m.name, f.type, f.color_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(filaments)
}

/// Insert a filament variant unless (manufacturer_id, type, color_name) already exists
///
/// Backs both the add-filament and add-color maintenance screens. The hex code is
/// normalized to `#RRGGBB` and ignored for the duplicate check.
pub async fn add_filament(pool: &SqlitePool, new: &NewFilament) -> Result<InsertOutcome> {
    let filament_type = new.filament_type.trim();
    let color_name = new.color_name.trim();
    if filament_type.is_empty() {
        return Err(Error::InvalidInput("Filament type must not be empty".to_string()));
    }
    if color_name.is_empty() {
        return Err(Error::InvalidInput("Color name must not be empty".to_string()));
    }
    let hex = HexColor::parse(&new.color_hex_code)?;

    let mut tx = pool.begin().await?;

    let manufacturer_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM manufacturer WHERE id = ?")
        .bind(new.manufacturer_id)
        .fetch_optional(&mut *tx)
        .await?;
    if manufacturer_exists.is_none() {
        return Err(Error::NotFound(format!("Manufacturer {}", new.manufacturer_id)));
    }

    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM filament WHERE manufacturer_id = ? AND type = ? AND color_name = ?",
    )
    .bind(new.manufacturer_id)
    .bind(filament_type)
    .bind(color_name)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(existing_id) = existing {
        info!(
            filament_id = existing_id,
            "Filament {} / {} already exists for manufacturer {}, not inserted",
            filament_type,
            color_name,
            new.manufacturer_id
        );
        return Ok(InsertOutcome::Duplicate);
    }

    // ON CONFLICT covers a concurrent insert between the check and here
    let inserted: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO filament (manufacturer_id, type, color_name, color_hex_code)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (manufacturer_id, type, color_name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(new.manufacturer_id)
    .bind(filament_type)
    .bind(color_name)
    .bind(hex.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    match inserted {
        Some(id) => {
            info!(
                filament_id = id,
                "Added filament {} / {} ({}) for manufacturer {}",
                filament_type,
                color_name,
                hex,
                new.manufacturer_id
            );
            Ok(InsertOutcome::Created(id))
        }
        None => Ok(InsertOutcome::Duplicate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    fn pla(manufacturer_id: i64, color_name: &str, hex: &str) -> NewFilament {
        NewFilament {
            manufacturer_id,
            filament_type: "PLA".to_string(),
            color_name: color_name.to_string(),
            color_hex_code: hex.to_string(),
        }
    }

    #[tokio::test]
    async fn test_manufacturers_listed_by_name() {
        let pool = memory_pool().await;

        add_manufacturer(&pool, "Prusament").await.unwrap();
        add_manufacturer(&pool, "Bambu").await.unwrap();
        add_manufacturer(&pool, "Elegoo").await.unwrap();

        let names: Vec<String> = list_manufacturers(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();

        assert_eq!(names, vec!["Bambu", "Elegoo", "Prusament"]);
    }

    #[tokio::test]
    async fn test_duplicate_manufacturer_reported() {
        let pool = memory_pool().await;

        let first = add_manufacturer(&pool, "Acme").await.unwrap();
        let second = add_manufacturer(&pool, "Acme").await.unwrap();

        assert!(first.is_created());
        assert_eq!(second, InsertOutcome::Duplicate);
        assert_eq!(list_manufacturers(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_manufacturer_names_are_case_sensitive() {
        let pool = memory_pool().await;

        assert!(add_manufacturer(&pool, "Acme").await.unwrap().is_created());
        assert!(add_manufacturer(&pool, "ACME").await.unwrap().is_created());
    }

    #[tokio::test]
    async fn test_empty_manufacturer_name_rejected() {
        let pool = memory_pool().await;

        let err = add_manufacturer(&pool, "   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_filament_triple_stays_unique() {
        let pool = memory_pool().await;
        let acme = add_manufacturer(&pool, "Acme").await.unwrap().id().unwrap();

        let first = add_filament(&pool, &pla(acme, "Red", "#FF0000")).await.unwrap();
        // Different hex, same identity triple
        let second = add_filament(&pool, &pla(acme, "Red", "#EE0000")).await.unwrap();
        let other = add_filament(&pool, &pla(acme, "Blue", "0000ff")).await.unwrap();

        assert!(first.is_created());
        assert_eq!(second, InsertOutcome::Duplicate);
        assert!(other.is_created());

        let all = list_filaments(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        let red = all.iter().find(|f| f.color_name == "Red").unwrap();
        assert_eq!(red.color_hex_code, "#FF0000");
        let blue = all.iter().find(|f| f.color_name == "Blue").unwrap();
        assert_eq!(blue.color_hex_code, "#0000FF");
    }

    #[tokio::test]
    async fn test_filament_for_unknown_manufacturer_rejected() {
        let pool = memory_pool().await;

        let err = add_filament(&pool, &pla(42, "Red", "#FF0000")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_filament_with_bad_hex_rejected() {
        let pool = memory_pool().await;
        let acme = add_manufacturer(&pool, "Acme").await.unwrap().id().unwrap();

        let err = add_filament(&pool, &pla(acme, "Red", "crimson")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(list_filaments(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_types_distinct_and_ordered() {
        let pool = memory_pool().await;
        let acme = add_manufacturer(&pool, "Acme").await.unwrap().id().unwrap();

        for (kind, color) in [("PLA", "Red"), ("ABS", "Black"), ("PLA", "Blue"), ("PETG", "Clear")] {
            add_filament(
                &pool,
                &NewFilament {
                    manufacturer_id: acme,
                    filament_type: kind.to_string(),
                    color_name: color.to_string(),
                    color_hex_code: "#123456".to_string(),
                },
            )
            .await
            .unwrap();
        }

        let types = list_filament_types(&pool, acme).await.unwrap();
        assert_eq!(types, vec!["ABS", "PETG", "PLA"]);
    }

    #[tokio::test]
    async fn test_types_empty_for_manufacturer_without_filaments() {
        let pool = memory_pool().await;
        let acme = add_manufacturer(&pool, "Acme").await.unwrap().id().unwrap();

        assert!(list_filament_types(&pool, acme).await.unwrap().is_empty());
        assert!(list_filament_types(&pool, 9999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_colors_ordered_by_name() {
        let pool = memory_pool().await;
        let acme = add_manufacturer(&pool, "Acme").await.unwrap().id().unwrap();

        add_filament(&pool, &pla(acme, "White", "#FFFFFF")).await.unwrap();
        add_filament(&pool, &pla(acme, "Black", "#000000")).await.unwrap();
        add_filament(&pool, &pla(acme, "Orange", "#FFA500")).await.unwrap();

        let colors = list_colors(&pool, acme, "PLA").await.unwrap();
        let names: Vec<&str> = colors.iter().map(|c| c.color_name.as_str()).collect();
        assert_eq!(names, vec!["Black", "Orange", "White"]);

        assert!(list_colors(&pool, acme, "TPU").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_and_find_filament() {
        let pool = memory_pool().await;
        let acme = add_manufacturer(&pool, "Acme").await.unwrap().id().unwrap();
        let id = add_filament(&pool, &pla(acme, "Red", "#FF0000")).await.unwrap().id().unwrap();

        let details = get_filament(&pool, id).await.unwrap().unwrap();
        assert_eq!(details.manufacturer_name, "Acme");
        assert_eq!(details.filament_type, "PLA");

        let found = find_filament(&pool, acme, "PLA", "Red").await.unwrap().unwrap();
        assert_eq!(found.id, id);

        assert!(get_filament(&pool, id + 100).await.unwrap().is_none());
        assert!(find_filament(&pool, acme, "PLA", "Green").await.unwrap().is_none());
    }
}
