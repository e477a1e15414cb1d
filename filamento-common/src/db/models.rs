//! Database models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A filament brand/vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
}

/// A (manufacturer, material type, color) product variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Filament {
    pub id: i64,
    pub manufacturer_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub filament_type: String,
    pub color_name: String,
    pub color_hex_code: String,
}

/// Filament joined with its manufacturer name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FilamentDetails {
    pub id: i64,
    pub manufacturer_id: i64,
    pub manufacturer_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub filament_type: String,
    pub color_name: String,
    pub color_hex_code: String,
}

/// One selectable color in the wizard's color step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ColorChoice {
    pub filament_id: i64,
    pub color_name: String,
    pub color_hex_code: String,
}

/// Count of spools of one filament at one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InventoryEntry {
    pub id: i64,
    pub filament_id: i64,
    pub location: String,
    pub quantity: i64,
}

/// Denormalized inventory row for the listing view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InventoryRow {
    pub manufacturer_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub filament_type: String,
    pub color_name: String,
    pub color_hex_code: String,
    pub location: String,
    pub quantity: i64,
}

/// Total spools stored at a location, across all filaments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LocationOccupancy {
    pub location: String,
    pub quantity: i64,
}

/// Input for the add-filament / add-color maintenance operations
#[derive(Debug, Clone)]
pub struct NewFilament {
    pub manufacturer_id: i64,
    pub filament_type: String,
    pub color_name: String,
    pub color_hex_code: String,
}

/// Result of an insert that refuses duplicates instead of failing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Row inserted with this id
    Created(i64),
    /// An equivalent row already existed; nothing was written
    Duplicate,
}

impl InsertOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, InsertOutcome::Created(_))
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            InsertOutcome::Created(id) => Some(*id),
            InsertOutcome::Duplicate => None,
        }
    }
}
