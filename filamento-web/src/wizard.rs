//! Selection wizard state
//!
//! The wizard keeps no server-side session. Each step receives the selection made
//! so far through its path, query string or form body, and hands it on to the
//! next step in the redirect URL. The structs below are the per-step contracts:
//!
//! | Step | Request | Required parameters |
//! |------|---------|---------------------|
//! | manufacturer | `GET /select_manufacturer` | none |
//! | type | `GET/POST /select_filament_type/{manufacturer_id}` | path `manufacturer_id`; POST body [`FilamentTypeForm`] |
//! | color | `GET /select_color` | query [`ColorQuery`] |
//! | color | `POST /select_color` | body [`ColorForm`] |
//! | location | `GET/POST /select_location/{filament_id}` | path `filament_id`; POST body [`LocationForm`] |
//! | shelf | `GET /select_shelf` | query [`ShelfQuery`] |
//! | shelf | `POST /select_shelf` | body [`ShelfForm`] |
//! | position | `GET /select_position/{m}/{type}/{color}/{hex}/{shelf}` | path [`PositionPath`] |
//! | add | `POST /add_inventory` | body [`AddInventoryForm`] |
//!
//! A selection that cannot be parsed (missing or non-numeric id) or no longer
//! resolves (deleted data, stale bookmark) sends the user back to [`START`].

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

/// Wizard entry point; also where a completed or broken selection lands
pub const START: &str = "/select_manufacturer";

/// Slot positions offered on every shelf
pub const POSITIONS: [&str; 4] = ["Left Front", "Left Back", "Right Front", "Right Back"];

/// RFC 3986 unreserved characters stay literal, everything else is escaped
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Submit body of the type step
#[derive(Debug, Deserialize)]
pub struct FilamentTypeForm {
    #[serde(default)]
    pub filament_type: String,
}

/// Query of the color step; both fields are needed to list colors
#[derive(Debug, Deserialize)]
pub struct ColorQuery {
    pub manufacturer_id: Option<i64>,
    pub filament_type: Option<String>,
}

/// Submit body of the color step
#[derive(Debug, Deserialize)]
pub struct ColorForm {
    pub manufacturer_id: i64,
    pub filament_type: String,
    pub filament_id: i64,
}

/// Submit body of the location step
#[derive(Debug, Deserialize)]
pub struct LocationForm {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Selection carried into the shelf step
#[derive(Debug, Clone, Deserialize)]
pub struct ShelfQuery {
    pub manufacturer_id: i64,
    pub filament_type: String,
    pub color_name: String,
    pub color_hex_code: String,
}

/// Submit body of the shelf step: the selection plus the chosen shelf
#[derive(Debug, Deserialize)]
pub struct ShelfForm {
    pub manufacturer_id: i64,
    pub filament_type: String,
    pub color_name: String,
    pub color_hex_code: String,
    #[serde(default)]
    pub shelf: String,
}

impl ShelfForm {
    pub fn selection(&self) -> ShelfQuery {
        ShelfQuery {
            manufacturer_id: self.manufacturer_id,
            filament_type: self.filament_type.clone(),
            color_name: self.color_name.clone(),
            color_hex_code: self.color_hex_code.clone(),
        }
    }
}

/// Path segments of the position step
pub type PositionPath = (i64, String, String, String, String);

/// Final submit of the shelf/position sub-flow
///
/// Either `location` is given directly, or it is composed from `shelf` and
/// `position`.
#[derive(Debug, Deserialize)]
pub struct AddInventoryForm {
    pub manufacturer_id: i64,
    pub filament_type: String,
    pub color_name: String,
    #[serde(default)]
    pub color_hex_code: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub shelf: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
}

impl AddInventoryForm {
    /// The storage location this submission targets
    pub fn resolved_location(&self) -> Result<String, String> {
        if let Some(location) = non_blank(self.location.as_deref()) {
            return Ok(location.to_string());
        }
        match (non_blank(self.shelf.as_deref()), non_blank(self.position.as_deref())) {
            (Some(shelf), Some(position)) => {
                let shelf = parse_shelf(shelf)?;
                Ok(compose_location(shelf, position))
            }
            _ => Err("Choose a shelf and a position, or enter a location".to_string()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Location label for a shelf slot, e.g. `Shelf 1 Left Front`
pub fn compose_location(shelf: u32, position: &str) -> String {
    format!("Shelf {} {}", shelf, position.trim())
}

/// Shelves are numbered from 1
pub fn parse_shelf(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(shelf) if shelf > 0 => Ok(shelf),
        _ => Err(format!("Shelf must be a positive number, got '{}'", raw.trim())),
    }
}

/// Quantity field: blank means one spool, otherwise a positive whole number
pub fn parse_quantity(raw: Option<&str>) -> Result<i64, String> {
    match non_blank(raw) {
        None => Ok(1),
        Some(value) => match value.parse::<i64>() {
            Ok(quantity) if quantity > 0 => Ok(quantity),
            _ => Err(format!("Quantity must be a positive whole number, got '{}'", value)),
        },
    }
}

/// Percent-encode one path segment or query value
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn filament_type_url(manufacturer_id: i64) -> String {
    format!("/select_filament_type/{}", manufacturer_id)
}

pub fn color_url(manufacturer_id: i64, filament_type: &str) -> String {
    format!(
        "/select_color?manufacturer_id={}&filament_type={}",
        manufacturer_id,
        encode(filament_type)
    )
}

pub fn location_url(filament_id: i64) -> String {
    format!("/select_location/{}", filament_id)
}

pub fn shelf_url(selection: &ShelfQuery) -> String {
    format!(
        "/select_shelf?manufacturer_id={}&filament_type={}&color_name={}&color_hex_code={}",
        selection.manufacturer_id,
        encode(&selection.filament_type),
        encode(&selection.color_name),
        encode(&selection.color_hex_code)
    )
}

pub fn position_url(selection: &ShelfQuery, shelf: u32) -> String {
    format!(
        "/select_position/{}/{}/{}/{}/{}",
        selection.manufacturer_id,
        encode(&selection.filament_type),
        encode(&selection.color_name),
        encode(&selection.color_hex_code),
        shelf
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> ShelfQuery {
        ShelfQuery {
            manufacturer_id: 7,
            filament_type: "PLA+".to_string(),
            color_name: "Galaxy Black".to_string(),
            color_hex_code: "#1A1A1A".to_string(),
        }
    }

    #[test]
    fn test_color_url_encodes_type() {
        assert_eq!(
            color_url(3, "PLA+ Silk/Matte"),
            "/select_color?manufacturer_id=3&filament_type=PLA%2B%20Silk%2FMatte"
        );
    }

    #[test]
    fn test_position_url_encodes_segments() {
        assert_eq!(
            position_url(&selection(), 2),
            "/select_position/7/PLA%2B/Galaxy%20Black/%231A1A1A/2"
        );
    }

    #[test]
    fn test_shelf_url_carries_full_selection() {
        assert_eq!(
            shelf_url(&selection()),
            "/select_shelf?manufacturer_id=7&filament_type=PLA%2B&color_name=Galaxy%20Black&color_hex_code=%231A1A1A"
        );
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(parse_quantity(None), Ok(1));
        assert_eq!(parse_quantity(Some("  ")), Ok(1));
        assert_eq!(parse_quantity(Some("4")), Ok(4));
        assert!(parse_quantity(Some("0")).is_err());
        assert!(parse_quantity(Some("-1")).is_err());
        assert!(parse_quantity(Some("two")).is_err());
    }

    #[test]
    fn test_shelf_parsing() {
        assert_eq!(parse_shelf(" 3 "), Ok(3));
        assert!(parse_shelf("0").is_err());
        assert!(parse_shelf("top").is_err());
    }

    #[test]
    fn test_location_composed_from_shelf_and_position() {
        let form = AddInventoryForm {
            manufacturer_id: 1,
            filament_type: "PLA".to_string(),
            color_name: "Red".to_string(),
            color_hex_code: Some("#FF0000".to_string()),
            location: None,
            shelf: Some("1".to_string()),
            position: Some("Left Front".to_string()),
            quantity: None,
        };

        assert_eq!(form.resolved_location(), Ok("Shelf 1 Left Front".to_string()));
    }

    #[test]
    fn test_explicit_location_wins() {
        let form = AddInventoryForm {
            manufacturer_id: 1,
            filament_type: "PLA".to_string(),
            color_name: "Red".to_string(),
            color_hex_code: None,
            location: Some(" Drawer A ".to_string()),
            shelf: Some("1".to_string()),
            position: Some("Left Front".to_string()),
            quantity: None,
        };

        assert_eq!(form.resolved_location(), Ok("Drawer A".to_string()));
    }

    #[test]
    fn test_missing_location_parts_rejected() {
        let form = AddInventoryForm {
            manufacturer_id: 1,
            filament_type: "PLA".to_string(),
            color_name: "Red".to_string(),
            color_hex_code: None,
            location: Some("".to_string()),
            shelf: Some("1".to_string()),
            position: None,
            quantity: None,
        };

        assert!(form.resolved_location().is_err());
    }
}
