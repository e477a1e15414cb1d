//! # Filamento Common Library
//!
//! Shared code for the filament spool inventory tracker:
//! - Catalog and inventory data access (manufacturer, filament, inventory tables)
//! - Database initialization and schema creation
//! - Configuration resolution (CLI > ENV > TOML > compiled default)
//! - Color hex code normalization

pub mod color;
pub mod config;
pub mod db;
pub mod error;

pub use color::HexColor;
pub use error::{Error, Result};
