//! UI Routes - HTML pages for the filament inventory
//!
//! # Structure
//! - **Static Assets** (`static_assets`): CSS/JS file serving
//! - **Index** (`index`): entry page
//! - **Selection** (`selection`): manufacturer → type → color → location wizard
//! - **Shelf** (`shelf`): shelf/position sub-flow and its final add-inventory step
//! - **Maintenance** (`maintenance`): manufacturer, filament and color screens
//! - **Inventory** (`inventory`): denormalized inventory listing

use std::fmt::Display;

use axum::{response::Redirect, routing::{get, post}, Router};
use tracing::warn;

use crate::wizard::START;
use crate::AppState;

pub mod layout;
mod static_assets;
mod index;
mod selection;
mod shelf;
mod maintenance;
mod inventory;

use static_assets::{serve_filamento_css, serve_manage_colors_js};
use index::index_page;
use selection::{
    select_color_page, select_color_submit, select_filament_type_page,
    select_filament_type_submit, select_location_page, select_location_submit,
    select_manufacturer_page,
};
use shelf::{add_inventory_submit, select_position_page, select_shelf_page, select_shelf_submit};
use maintenance::{
    data_maintenance_page, manage_colors_page, manage_colors_submit, manage_filaments_page,
    manage_filaments_submit, manage_manufacturers_page, manage_manufacturers_submit,
};
use inventory::view_inventory_page;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_page))
        // Selection wizard
        .route("/select_manufacturer", get(select_manufacturer_page))
        .route("/select_filament/:manufacturer_id", get(select_filament_type_page))
        .route(
            "/select_filament_type/:manufacturer_id",
            get(select_filament_type_page).post(select_filament_type_submit),
        )
        .route("/select_color", get(select_color_page).post(select_color_submit))
        .route(
            "/select_location/:filament_id",
            get(select_location_page).post(select_location_submit),
        )
        // Shelf/position sub-flow
        .route("/select_shelf", get(select_shelf_page).post(select_shelf_submit))
        .route(
            "/select_position/:manufacturer_id/:filament_type/:color_name/:color_hex_code/:shelf",
            get(select_position_page),
        )
        .route("/add_inventory", post(add_inventory_submit))
        .route("/add_inventory_item", post(add_inventory_submit))
        // Listing and maintenance
        .route("/view_inventory", get(view_inventory_page))
        .route("/data_maintenance", get(data_maintenance_page))
        .route(
            "/manage_manufacturers",
            get(manage_manufacturers_page).post(manage_manufacturers_submit),
        )
        .route(
            "/manage_filaments",
            get(manage_filaments_page).post(manage_filaments_submit),
        )
        .route("/manage_colors", get(manage_colors_page).post(manage_colors_submit))
        // Static assets
        .route("/static/filamento.css", get(serve_filamento_css))
        .route("/static/manage-colors.js", get(serve_manage_colors_js))
}

/// Send a request whose selection cannot be read back to the wizard start
fn restart_wizard(step: &str, rejection: impl Display) -> Redirect {
    warn!("Unreadable selection at {} step ({}), restarting wizard", step, rejection);
    Redirect::to(START)
}
