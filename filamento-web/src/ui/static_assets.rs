//! Static asset handlers
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{http::StatusCode, response::{IntoResponse, Response}};

const FILAMENTO_CSS: &str = include_str!("../../static/filamento.css");
const MANAGE_COLORS_JS: &str = include_str!("../../static/manage-colors.js");

/// GET /static/filamento.css
pub async fn serve_filamento_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        FILAMENTO_CSS,
    )
        .into_response()
}

/// GET /static/manage-colors.js
///
/// Fills the type suggestions on the color maintenance form from `/get_filament_types`
pub async fn serve_manage_colors_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        MANAGE_COLORS_JS,
    )
        .into_response()
}
