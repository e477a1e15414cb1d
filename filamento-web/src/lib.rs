//! filamento-web library - filament spool inventory web service
//!
//! Multi-step selection wizard, shelf/position sub-flow, maintenance screens and
//! inventory listing over the catalog in `filamento-common`.

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod ui;
pub mod wizard;

pub use crate::error::{ApiError, ApiResult, PageError, PageResult};

/// Application state shared across HTTP handlers
///
/// Built once at startup; handlers borrow connections from the pool per request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(ui::ui_routes())
        .merge(api::filament_type_routes())
        .merge(api::health_routes())
        .merge(api::version_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
