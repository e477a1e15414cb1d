//! Filament types as JSON, for client-side form population

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use filamento_common::db;

use crate::error::ApiResult;
use crate::AppState;

/// GET /get_filament_types/:manufacturer_id
///
/// Distinct types in lexical order. Unknown manufacturers yield `[]`.
pub async fn get_filament_types(
    State(state): State<AppState>,
    Path(manufacturer_id): Path<i64>,
) -> ApiResult<Json<Vec<String>>> {
    let types = db::list_filament_types(&state.db, manufacturer_id).await?;
    Ok(Json(types))
}

pub fn filament_type_routes() -> Router<AppState> {
    Router::new().route("/get_filament_types/:manufacturer_id", get(get_filament_types))
}
