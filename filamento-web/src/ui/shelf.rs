//! Shelf/position sub-flow
//!
//! An alternative to typing a free-text location: pick a shelf number, then a
//! position on that shelf. The selection travels in the URL until the final
//! `POST /add_inventory`, which is the only step touching the database.

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use filamento_common::db;
use filamento_common::Error as CommonError;
use tracing::{debug, warn};

use super::layout::{escape, hidden, page, swatch, Notice};
use super::restart_wizard;
use crate::error::{PageError, PageResult};
use crate::wizard::{
    self, parse_quantity, parse_shelf, AddInventoryForm, PositionPath, ShelfForm, ShelfQuery,
    POSITIONS, START,
};
use crate::AppState;

fn selection_summary(selection: &ShelfQuery) -> String {
    format!(
        r#"<p class="selection-summary">{} {} &middot; {}</p>"#,
        swatch(&selection.color_hex_code),
        escape(&selection.filament_type),
        escape(&selection.color_name)
    )
}

fn selection_fields(selection: &ShelfQuery) -> String {
    [
        hidden("manufacturer_id", &selection.manufacturer_id.to_string()),
        hidden("filament_type", &selection.filament_type),
        hidden("color_name", &selection.color_name),
        hidden("color_hex_code", &selection.color_hex_code),
    ]
    .concat()
}

fn render_shelf_page(selection: &ShelfQuery, notice: Option<&Notice>, shelf: &str) -> Html<String> {
    let body = format!(
        r#"{summary}
        <form method="post" action="/select_shelf">
            {fields}
            <label>Shelf number
                <input type="number" name="shelf" min="1" step="1" value="{shelf}" required>
            </label>
            <button type="submit">Next</button>
        </form>"#,
        summary = selection_summary(selection),
        fields = selection_fields(selection),
        shelf = escape(shelf),
    );
    page("Select Shelf", notice, &body)
}

/// GET /select_shelf?manufacturer_id=&filament_type=&color_name=&color_hex_code=
pub async fn select_shelf_page(query: Result<Query<ShelfQuery>, QueryRejection>) -> Response {
    match query {
        Ok(Query(selection)) => render_shelf_page(&selection, None, "").into_response(),
        Err(rejection) => restart_wizard("shelf", rejection).into_response(),
    }
}

/// POST /select_shelf
pub async fn select_shelf_submit(form: Result<Form<ShelfForm>, FormRejection>) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return restart_wizard("shelf", rejection).into_response(),
    };
    let selection = form.selection();
    match parse_shelf(&form.shelf) {
        Ok(shelf) => {
            debug!(shelf, "Shelf selected");
            Redirect::to(&wizard::position_url(&selection, shelf)).into_response()
        }
        Err(message) => {
            let notice = Notice::Warning(message);
            (
                StatusCode::BAD_REQUEST,
                render_shelf_page(&selection, Some(&notice), &form.shelf),
            )
                .into_response()
        }
    }
}

/// GET /select_position/:manufacturer_id/:filament_type/:color_name/:color_hex_code/:shelf
pub async fn select_position_page(path: Result<Path<PositionPath>, PathRejection>) -> Response {
    let Path((manufacturer_id, filament_type, color_name, color_hex_code, shelf)) = match path {
        Ok(path) => path,
        Err(rejection) => return restart_wizard("position", rejection).into_response(),
    };
    let selection = ShelfQuery {
        manufacturer_id,
        filament_type,
        color_name,
        color_hex_code,
    };

    let shelf = match parse_shelf(&shelf) {
        Ok(shelf) => shelf,
        Err(_) => return Redirect::to(&wizard::shelf_url(&selection)).into_response(),
    };

    render_position_page(&selection, shelf, None).into_response()
}

fn render_position_page(selection: &ShelfQuery, shelf: u32, notice: Option<&Notice>) -> Html<String> {
    let options: String = POSITIONS
        .iter()
        .map(|p| format!(r#"<option value="{0}">{0}</option>"#, escape(p)))
        .collect();

    let body = format!(
        r#"{summary}
        <p>Shelf <strong>{shelf}</strong> (<a href="{change_shelf}">change</a>)</p>
        <form method="post" action="/add_inventory">
            {fields}
            {shelf_field}
            <label>Position
                <select name="position" required>{options}</select>
            </label>
            <label>Quantity
                <input type="number" name="quantity" min="1" step="1" value="1">
            </label>
            <button type="submit">Add to inventory</button>
        </form>"#,
        summary = selection_summary(selection),
        shelf = shelf,
        change_shelf = escape(&wizard::shelf_url(selection)),
        fields = selection_fields(selection),
        shelf_field = hidden("shelf", &shelf.to_string()),
        options = options,
    );
    page("Select Position", notice, &body)
}

/// POST /add_inventory (also /add_inventory_item)
///
/// Resolves the filament from (manufacturer, type, color) and stores the spools
/// at the composed location. An unknown filament restarts the wizard.
pub async fn add_inventory_submit(
    State(state): State<AppState>,
    form: Result<Form<AddInventoryForm>, FormRejection>,
) -> PageResult<Response> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Ok(restart_wizard("add inventory", rejection).into_response()),
    };
    let location = match form.resolved_location() {
        Ok(location) => location,
        Err(message) => return Ok(invalid_submission(&form, message)),
    };
    let quantity = match parse_quantity(form.quantity.as_deref()) {
        Ok(quantity) => quantity,
        Err(message) => return Ok(invalid_submission(&form, message)),
    };

    let filament = db::find_filament(
        &state.db,
        form.manufacturer_id,
        form.filament_type.trim(),
        form.color_name.trim(),
    )
    .await?;

    let Some(filament) = filament else {
        warn!(
            "No filament {} / {} for manufacturer {}, restarting wizard",
            form.filament_type, form.color_name, form.manufacturer_id
        );
        return Ok(Redirect::to(START).into_response());
    };

    match db::add_inventory(&state.db, filament.id, &location, quantity).await {
        Ok(_) => Ok(Redirect::to(START).into_response()),
        Err(CommonError::NotFound(_)) => Ok(Redirect::to(START).into_response()),
        Err(CommonError::InvalidInput(message)) => Ok(invalid_submission(&form, message)),
        Err(e) => Err(PageError::from(e)),
    }
}

/// Re-render the step the submission came from, with a warning (400)
fn invalid_submission(form: &AddInventoryForm, message: String) -> Response {
    let selection = ShelfQuery {
        manufacturer_id: form.manufacturer_id,
        filament_type: form.filament_type.clone(),
        color_name: form.color_name.clone(),
        color_hex_code: form.color_hex_code.clone().unwrap_or_default(),
    };
    let notice = Notice::Warning(message);

    let html = match form.shelf.as_deref().map(parse_shelf) {
        Some(Ok(shelf)) => render_position_page(&selection, shelf, Some(&notice)),
        _ => render_shelf_page(&selection, Some(&notice), ""),
    };

    (StatusCode::BAD_REQUEST, html).into_response()
}
