//! Maintenance screens: manufacturers, filaments and colors
//!
//! Each screen lists the current rows and offers an empty entry form. Submitting
//! a duplicate reports it and leaves the data unchanged.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use filamento_common::db::{self, InsertOutcome, Manufacturer, NewFilament};
use filamento_common::Error as CommonError;
use serde::Deserialize;

use super::layout::{escape, page, swatch, Notice};
use crate::error::{PageError, PageResult};
use crate::AppState;

/// POST body of /manage_manufacturers
#[derive(Debug, Deserialize)]
pub struct ManufacturerForm {
    pub manufacturer_name: String,
}

/// POST body of /manage_filaments and /manage_colors
#[derive(Debug, Deserialize)]
pub struct FilamentForm {
    pub manufacturer_id: i64,
    pub filament_type: String,
    pub color_name: String,
    pub color_hex_code: String,
}

impl From<&FilamentForm> for NewFilament {
    fn from(form: &FilamentForm) -> Self {
        NewFilament {
            manufacturer_id: form.manufacturer_id,
            filament_type: form.filament_type.clone(),
            color_name: form.color_name.clone(),
            color_hex_code: form.color_hex_code.clone(),
        }
    }
}

/// Optional filter for /manage_colors
#[derive(Debug, Default, Deserialize)]
pub struct ColorFilter {
    pub manufacturer_id: Option<i64>,
    pub filament_type: Option<String>,
}

/// GET /data_maintenance
pub async fn data_maintenance_page() -> Html<String> {
    page(
        "Data maintenance",
        None,
        r#"<div class="menu">
            <a class="button" href="/manage_manufacturers">Manufacturers</a>
            <a class="button" href="/manage_filaments">Filaments</a>
            <a class="button" href="/manage_colors">Colors</a>
        </div>"#,
    )
}

// ============================================================================
// Manufacturers
// ============================================================================

/// GET /manage_manufacturers
pub async fn manage_manufacturers_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    render_manufacturers(&state, None).await
}

/// POST /manage_manufacturers
pub async fn manage_manufacturers_submit(
    State(state): State<AppState>,
    Form(form): Form<ManufacturerForm>,
) -> PageResult<Response> {
    let name = form.manufacturer_name.trim();

    let (status, notice) = match db::add_manufacturer(&state.db, name).await {
        Ok(InsertOutcome::Created(_)) => (
            StatusCode::OK,
            Notice::Success(format!("Added manufacturer {}.", name)),
        ),
        Ok(InsertOutcome::Duplicate) => (
            StatusCode::OK,
            Notice::Warning(format!("Manufacturer {} already exists.", name)),
        ),
        Err(CommonError::InvalidInput(message)) => {
            (StatusCode::BAD_REQUEST, Notice::Warning(message))
        }
        Err(e) => return Err(PageError::from(e)),
    };

    let html = render_manufacturers(&state, Some(&notice)).await?;
    Ok((status, html).into_response())
}

async fn render_manufacturers(state: &AppState, notice: Option<&Notice>) -> PageResult<Html<String>> {
    let manufacturers = db::list_manufacturers(&state.db).await?;

    let list = if manufacturers.is_empty() {
        "<p>No manufacturers yet.</p>".to_string()
    } else {
        let items: String = manufacturers
            .iter()
            .map(|m| format!("<li>{}</li>", escape(&m.name)))
            .collect();
        format!(r#"<ul class="choice-list">{}</ul>"#, items)
    };

    let body = format!(
        r#"<form method="post" action="/manage_manufacturers">
            <label>Manufacturer name
                <input type="text" name="manufacturer_name" required>
            </label>
            <button type="submit">Add manufacturer</button>
        </form>
        <h2>Manufacturers</h2>
        {}"#,
        list
    );

    Ok(page("Manage manufacturers", notice, &body))
}

// ============================================================================
// Filaments and colors
// ============================================================================

/// Map an add-filament result to a status and message
fn filament_outcome(
    result: filamento_common::Result<InsertOutcome>,
    form: &FilamentForm,
) -> PageResult<(StatusCode, Notice)> {
    let label = format!("{} {}", form.filament_type.trim(), form.color_name.trim());
    match result {
        Ok(InsertOutcome::Created(_)) => Ok((
            StatusCode::OK,
            Notice::Success(format!("Added {}.", label)),
        )),
        Ok(InsertOutcome::Duplicate) => Ok((
            StatusCode::OK,
            Notice::Warning(format!("{} already exists for this manufacturer.", label)),
        )),
        Err(CommonError::NotFound(_)) => Ok((
            StatusCode::BAD_REQUEST,
            Notice::Warning(format!("Unknown manufacturer {}.", form.manufacturer_id)),
        )),
        Err(CommonError::InvalidInput(message)) => {
            Ok((StatusCode::BAD_REQUEST, Notice::Warning(message)))
        }
        Err(e) => Err(PageError::from(e)),
    }
}

fn manufacturer_options(manufacturers: &[Manufacturer], selected: Option<i64>) -> String {
    manufacturers
        .iter()
        .map(|m| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                m.id,
                if Some(m.id) == selected { " selected" } else { "" },
                escape(&m.name)
            )
        })
        .collect()
}

fn filament_fields(manufacturers: &[Manufacturer], selected: Option<i64>, filament_type: &str) -> String {
    format!(
        r##"<label>Manufacturer
                <select id="manufacturer_id" name="manufacturer_id" required>{options}</select>
            </label>
            <label>Filament type
                <input type="text" name="filament_type" list="filament_types" value="{filament_type}" placeholder="PLA" required>
                <datalist id="filament_types"></datalist>
            </label>
            <label>Color name
                <input type="text" name="color_name" placeholder="Red" required>
            </label>
            <label>Color hex code
                <input type="text" name="color_hex_code" placeholder="#FF0000" pattern="#?([0-9A-Fa-f]{{3}}|[0-9A-Fa-f]{{6}})" required>
            </label>"##,
        options = manufacturer_options(manufacturers, selected),
        filament_type = escape(filament_type),
    )
}

/// GET /manage_filaments
pub async fn manage_filaments_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    render_filaments(&state, None).await
}

/// POST /manage_filaments
pub async fn manage_filaments_submit(
    State(state): State<AppState>,
    Form(form): Form<FilamentForm>,
) -> PageResult<Response> {
    let result = db::add_filament(&state.db, &NewFilament::from(&form)).await;
    let (status, notice) = filament_outcome(result, &form)?;

    let html = render_filaments(&state, Some(&notice)).await?;
    Ok((status, html).into_response())
}

async fn render_filaments(state: &AppState, notice: Option<&Notice>) -> PageResult<Html<String>> {
    let manufacturers = db::list_manufacturers(&state.db).await?;
    if manufacturers.is_empty() {
        let notice = notice
            .cloned()
            .unwrap_or_else(|| Notice::Warning("Add a manufacturer before adding filaments.".to_string()));
        return Ok(page(
            "Manage filaments",
            Some(&notice),
            r#"<p><a class="button" href="/manage_manufacturers">Manage manufacturers</a></p>"#,
        ));
    }

    let filaments = db::list_filaments(&state.db).await?;
    let table = if filaments.is_empty() {
        "<p>No filaments yet.</p>".to_string()
    } else {
        let rows: String = filaments
            .iter()
            .map(|f| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}{}</td><td>{}</td></tr>",
                    escape(&f.manufacturer_name),
                    escape(&f.filament_type),
                    swatch(&f.color_hex_code),
                    escape(&f.color_name),
                    escape(&f.color_hex_code)
                )
            })
            .collect();
        format!(
            "<table><thead><tr><th>Manufacturer</th><th>Type</th><th>Color</th><th>Hex</th></tr></thead><tbody>{}</tbody></table>",
            rows
        )
    };

    let body = format!(
        r#"<form method="post" action="/manage_filaments">
            {fields}
            <button type="submit">Add filament</button>
        </form>
        <script src="/static/manage-colors.js" defer></script>
        <h2>Filaments</h2>
        {table}"#,
        fields = filament_fields(&manufacturers, None, ""),
        table = table,
    );

    Ok(page("Manage filaments", notice, &body))
}

/// GET /manage_colors[?manufacturer_id=&filament_type=]
pub async fn manage_colors_page(
    State(state): State<AppState>,
    Query(filter): Query<ColorFilter>,
) -> PageResult<Html<String>> {
    render_colors(&state, &filter, None).await
}

/// POST /manage_colors
pub async fn manage_colors_submit(
    State(state): State<AppState>,
    Form(form): Form<FilamentForm>,
) -> PageResult<Response> {
    let result = db::add_filament(&state.db, &NewFilament::from(&form)).await;
    let (status, notice) = filament_outcome(result, &form)?;

    let filter = ColorFilter {
        manufacturer_id: Some(form.manufacturer_id),
        filament_type: Some(form.filament_type.trim().to_string()),
    };
    let html = render_colors(&state, &filter, Some(&notice)).await?;
    Ok((status, html).into_response())
}

async fn render_colors(
    state: &AppState,
    filter: &ColorFilter,
    notice: Option<&Notice>,
) -> PageResult<Html<String>> {
    let manufacturers = db::list_manufacturers(&state.db).await?;
    if manufacturers.is_empty() {
        let notice = notice
            .cloned()
            .unwrap_or_else(|| Notice::Warning("Add a manufacturer before adding colors.".to_string()));
        return Ok(page(
            "Manage colors",
            Some(&notice),
            r#"<p><a class="button" href="/manage_manufacturers">Manage manufacturers</a></p>"#,
        ));
    }

    let filament_type = filter
        .filament_type
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    let color_list = match filter.manufacturer_id {
        Some(manufacturer_id) if !filament_type.is_empty() => {
            let colors = db::list_colors(&state.db, manufacturer_id, filament_type).await?;
            if colors.is_empty() {
                format!("<p>No colors recorded for {}.</p>", escape(filament_type))
            } else {
                let items: String = colors
                    .iter()
                    .map(|c| {
                        format!(
                            "<li>{}{} ({})</li>",
                            swatch(&c.color_hex_code),
                            escape(&c.color_name),
                            escape(&c.color_hex_code)
                        )
                    })
                    .collect();
                format!(
                    r#"<h2>{} colors</h2><ul class="choice-list">{}</ul>"#,
                    escape(filament_type),
                    items
                )
            }
        }
        _ => String::new(),
    };

    let body = format!(
        r#"<form method="post" action="/manage_colors">
            {fields}
            <button type="submit">Add color</button>
        </form>
        <script src="/static/manage-colors.js" defer></script>
        {color_list}"#,
        fields = filament_fields(&manufacturers, filter.manufacturer_id, filament_type),
        color_list = color_list,
    );

    Ok(page("Manage colors", notice, &body))
}
