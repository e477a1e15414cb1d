//! Selection wizard pages: manufacturer → filament type → color → location
//!
//! Every GET renders a form pre-filled with the selection so far; every POST
//! redirects (303) to the next step with the selection in the URL.

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use filamento_common::db::{self, FilamentDetails};
use filamento_common::Error as CommonError;
use tracing::{debug, warn};

use super::layout::{escape, hidden, page, swatch, Notice};
use super::restart_wizard;
use crate::error::{PageError, PageResult};
use crate::wizard::{
    self, parse_quantity, ColorForm, ColorQuery, FilamentTypeForm, LocationForm, ShelfQuery, START,
};
use crate::AppState;

/// GET /select_manufacturer
pub async fn select_manufacturer_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    let manufacturers = db::list_manufacturers(&state.db).await?;

    if manufacturers.is_empty() {
        let notice = Notice::Warning(
            "No manufacturers yet. Add one under Data maintenance first.".to_string(),
        );
        return Ok(page(
            "Choose manufacturer",
            Some(&notice),
            r#"<p><a class="button" href="/manage_manufacturers">Manage manufacturers</a></p>"#,
        ));
    }

    let items: String = manufacturers
        .iter()
        .map(|m| {
            format!(
                r#"<li><a href="{}">{}</a></li>"#,
                wizard::filament_type_url(m.id),
                escape(&m.name)
            )
        })
        .collect();

    Ok(page(
        "Choose manufacturer",
        None,
        &format!(r#"<ul class="choice-list">{}</ul>"#, items),
    ))
}

/// GET /select_filament_type/:manufacturer_id (also /select_filament/:manufacturer_id)
pub async fn select_filament_type_page(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> PageResult<Response> {
    let Path(manufacturer_id) = match path {
        Ok(path) => path,
        Err(rejection) => return Ok(restart_wizard("filament type", rejection).into_response()),
    };
    let Some(manufacturer) = db::get_manufacturer(&state.db, manufacturer_id).await? else {
        warn!("Manufacturer {} not found, restarting wizard", manufacturer_id);
        return Ok(Redirect::to(START).into_response());
    };

    let types = db::list_filament_types(&state.db, manufacturer_id).await?;

    let summary = format!(
        r#"<p class="selection-summary">Manufacturer: <strong>{}</strong></p>"#,
        escape(&manufacturer.name)
    );

    if types.is_empty() {
        let notice = Notice::Warning(format!(
            "No filament types recorded for {}.",
            manufacturer.name
        ));
        let body = format!(
            r#"{}<p><a class="button" href="/manage_filaments">Add a filament</a></p>"#,
            summary
        );
        return Ok(page("Choose filament type", Some(&notice), &body).into_response());
    }

    let options: String = types
        .iter()
        .map(|t| format!(r#"<option value="{0}">{0}</option>"#, escape(t)))
        .collect();

    let body = format!(
        r#"{summary}
        <form method="post" action="{action}">
            <label>Filament type
                <select name="filament_type" required>{options}</select>
            </label>
            <button type="submit">Next</button>
        </form>"#,
        summary = summary,
        action = wizard::filament_type_url(manufacturer_id),
        options = options,
    );

    Ok(page("Choose filament type", None, &body).into_response())
}

/// POST /select_filament_type/:manufacturer_id
pub async fn select_filament_type_submit(
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<FilamentTypeForm>, FormRejection>,
) -> Redirect {
    let Path(manufacturer_id) = match path {
        Ok(path) => path,
        Err(rejection) => return restart_wizard("filament type", rejection),
    };
    let Ok(Form(form)) = form else {
        return Redirect::to(&wizard::filament_type_url(manufacturer_id));
    };

    let filament_type = form.filament_type.trim();
    if filament_type.is_empty() {
        return Redirect::to(&wizard::filament_type_url(manufacturer_id));
    }

    debug!(manufacturer_id, filament_type, "Filament type selected");
    Redirect::to(&wizard::color_url(manufacturer_id, filament_type))
}

/// GET /select_color?manufacturer_id=&filament_type=
///
/// An empty color list is a normal outcome and renders a warning with 200.
pub async fn select_color_page(
    State(state): State<AppState>,
    query: Result<Query<ColorQuery>, QueryRejection>,
) -> PageResult<Response> {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return Ok(restart_wizard("color", rejection).into_response()),
    };
    let Some(manufacturer_id) = query.manufacturer_id else {
        return Ok(Redirect::to(START).into_response());
    };
    let Some(manufacturer) = db::get_manufacturer(&state.db, manufacturer_id).await? else {
        warn!("Manufacturer {} not found, restarting wizard", manufacturer_id);
        return Ok(Redirect::to(START).into_response());
    };
    let filament_type = match query.filament_type.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return Ok(Redirect::to(&wizard::filament_type_url(manufacturer_id)).into_response()),
    };

    let colors = db::list_colors(&state.db, manufacturer_id, &filament_type).await?;

    let summary = format!(
        r#"<p class="selection-summary">Manufacturer: <strong>{}</strong> &middot; Type: <strong>{}</strong></p>"#,
        escape(&manufacturer.name),
        escape(&filament_type)
    );

    if colors.is_empty() {
        let notice = Notice::Warning(format!(
            "No colors found for {} from {}.",
            filament_type, manufacturer.name
        ));
        let body = format!(
            r#"{}<p><a class="button" href="{}">Choose another type</a></p>"#,
            summary,
            wizard::filament_type_url(manufacturer_id)
        );
        return Ok(page("Choose color", Some(&notice), &body).into_response());
    }

    let rows: String = colors
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let shelf_link = wizard::shelf_url(&ShelfQuery {
                manufacturer_id,
                filament_type: filament_type.clone(),
                color_name: c.color_name.clone(),
                color_hex_code: c.color_hex_code.clone(),
            });
            format!(
                r#"<li>
                    <label><span><input type="radio" name="filament_id" value="{id}"{checked}> {swatch}{name}</span></label>
                    <a href="{shelf_link}">assign to shelf</a>
                </li>"#,
                id = c.filament_id,
                checked = if i == 0 { " checked" } else { "" },
                swatch = swatch(&c.color_hex_code),
                name = escape(&c.color_name),
                shelf_link = escape(&shelf_link),
            )
        })
        .collect();

    let body = format!(
        r#"{summary}
        <form method="post" action="/select_color">
            {manufacturer_field}
            {type_field}
            <ul class="choice-list">{rows}</ul>
            <button type="submit">Next</button>
        </form>"#,
        summary = summary,
        manufacturer_field = hidden("manufacturer_id", &manufacturer_id.to_string()),
        type_field = hidden("filament_type", &filament_type),
        rows = rows,
    );

    Ok(page("Choose color", None, &body).into_response())
}

/// POST /select_color
pub async fn select_color_submit(form: Result<Form<ColorForm>, FormRejection>) -> Redirect {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return restart_wizard("color", rejection),
    };
    debug!(
        manufacturer_id = form.manufacturer_id,
        filament_type = %form.filament_type,
        filament_id = form.filament_id,
        "Color selected"
    );
    Redirect::to(&wizard::location_url(form.filament_id))
}

/// GET /select_location/:filament_id
pub async fn select_location_page(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> PageResult<Response> {
    let Path(filament_id) = match path {
        Ok(path) => path,
        Err(rejection) => return Ok(restart_wizard("location", rejection).into_response()),
    };
    let Some(filament) = db::get_filament(&state.db, filament_id).await? else {
        warn!("Filament {} not found, restarting wizard", filament_id);
        return Ok(Redirect::to(START).into_response());
    };

    Ok(render_location_page(&state, &filament, None, "", "1")
        .await?
        .into_response())
}

/// POST /select_location/:filament_id
///
/// Adds the spools through the inventory writer, then returns to the wizard start.
pub async fn select_location_submit(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<LocationForm>, FormRejection>,
) -> PageResult<Response> {
    let Path(filament_id) = match path {
        Ok(path) => path,
        Err(rejection) => return Ok(restart_wizard("location", rejection).into_response()),
    };
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!("Unreadable location form: {}", rejection);
            return Ok(Redirect::to(&wizard::location_url(filament_id)).into_response());
        }
    };
    let quantity_raw = form.quantity.as_deref().unwrap_or("");

    let quantity = match parse_quantity(form.quantity.as_deref()) {
        Ok(quantity) => quantity,
        Err(message) => {
            return rerender_location(&state, filament_id, message, &form.location, quantity_raw).await
        }
    };

    match db::add_inventory(&state.db, filament_id, &form.location, quantity).await {
        Ok(_) => Ok(Redirect::to(START).into_response()),
        Err(CommonError::NotFound(what)) => {
            warn!("{} not found while storing spools, restarting wizard", what);
            Ok(Redirect::to(START).into_response())
        }
        Err(CommonError::InvalidInput(message)) => {
            rerender_location(&state, filament_id, message, &form.location, quantity_raw).await
        }
        Err(e) => Err(PageError::from(e)),
    }
}

/// Show the location form again with a warning and the user's input (400)
async fn rerender_location(
    state: &AppState,
    filament_id: i64,
    message: String,
    location: &str,
    quantity: &str,
) -> PageResult<Response> {
    let Some(filament) = db::get_filament(&state.db, filament_id).await? else {
        return Ok(Redirect::to(START).into_response());
    };
    let notice = Notice::Warning(message);
    let html = render_location_page(state, &filament, Some(&notice), location, quantity).await?;
    Ok((StatusCode::BAD_REQUEST, html).into_response())
}

async fn render_location_page(
    state: &AppState,
    filament: &FilamentDetails,
    notice: Option<&Notice>,
    location: &str,
    quantity: &str,
) -> PageResult<Html<String>> {
    let occupancy = db::location_occupancy(&state.db).await?;

    let suggestions: String = occupancy
        .iter()
        .map(|o| format!(r#"<option value="{}">"#, escape(&o.location)))
        .collect();

    let occupancy_table = if occupancy.is_empty() {
        "<p>No locations are occupied yet.</p>".to_string()
    } else {
        let rows: String = occupancy
            .iter()
            .map(|o| {
                format!(
                    r#"<tr><td>{}</td><td class="number">{}</td></tr>"#,
                    escape(&o.location),
                    o.quantity
                )
            })
            .collect();
        format!(
            r#"<table><thead><tr><th>Location</th><th>Spools</th></tr></thead><tbody>{}</tbody></table>"#,
            rows
        )
    };

    let body = format!(
        r#"<p class="selection-summary">{swatch}<strong>{manufacturer}</strong> &middot; {kind} &middot; {color}</p>
        <form method="post" action="{action}">
            <label>Location
                <input type="text" name="location" list="known_locations" value="{location}" placeholder="Shelf 1 Left Front" required>
                <datalist id="known_locations">{suggestions}</datalist>
            </label>
            <label>Quantity
                <input type="number" name="quantity" min="1" step="1" value="{quantity}">
            </label>
            <button type="submit">Add to inventory</button>
        </form>
        <h2>Current occupancy</h2>
        {occupancy_table}"#,
        swatch = swatch(&filament.color_hex_code),
        manufacturer = escape(&filament.manufacturer_name),
        kind = escape(&filament.filament_type),
        color = escape(&filament.color_name),
        action = wizard::location_url(filament.id),
        location = escape(location),
        suggestions = suggestions,
        quantity = escape(quantity),
        occupancy_table = occupancy_table,
    );

    Ok(page("Choose location", notice, &body))
}
