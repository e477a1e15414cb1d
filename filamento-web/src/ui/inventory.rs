//! Inventory listing page

use axum::{extract::State, response::Html};
use filamento_common::db;

use super::layout::{escape, page, swatch, Notice};
use crate::error::PageResult;
use crate::AppState;

/// GET /view_inventory
///
/// Every inventory row joined with its filament and manufacturer, ordered by
/// manufacturer, type and color. No paging; the data set is a home workshop.
pub async fn view_inventory_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    let rows = db::list_inventory(&state.db).await?;

    if rows.is_empty() {
        let notice = Notice::Warning("The inventory is empty.".to_string());
        return Ok(page(
            "Inventory",
            Some(&notice),
            r#"<p><a class="button" href="/select_manufacturer">Add spools</a></p>"#,
        ));
    }

    let total: i64 = rows.iter().map(|r| r.quantity).sum();
    let body_rows: String = rows
        .iter()
        .map(|r| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}{}</td><td>{}</td><td>{}</td><td class="number">{}</td></tr>"#,
                escape(&r.manufacturer_name),
                escape(&r.filament_type),
                swatch(&r.color_hex_code),
                escape(&r.color_name),
                escape(&r.color_hex_code),
                escape(&r.location),
                r.quantity
            )
        })
        .collect();

    let body = format!(
        r#"<p>{total} spool(s) in {entries} location entries.</p>
        <table>
            <thead>
                <tr><th>Manufacturer</th><th>Type</th><th>Color</th><th>Hex</th><th>Location</th><th>Quantity</th></tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>"#,
        total = total,
        entries = rows.len(),
        rows = body_rows,
    );

    Ok(page("Inventory", None, &body))
}
