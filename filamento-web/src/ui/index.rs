//! Entry page

use axum::response::Html;

use super::layout::page;

/// GET /
pub async fn index_page() -> Html<String> {
    page(
        "Filament inventory",
        None,
        r#"<p>Track which spools sit on which shelf.</p>
        <h2>What would you like to do?</h2>
        <div class="menu">
            <a class="button" href="/select_manufacturer">Add spools to a shelf</a>
            <a class="button" href="/view_inventory">View inventory</a>
            <a class="button" href="/data_maintenance">Data maintenance</a>
        </div>"#,
    )
}
