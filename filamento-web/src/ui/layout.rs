//! Shared page shell and HTML helpers

use axum::response::Html;

use crate::api::version::BuildInfo;

/// Message shown above a page's main content
#[derive(Debug, Clone)]
pub enum Notice {
    Success(String),
    Warning(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Success(text) => ("notice notice-success", text),
            Notice::Warning(text) => ("notice notice-warning", text),
        };
        format!(r#"<div class="{}" role="status">{}</div>"#, class, escape(text))
    }
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Color chip for a `#RRGGBB` value
pub fn swatch(hex: &str) -> String {
    format!(
        r#"<span class="swatch" style="background-color: {}" title="{}"></span>"#,
        escape(hex),
        escape(hex)
    )
}

/// Hidden form field
pub fn hidden(name: &str, value: &str) -> String {
    format!(
        r#"<input type="hidden" name="{}" value="{}">"#,
        escape(name),
        escape(value)
    )
}

/// Full HTML document around `body`
pub fn page(title: &str, notice: Option<&Notice>, body: &str) -> Html<String> {
    let notice_html = notice.map(Notice::render).unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Filamento</title>
    <link rel="stylesheet" href="/static/filamento.css">
</head>
<body>
    <header>
        <div class="header-content">
            <a class="brand" href="/">Filamento</a>
            <nav>
                <a href="/select_manufacturer">Add spools</a>
                <a href="/view_inventory">Inventory</a>
                <a href="/data_maintenance">Data maintenance</a>
            </nav>
        </div>
    </header>
    <main>
        <h1>{title}</h1>
        {notice_html}
        {body}
    </main>
    <footer>Filamento v{version} [{git_hash}]</footer>
</body>
</html>
"#,
        title = escape(title),
        notice_html = notice_html,
        body = body,
        version = BuildInfo::CURRENT.version,
        git_hash = BuildInfo::CURRENT.git_hash,
    ))
}

/// Generic failure page
pub fn error_page(message: &str) -> Html<String> {
    let body = format!(
        r#"<p class="error-message">{}</p>
        <p><a class="button" href="/">Back to start</a></p>"#,
        escape(message)
    );
    page("Error", None, &body)
}
