//! HTML page assembly.
//!
//! Views render fragments; this module wraps them in the application shell.
//! The shell always carries the `#app` root so an unmatched location still
//! yields a well-formed, empty page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::views::{escape_html, Rendered};

const APP_TITLE: &str = "Device Portal";

/// Wrap a rendered view in the application shell.
pub fn page(rendered: &Rendered, view: &str) -> String {
    shell(
        &format!("{} · {}", rendered.title, APP_TITLE),
        &format!(
            r#"<div id="app" data-active-view="{}">{}</div>"#,
            escape_html(view),
            rendered.body
        ),
    )
}

/// The application shell with nothing mounted.
pub fn empty_page() -> String {
    shell(APP_TITLE, r#"<div id="app"></div>"#)
}

/// Build an HTML response.
pub fn html(status: StatusCode, document: String) -> Response {
    (status, Html(document)).into_response()
}

fn shell(title: &str, app: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title}</title></head><body>{app}</body></html>\n"
        ),
        title = escape_html(title),
        app = app
    )
}
