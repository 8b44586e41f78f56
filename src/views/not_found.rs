//! Fallback view for locations that match no route.
//!
//! Never bound in the application route table; the HTTP layer renders it only
//! when the not-found policy asks for a view.

use super::{escape_html, RenderContext, Rendered, View};

#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundView;

impl View for NotFoundView {
    fn name(&self) -> &'static str {
        "not-found"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Rendered {
        Rendered {
            title: "Page not found".to_string(),
            body: format!(
                r#"<section class="not-found" data-view="not-found"><h1>Nothing at <code>{}</code></h1><a href="/">Back to the scanner</a></section>"#,
                escape_html(ctx.location.path())
            ),
        }
    }
}
