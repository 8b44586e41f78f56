//! Device-info view, bound to `/device/:id`.

use super::{escape_html, RenderContext, Rendered, View};

/// Parameter carrying the device identifier.
pub const DEVICE_ID_PARAM: &str = "id";

#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceInfoView;

impl View for DeviceInfoView {
    fn name(&self) -> &'static str {
        "device-info"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Rendered {
        // Routed without an id only when mounted on a custom pattern.
        let id = ctx.params.get(DEVICE_ID_PARAM).unwrap_or_default();
        let id = escape_html(id);

        Rendered {
            title: format!("Device {id}"),
            body: format!(
                concat!(
                    r#"<section class="device-info" data-view="device-info" data-device-id="{id}">"#,
                    r#"<h1>Device <code>{id}</code></h1>"#,
                    r#"<dl class="device-details"><dt>ID</dt><dd>{id}</dd></dl>"#,
                    r#"<a href="/">Scan another device</a>"#,
                    r#"</section>"#
                ),
                id = id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Location, Params};

    fn render(id: &str) -> Rendered {
        let location = Location::parse("/device/x").unwrap();
        let params: Params = [(DEVICE_ID_PARAM, id)].into_iter().collect();
        DeviceInfoView.render(&RenderContext {
            route: Some("DeviceInfo"),
            params: &params,
            location: &location,
        })
    }

    #[test]
    fn test_renders_id() {
        let rendered = render("42");
        assert_eq!(rendered.title, "Device 42");
        assert!(rendered.body.contains(r#"data-device-id="42""#));
        assert!(rendered.body.contains("<code>42</code>"));
    }

    #[test]
    fn test_id_is_escaped() {
        let rendered = render("<script>");
        assert!(!rendered.body.contains("<script>"));
        assert!(rendered.body.contains("&lt;script&gt;"));
    }
}
