//! Renderable views.
//!
//! # Responsibilities
//! - Define the capability the router depends on ([`View`])
//! - Provide the views bound by the application route table
//!
//! # Design Decisions
//! - The router only ever holds `Arc<dyn View>`; concrete views are opaque to it
//! - Views produce HTML fragments; the page shell belongs to the HTTP layer
//! - Every interpolated value is escaped

pub mod device_info;
pub mod not_found;
pub mod qr_scanner;

pub use device_info::DeviceInfoView;
pub use not_found::NotFoundView;
pub use qr_scanner::QrScannerView;

use crate::routing::{Location, Params};

/// Everything a view may read while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Name of the matched route, if any.
    pub route: Option<&'a str>,
    pub params: &'a Params,
    pub location: &'a Location,
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub title: String,
    /// HTML fragment placed inside the application root element.
    pub body: String,
}

/// A render target bound to a route.
pub trait View: Send + Sync + std::fmt::Debug {
    /// Stable identifier, used in logs and metrics.
    fn name(&self) -> &'static str;

    fn render(&self, ctx: &RenderContext<'_>) -> Rendered;
}

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
