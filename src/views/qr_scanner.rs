//! Home view: the QR camera scanner.
//!
//! Renders the scanner mount point. Decoding happens in the browser; a scanned
//! code replaces `:id` in `data-scan-target` and navigates there.

use super::{RenderContext, Rendered, View};

#[derive(Debug, Clone, Copy, Default)]
pub struct QrScannerView;

impl View for QrScannerView {
    fn name(&self) -> &'static str {
        "qr-scanner"
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> Rendered {
        Rendered {
            title: "Scan device".to_string(),
            body: concat!(
                r#"<section class="qr-scanner" data-view="qr-scanner">"#,
                r#"<h1>Scan a device QR code</h1>"#,
                r#"<video id="qr-camera" autoplay muted playsinline></video>"#,
                r#"<p class="hint">Point the camera at the code on the device.</p>"#,
                r#"<output id="qr-result" data-scan-target="/device/:id"></output>"#,
                r#"</section>"#
            )
            .to_string(),
        }
    }
}
