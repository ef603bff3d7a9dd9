//! SVG visualization of a crop session.
//!
//! Draws the viewport, the scaled and translated image rectangle, and the
//! crop frame, with the transform and the confirmed region as annotations.
//! Useful for eyeballing clamp behavior in bug reports and test failures.
//!
//! # Example
//!
//! ```
//! use zencrop::{CropConfig, CropSession, Size, svg::render_session_svg};
//!
//! let mut session = CropSession::new(Size::new(375.0, 800.0), 16.0 / 9.0, CropConfig::default()).unwrap();
//! session.set_image_size(Size::new(4032.0, 3024.0)).unwrap();
//!
//! let svg = render_session_svg(&session);
//! assert!(svg.starts_with("<svg"));
//! ```

use std::fmt::Write;

use crate::geometry::{CropFrame, Size};
use crate::session::CropSession;
use crate::transform::Transform;

/// Maximum drawn width of the viewport panel.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum drawn height of the viewport panel.
const MAX_PANEL_H: f64 = 400.0;
/// Margin around the panel.
const MARGIN: f64 = 40.0;
/// Height of each annotation line below the panel.
const LINE_H: f64 = 18.0;

/// Render the session's current live state as a complete SVG document.
pub fn render_session_svg(session: &CropSession) -> String {
    let container = session.container();
    let k = (MAX_PANEL_W / container.width).min(MAX_PANEL_H / container.height);
    let panel = container.scaled(k);

    let mut notes = vec![format!(
        "viewport {}×{}, frame {:.1}×{:.1}",
        fmt_num(container.width),
        fmt_num(container.height),
        session.frame().width,
        session.frame().height
    )];

    let image_rect = match (session.image_size(), session.live_transform()) {
        (Some(image), Some(t)) => {
            notes.push(format!(
                "image {}×{}, scale {:.3}, translate ({:.1}, {:.1})",
                fmt_num(image.width),
                fmt_num(image.height),
                t.scale,
                t.translate_x,
                t.translate_y
            ));
            Some(screen_image_rect(session, image, t))
        }
        _ => {
            notes.push("image metadata pending".to_string());
            None
        }
    };
    if let Ok(region) = session.confirm() {
        notes.push(format!(
            "region ({:.1}, {:.1}) {:.1}×{:.1}",
            region.x, region.y, region.width, region.height
        ));
    }

    let doc_w = panel.width + 2.0 * MARGIN;
    let doc_h = panel.height + 2.0 * MARGIN + LINE_H * notes.len() as f64;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{doc_w:.0}" height="{doc_h:.0}" viewBox="0 0 {doc_w:.0} {doc_h:.0}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="0" y="0" width="{doc_w:.0}" height="{doc_h:.0}" fill="white"/>"#
    );
    let _ = writeln!(svg, r#"  <g transform="translate({MARGIN},{MARGIN})">"#);
    let _ = writeln!(
        svg,
        r##"    <rect x="0" y="0" width="{:.2}" height="{:.2}" fill="#333"/>"##,
        panel.width, panel.height
    );
    if let Some(r) = image_rect {
        let _ = writeln!(
            svg,
            r##"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#6a8caf" fill-opacity="0.6" stroke="#6a8caf"/>"##,
            r.x * k,
            r.y * k,
            r.width * k,
            r.height * k
        );
    }
    let f = session.frame();
    let _ = writeln!(
        svg,
        r##"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#f5c518" stroke-width="2"/>"##,
        f.x * k,
        f.y * k,
        f.width * k,
        f.height * k
    );
    let _ = writeln!(svg, "  </g>");
    for (i, note) in notes.iter().enumerate() {
        let y = MARGIN + panel.height + LINE_H * (i as f64 + 1.0);
        let _ = writeln!(
            svg,
            r#"  <text x="{MARGIN}" y="{y:.0}" font-family="monospace" font-size="12">{}</text>"#,
            escape(note)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// The image's on-screen rectangle in viewport coordinates.
fn screen_image_rect(session: &CropSession, image: Size, t: Transform) -> CropFrame {
    let scaled = image.scaled(t.scale);
    let center = session.viewport_center();
    CropFrame::new(
        center.x - scaled.width / 2.0 + t.translate_x,
        center.y - scaled.height / 2.0 + t.translate_y,
        scaled.width,
        scaled.height,
    )
}

fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GestureEvent, GestureKind};
    use crate::transform::CropConfig;

    fn session() -> CropSession {
        CropSession::new(Size::new(375.0, 800.0), 16.0 / 9.0, CropConfig::default()).unwrap()
    }

    #[test]
    fn pending_metadata() {
        let svg = render_session_svg(&session());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("image metadata pending"));
        assert!(!svg.contains("region ("));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn shows_image_and_region() {
        let mut s = session();
        s.set_image_size(Size::new(4032.0, 3024.0)).unwrap();
        let svg = render_session_svg(&s);
        assert!(svg.contains("image 4032×3024"));
        assert!(svg.contains("region ("));
        assert!(svg.contains(r##"stroke="#f5c518""##));
    }

    #[test]
    fn reflects_live_transform() {
        let mut s = session();
        s.set_image_size(Size::new(4032.0, 3024.0)).unwrap();
        s.handle(GestureEvent::Begin(GestureKind::Pinch));
        s.handle(GestureEvent::PinchUpdate { scale: 100.0 });
        let svg = render_session_svg(&s);
        assert!(svg.contains("scale 3.000"), "{svg}");
        // The annotated region still comes from the committed transform.
        assert!(svg.contains("region ("));
    }
}
