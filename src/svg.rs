//! SVG visualization of a stage frame.
//!
//! Draws the host box, the scaled content box, the transform anchor and a
//! caption with the scale, for debugging layout in docs and bug reports.
//!
//! # Example
//!
//! ```
//! use deckstage::{HostMeasurement, StageConfig, StageFrame, svg::render_stage_svg};
//!
//! let frame = StageFrame::new(
//!     &StageConfig::safe_fit(1600.0, 900.0),
//!     HostMeasurement::new(1280.0, 1024.0),
//! );
//! let svg = render_stage_svg(&frame);
//! assert!(svg.starts_with("<svg"));
//! ```

use crate::scale::{Point, Rect};
use crate::stage::{Anchor, StageFrame};

/// Maximum pixel width of the drawing area.
const MAX_PANEL_W: f64 = 480.0;
/// Maximum pixel height of the drawing area.
const MAX_PANEL_H: f64 = 320.0;
/// Margin around the drawing area.
const MARGIN: f64 = 40.0;
/// Height of the caption block under the drawing.
const CAPTION_H: f64 = 44.0;
/// Radius of the anchor marker.
const ANCHOR_R: f64 = 4.0;

/// Render a complete SVG document for `frame`.
pub fn render_stage_svg(frame: &StageFrame) -> String {
    // Fit host and visual box (which may overflow) into the panel.
    let bounds = union(
        Rect::new(0.0, 0.0, frame.host.width, frame.host.height),
        frame.visual,
    );
    let k = panel_scale(bounds.width, bounds.height);
    let to_panel = |p: Point| {
        Point::new(
            MARGIN + (p.x - bounds.x) * k,
            MARGIN + (p.y - bounds.y) * k,
        )
    };

    let total_w = bounds.width * k + 2.0 * MARGIN;
    let total_h = bounds.height * k + 2.0 * MARGIN + CAPTION_H;

    let mut svg = String::with_capacity(2048);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {:.1} {:.1}">"#,
        total_w.ceil() as u32,
        total_h.ceil() as u32,
        total_w,
        total_h
    ));
    svg.push('\n');

    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .host { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .content { fill: #6ba3d6; fill-opacity: 0.8; stroke: #2c6faa; stroke-width: 1.5; }
  .anchor { fill: #d6546b; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .host { fill: #2d2d2d; stroke: #555; }
    .content { fill: #3a72a4; stroke: #5a9fd4; }
    .anchor { fill: #e07a8c; }
  }
</style>
"##);

    let host = to_panel(Point::new(0.0, 0.0));
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="host"/>"#,
        host.x,
        host.y,
        frame.host.width * k,
        frame.host.height * k
    ));
    svg.push('\n');

    let v = to_panel(frame.visual.origin());
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="content" rx="2"/>"#,
        v.x,
        v.y,
        frame.visual.width * k,
        frame.visual.height * k
    ));
    svg.push('\n');

    let anchor = to_panel(match frame.anchor {
        Anchor::TopLeft => frame.visual.origin(),
        Anchor::Center => frame.visual.center(),
    });
    svg.push_str(&format!(
        r#"<circle cx="{:.1}" cy="{:.1}" r="{}" class="anchor"/>"#,
        anchor.x, anchor.y, ANCHOR_R
    ));
    svg.push('\n');

    let caption_y = MARGIN + bounds.height * k + 20.0;
    svg.push_str(&format!(
        r#"<text x="{}" y="{:.1}" class="label">{}</text>"#,
        MARGIN,
        caption_y,
        escape_xml(&format!(
            "Host {}×{}  Content {}×{}",
            frame.host.width, frame.host.height, frame.content.width, frame.content.height
        ))
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{}" y="{:.1}" class="annotation">{}</text>"#,
        MARGIN,
        caption_y + 18.0,
        escape_xml(&format!(
            "scale {:.4}  anchor {}{}",
            frame.scale,
            frame.anchor.css_origin(),
            if frame.overflows_host() { "  overflow" } else { "" }
        ))
    ));
    svg.push('\n');

    svg.push_str("</svg>\n");
    svg
}

/// Scale that fits a `w`×`h` box into the panel. Degenerate boxes draw at 1:1.
fn panel_scale(w: f64, h: f64) -> f64 {
    if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
        return 1.0;
    }
    (MAX_PANEL_W / w).min(MAX_PANEL_H / h)
}

fn union(a: Rect, b: Rect) -> Rect {
    let x0 = a.x.min(b.x);
    let y0 = a.y.min(b.y);
    let x1 = (a.x + a.width).max(b.x + b.width);
    let y1 = (a.y + a.height).max(b.y + b.height);
    Rect::new(x0, y0, x1 - x0, y1 - y0)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
