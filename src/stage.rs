//! Stage rendering: placing the scaled content box inside the host.
//!
//! The content box always lays out at its native size; only the visual
//! size changes. A [`StageFrame`] describes where the scaled box lands in
//! host coordinates and how to express the transform for a renderer.
//!
//! ```text
//!     Anchor::TopLeft              Anchor::Center
//!     ┌───────────────┐            ┌───────────────┐
//!     │┌─────┐        │            │   ┌───────┐   │
//!     ││ 0.5 │        │            │   │  0.9  │   │
//!     │└─────┘        │            │   └───────┘   │
//!     └───────────────┘            └───────────────┘
//! ```

#[cfg(feature = "alloc")]
use alloc::{format, string::String};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scale::{HostMeasurement, Point, Rect, Size, StageConfig};

/// Transform origin of the scaled content box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Anchor {
    /// Box pinned to the host's top-left corner, scaled from there.
    #[default]
    TopLeft,
    /// Box centered in the host, scaled about its own center.
    Center,
}

impl Anchor {
    /// CSS `transform-origin` value.
    pub const fn css_origin(self) -> &'static str {
        match self {
            Self::TopLeft => "top left",
            Self::Center => "center center",
        }
    }
}

/// Render description of a stage for one host measurement.
///
/// Stateless: rebuild it whenever the measurement or config changes.
///
/// ```
/// use deckstage::{HostMeasurement, StageConfig, StageFrame};
///
/// let frame = StageFrame::new(
///     &StageConfig::safe_fit(1600.0, 900.0).safety(1.0),
///     HostMeasurement::new(1000.0, 1000.0),
/// );
///
/// assert_eq!(frame.scale, 0.625);
/// assert_eq!(frame.visual.width, 1000.0);
/// assert_eq!(frame.visual.height, 562.5);
/// assert_eq!(frame.visual.y, 218.75);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StageFrame {
    /// Host size the frame was computed for.
    pub host: Size,
    /// Native content size. Children lay out at this size.
    pub content: Size,
    /// Uniform scale applied to the content box.
    pub scale: f64,
    pub anchor: Anchor,
    /// Scaled box in host coordinates.
    pub visual: Rect,
}

impl StageFrame {
    /// Compute the frame for `config` inside `host`.
    pub fn new(config: &StageConfig, host: HostMeasurement) -> Self {
        let scale = config.compute(host).scale;
        Self::with_scale(config, host, scale)
    }

    /// Build a frame from an already computed scale.
    pub(crate) fn with_scale(config: &StageConfig, host: HostMeasurement, scale: f64) -> Self {
        let host = host.size();
        let content = config.content;
        let visual_size = content.scaled(scale);
        let (x, y) = match config.anchor {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::Center => (
                (host.width - visual_size.width) / 2.0,
                (host.height - visual_size.height) / 2.0,
            ),
        };
        Self {
            host,
            content,
            scale,
            anchor: config.anchor,
            visual: Rect::new(x, y, visual_size.width, visual_size.height),
        }
    }

    /// Rendered size of the content box.
    pub fn visual_size(&self) -> Size {
        self.visual.size()
    }

    /// Whether any part of the scaled box falls outside the host.
    pub fn overflows_host(&self) -> bool {
        self.visual.x < 0.0
            || self.visual.y < 0.0
            || self.visual.x + self.visual.width > self.host.width
            || self.visual.y + self.visual.height > self.host.height
    }

    /// Map a point in native content coordinates to host coordinates.
    pub fn to_host(&self, p: Point) -> Point {
        Point::new(
            self.visual.x + p.x * self.scale,
            self.visual.y + p.y * self.scale,
        )
    }

    /// Map a host point (pointer position) back to content coordinates.
    ///
    /// Returns `None` when the point is outside the scaled box.
    pub fn to_content(&self, p: Point) -> Option<Point> {
        if !self.visual.contains(p) {
            return None;
        }
        Some(Point::new(
            (p.x - self.visual.x) / self.scale,
            (p.y - self.visual.y) / self.scale,
        ))
    }

    /// Visual rect snapped outward to whole device pixels.
    ///
    /// `dpr` is the device pixel ratio; non-positive values are treated as 1.
    /// The result is in CSS pixels.
    pub fn device_rect(&self, dpr: f64) -> Rect {
        use num_traits::Float;

        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let x0 = Float::floor(self.visual.x * dpr);
        let y0 = Float::floor(self.visual.y * dpr);
        let x1 = Float::ceil((self.visual.x + self.visual.width) * dpr);
        let y1 = Float::ceil((self.visual.y + self.visual.height) * dpr);
        Rect::new(x0 / dpr, y0 / dpr, (x1 - x0) / dpr, (y1 - y0) / dpr)
    }

    /// CSS `transform` value, e.g. `scale(0.5)`.
    #[cfg(feature = "alloc")]
    pub fn transform_css(&self) -> String {
        format!("scale({})", self.scale)
    }

    /// CSS `transform-origin` value for the anchor.
    pub fn transform_origin_css(&self) -> &'static str {
        self.anchor.css_origin()
    }
}
