//! Scale factor computation for a fixed-size stage inside a host container.
//!
//! Computes a single uniform scale from the host's measured size, the
//! stage's native content size, a fit mode, a safety (underscan) factor and
//! a clamp range. Pure geometry: total over all inputs, no allocations,
//! `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use deckstage::{HostMeasurement, StageConfig};
//!
//! let config = StageConfig::basic(1600.0, 900.0);
//! let result = config.compute(HostMeasurement::new(800.0, 450.0));
//!
//! assert_eq!(result.scale, 0.5);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::stage::Anchor;

/// How the content box is scaled relative to the host.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StageMode {
    /// Scale so the whole content box is visible inside the host.
    /// The host may show empty bands on one axis.
    #[default]
    Fit,

    /// Scale so the content box covers the host entirely.
    /// Content overflows (and is cropped by the host) on one axis.
    Fill,
}

/// Width × height in abstract pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        is_positive(self.width) && is_positive(self.height)
    }

    /// Multiply both dimensions by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// A point in abstract pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in abstract pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `p` lies inside (edges inclusive on the near side only).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }
}

/// Size of the host container, as reported by the hosting environment.
///
/// Zero in either dimension means "not laid out yet" (detached element,
/// hidden tab, first frame) and yields the identity scale.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HostMeasurement {
    pub width: f64,
    pub height: f64,
}

impl HostMeasurement {
    /// A host that has not been measured yet.
    pub const UNMEASURED: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new measurement.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Measurement as a [`Size`].
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether both dimensions are usable for scaling.
    pub fn is_measured(&self) -> bool {
        self.size().is_positive()
    }
}

impl From<Size> for HostMeasurement {
    fn from(s: Size) -> Self {
        Self::new(s.width, s.height)
    }
}

/// Inclusive clamp range for the computed scale.
///
/// Keeps pathological hosts (a 1px-wide pane, a 10k display) from producing
/// degenerate transforms. Always `0 < min <= max`, both finite.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBounds", into = "RawBounds"))]
pub struct ScaleBounds {
    min: f64,
    max: f64,
}

impl ScaleBounds {
    /// Range used by the basic top-left anchored stage.
    pub const BASIC: Self = Self { min: 0.05, max: 3.0 };

    /// Range used by the safe-fit, center anchored stage.
    pub const SAFE_FIT: Self = Self { min: 0.4, max: 2.0 };

    /// Create a clamp range, rejecting empty, inverted or non-finite ranges.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !is_positive(min) || !max.is_finite() {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        if min > max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Clamp `v` into the range.
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self::BASIC
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawBounds {
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBounds> for ScaleBounds {
    type Error = ConfigError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

#[cfg(feature = "serde")]
impl From<ScaleBounds> for RawBounds {
    fn from(b: ScaleBounds) -> Self {
        Self {
            min: b.min,
            max: b.max,
        }
    }
}

/// Stage configuration: native content size and how to scale it.
///
/// Immutable per render; the caller builds one and hands it to the observer
/// or renderer.
///
/// ```
/// use deckstage::{Anchor, HostMeasurement, StageConfig, StageMode};
///
/// let config = StageConfig::safe_fit(1600.0, 900.0)
///     .mode(StageMode::Fit)
///     .safety(0.9);
///
/// assert_eq!(config.anchor, Anchor::Center);
/// let scale = config.compute(HostMeasurement::new(1000.0, 1000.0)).scale;
/// assert!((scale - 0.5625).abs() < 1e-12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StageConfig {
    /// Native size the content lays out at.
    pub content: Size,
    pub mode: StageMode,
    /// Underscan multiplier in `(0, 1]`.
    pub safety: f64,
    pub bounds: ScaleBounds,
    pub anchor: Anchor,
}

impl StageConfig {
    /// Basic stage: exact fit, top-left transform origin, `[0.05, 3]` range.
    pub const fn basic(width: f64, height: f64) -> Self {
        Self {
            content: Size::new(width, height),
            mode: StageMode::Fit,
            safety: 1.0,
            bounds: ScaleBounds::BASIC,
            anchor: Anchor::TopLeft,
        }
    }

    /// Safe-fit stage: 0.90 underscan, centered, `[0.4, 2]` range.
    pub const fn safe_fit(width: f64, height: f64) -> Self {
        Self {
            content: Size::new(width, height),
            mode: StageMode::Fit,
            safety: 0.90,
            bounds: ScaleBounds::SAFE_FIT,
            anchor: Anchor::Center,
        }
    }

    /// Set the fit mode.
    pub fn mode(mut self, mode: StageMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the safety (underscan) factor.
    pub fn safety(mut self, safety: f64) -> Self {
        self.safety = safety;
        self
    }

    /// Set the clamp range.
    pub fn bounds(mut self, bounds: ScaleBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the transform anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Check the caller contract.
    ///
    /// [`compute`](Self::compute) never needs this; it degrades to the
    /// identity scale instead of failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.content.is_positive() {
            return Err(ConfigError::InvalidContentSize {
                width: self.content.width,
                height: self.content.height,
            });
        }
        if !is_positive(self.safety) || self.safety > 1.0 {
            return Err(ConfigError::InvalidSafety(self.safety));
        }
        Ok(())
    }

    /// Compute the scale for a host measurement.
    pub fn compute(&self, host: HostMeasurement) -> ScaleResult {
        if !host.is_measured() {
            return ScaleResult::IDENTITY;
        }
        ScaleResult {
            scale: compute_scale(host.size(), self.content, self.mode, self.safety, self.bounds),
        }
    }
}

/// Computed scale for one measurement. Recomputed on every change.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleResult {
    /// Uniform scale, finite and positive.
    pub scale: f64,
}

impl ScaleResult {
    /// No scaling.
    pub const IDENTITY: Self = Self { scale: 1.0 };

    /// Whether the scale is exactly 1.
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0
    }
}

impl Default for ScaleResult {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compute the clamped uniform scale of `content` inside `host`.
///
/// Returns `1.0` when the host is unmeasured (zero in either dimension) or
/// when `content` is degenerate. A non-positive or non-finite `safety` is
/// treated as `1.0`. The result is always finite and positive.
///
/// ```
/// use deckstage::{ScaleBounds, Size, StageMode, compute_scale};
///
/// let s = compute_scale(
///     Size::new(1000.0, 1000.0),
///     Size::new(1600.0, 900.0),
///     StageMode::Fill,
///     1.0,
///     ScaleBounds::SAFE_FIT,
/// );
/// assert!((s - 1000.0 / 900.0).abs() < 1e-12);
/// ```
pub fn compute_scale(
    host: Size,
    content: Size,
    mode: StageMode,
    safety: f64,
    bounds: ScaleBounds,
) -> f64 {
    if !host.is_positive() || !content.is_positive() {
        return 1.0;
    }

    let sx = host.width / content.width;
    let sy = host.height / content.height;
    let base = match mode {
        StageMode::Fit => sx.min(sy),
        StageMode::Fill => sx.max(sy),
    };

    let safety = if is_positive(safety) { safety } else { 1.0 };
    bounds.clamp(base * safety)
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
