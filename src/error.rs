//! Error types for the fallible parts of the crate.
//!
//! Scale computation, observation and rendering never fail. Only explicit
//! validation and the slide registry report errors.

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Caller contract violation in a stage or deck configuration.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Content width or height is not finite and positive.
    #[error("content size must be positive, got {width}x{height}")]
    InvalidContentSize { width: f64, height: f64 },
    /// Safety factor outside `(0, 1]`.
    #[error("safety factor must be in (0, 1], got {0}")]
    InvalidSafety(f64),
    /// Clamp range is empty, inverted, or not finite.
    #[error("scale bounds must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidBounds { min: f64, max: f64 },
    /// Zoom range is empty, inverted, or the default lies outside it.
    #[error("zoom range [{min}, {max}] must be inside (0, 1] and contain default {default}")]
    InvalidZoomRange { min: f64, max: f64, default: f64 },
}

/// Slide registry error.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A slide with this id is already registered.
    #[error("slide id {0:?} is already registered")]
    DuplicateId(String),
    /// Slide ids must be non-empty.
    #[error("slide id must not be empty")]
    EmptyId,
    /// No slide with this id.
    #[error("no slide with id {0:?}")]
    UnknownSlide(String),
    /// Index past the end of the registry.
    #[error("slide index {index} out of range for {len} slides")]
    IndexOutOfRange { index: usize, len: usize },
}
