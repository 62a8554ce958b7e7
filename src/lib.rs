//! Fixed-size slide stages scaled to fit their host, plus the deck model around them.
//!
//! A stage is a box authored at one native size (1600×900 by default) and
//! displayed at whatever size its host container happens to be. This crate
//! computes the uniform scale factor and placement for that box, keeps it
//! current as the host resizes, and models the deck that shows the stages:
//! slide registry, navigation, key bindings, URL query state and a command
//! palette. Rendering is left to the host.
//!
//! # Modules
//!
//! - [`scale`]: stage configuration and the scale computation
//! - [`stage`]: placement of the scaled box inside the host, coordinate mapping
//! - [`observer`]: resize subscriptions and recomputation on host resize
//! - [`deck`]: deck settings, navigation, key bindings, view toggles
//! - [`registry`]: ordered slide metadata with lazy factories (`alloc`)
//! - [`palette`]: searchable command palette (`alloc`)
//! - [`query`]: deck URL query parsing and serialization (`query`)
//! - `svg`: SVG diagram of a stage frame (`svg`)
//!
//! # Example
//!
//! ```
//! use deckstage::{HostMeasurement, StageConfig, StageFrame};
//!
//! let config = StageConfig::safe_fit(1600.0, 900.0);
//! let frame = StageFrame::new(&config, HostMeasurement::new(1280.0, 1024.0));
//!
//! assert!((frame.scale - 0.72).abs() < 1e-12);
//! assert!((frame.visual.width - 1152.0).abs() < 1e-9);
//! assert!(!frame.overflows_host());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod deck;
pub mod error;
pub mod observer;
pub mod scale;
pub mod stage;

#[cfg(feature = "alloc")]
pub mod palette;
#[cfg(feature = "alloc")]
pub mod registry;

#[cfg(feature = "query")]
pub mod query;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "alloc")]
pub use error::RegistryError;
pub use error::ConfigError;
pub use observer::{HostDrivenSource, ResizeSource, StageObserver, SubscriptionId};
pub use scale::{
    HostMeasurement, Point, Rect, ScaleBounds, ScaleResult, Size, StageConfig, StageMode,
    compute_scale,
};
pub use stage::{Anchor, StageFrame};
