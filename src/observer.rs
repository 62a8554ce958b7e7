//! Resize observation: keeping a stage's scale in step with its host.
//!
//! The platform's resize primitive (a browser `ResizeObserver`, a window
//! system's configure event, a test harness) sits behind [`ResizeSource`].
//! A [`StageObserver`] owns exactly one subscription on it for its whole
//! lifetime and recomputes the scale on every notification. There is no
//! debouncing; the computation is O(1) and the most recent measurement wins.
//!
//! # Example
//!
//! ```
//! use deckstage::{HostDrivenSource, HostMeasurement, StageConfig, StageObserver};
//!
//! let mut source = HostDrivenSource::new(HostMeasurement::new(800.0, 450.0));
//! let mut observer = StageObserver::mount(&mut source, StageConfig::basic(1600.0, 900.0));
//! assert_eq!(observer.scale(), 0.5);
//!
//! observer.source_mut().set_size(HostMeasurement::new(1600.0, 900.0));
//! observer.on_resize();
//! assert_eq!(observer.scale(), 1.0);
//!
//! observer.unmount();
//! assert_eq!(source.active_subscriptions(), 0);
//! ```

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::scale::{HostMeasurement, ScaleResult, StageConfig};
use crate::stage::StageFrame;

/// A platform resize-notification primitive.
///
/// Implementations measure the host element's box and hand out one token
/// per subscription. The observer adapter calls [`subscribe`](Self::subscribe)
/// once on mount and [`unsubscribe`](Self::unsubscribe) once on teardown.
pub trait ResizeSource {
    /// Subscription handle returned by [`subscribe`](Self::subscribe).
    type Token;

    /// Current size of the host element.
    fn measure(&self) -> HostMeasurement;

    /// Start delivering resize notifications.
    fn subscribe(&mut self) -> Self::Token;

    /// Stop delivering notifications for `token`.
    fn unsubscribe(&mut self, token: Self::Token);
}

impl<T: ResizeSource + ?Sized> ResizeSource for &mut T {
    type Token = T::Token;

    fn measure(&self) -> HostMeasurement {
        (**self).measure()
    }

    fn subscribe(&mut self) -> Self::Token {
        (**self).subscribe()
    }

    fn unsubscribe(&mut self, token: Self::Token) {
        (**self).unsubscribe(token)
    }
}

/// Subscription handle issued by [`HostDrivenSource`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A [`ResizeSource`] whose size is pushed by the embedding host.
///
/// Suitable for wasm embeddings where JS forwards `ResizeObserver` entries,
/// and for tests. Tracks live subscriptions so leaks are visible.
#[derive(Debug, Clone, Default)]
pub struct HostDrivenSource {
    size: HostMeasurement,
    next_id: u64,
    #[cfg(feature = "alloc")]
    active: Vec<SubscriptionId>,
    #[cfg(not(feature = "alloc"))]
    active: usize,
}

impl HostDrivenSource {
    /// Create a source with an initial size.
    pub fn new(size: HostMeasurement) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Update the current size.
    pub fn set_size(&mut self, size: HostMeasurement) {
        self.size = size;
    }

    /// Number of subscriptions not yet released.
    pub fn active_subscriptions(&self) -> usize {
        #[cfg(feature = "alloc")]
        {
            self.active.len()
        }
        #[cfg(not(feature = "alloc"))]
        {
            self.active
        }
    }
}

impl ResizeSource for HostDrivenSource {
    type Token = SubscriptionId;

    fn measure(&self) -> HostMeasurement {
        self.size
    }

    fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        #[cfg(feature = "alloc")]
        self.active.push(id);
        #[cfg(not(feature = "alloc"))]
        {
            self.active += 1;
        }
        id
    }

    fn unsubscribe(&mut self, token: SubscriptionId) {
        #[cfg(feature = "alloc")]
        self.active.retain(|&id| id != token);
        #[cfg(not(feature = "alloc"))]
        {
            let _ = token;
            self.active = self.active.saturating_sub(1);
        }
    }
}

/// Keeps a [`ScaleResult`] current for one stage instance.
///
/// Mounting measures synchronously and subscribes; dropping (or
/// [`unmount`](Self::unmount)) releases the subscription. Observers never
/// share a subscription. Pass `&mut source` to keep ownership of the source
/// outside the observer.
#[derive(Debug)]
pub struct StageObserver<S: ResizeSource> {
    source: S,
    token: Option<S::Token>,
    config: StageConfig,
    measurement: HostMeasurement,
    result: ScaleResult,
}

impl<S: ResizeSource> StageObserver<S> {
    /// Take the initial measurement, subscribe, and compute the first scale.
    pub fn mount(mut source: S, config: StageConfig) -> Self {
        let measurement = source.measure();
        let token = source.subscribe();
        let result = config.compute(measurement);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            width = measurement.width,
            height = measurement.height,
            scale = result.scale,
            "stage observer mounted"
        );

        Self {
            source,
            token: Some(token),
            config,
            measurement,
            result,
        }
    }

    /// Handle a resize notification by re-measuring the source.
    pub fn on_resize(&mut self) -> ScaleResult {
        let m = self.source.measure();
        self.push_measurement(m)
    }

    /// Handle a resize notification that carries its own measurement.
    pub fn push_measurement(&mut self, measurement: HostMeasurement) -> ScaleResult {
        self.measurement = measurement;
        self.result = self.config.compute(measurement);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            width = measurement.width,
            height = measurement.height,
            scale = self.result.scale,
            "stage resized"
        );

        self.result
    }

    /// Replace the config and recompute against the current measurement.
    pub fn set_config(&mut self, config: StageConfig) -> ScaleResult {
        self.config = config;
        self.result = config.compute(self.measurement);
        self.result
    }

    /// Latest scale factor.
    pub fn scale(&self) -> f64 {
        self.result.scale
    }

    /// Latest scale result.
    pub fn result(&self) -> ScaleResult {
        self.result
    }

    /// Latest host measurement.
    pub fn measurement(&self) -> HostMeasurement {
        self.measurement
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Render description for the latest measurement.
    pub fn frame(&self) -> StageFrame {
        StageFrame::with_scale(&self.config, self.measurement, self.result.scale)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source, for host-driven sources.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Release the subscription. Equivalent to dropping the observer.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(token) = self.token.take() {
            self.source.unsubscribe(token);

            #[cfg(feature = "tracing")]
            tracing::debug!("stage observer unmounted");
        }
    }
}

impl<S: ResizeSource> Drop for StageObserver<S> {
    fn drop(&mut self) {
        self.release();
    }
}
