//! Observer lifecycle against a custom resize source.

use std::cell::RefCell;
use std::rc::Rc;

use deckstage::{HostMeasurement, ResizeSource, StageConfig, StageMode, StageObserver};

#[derive(Default)]
struct Log {
    size: Option<HostMeasurement>,
    subscribed: u32,
    unsubscribed: Vec<u32>,
}

/// A source shared with the test through `Rc<RefCell<_>>`, like a JS
/// callback registry would be.
#[derive(Clone, Default)]
struct SharedSource(Rc<RefCell<Log>>);

impl SharedSource {
    fn resize(&self, width: f64, height: f64) {
        self.0.borrow_mut().size = Some(HostMeasurement::new(width, height));
    }
}

impl ResizeSource for SharedSource {
    type Token = u32;

    fn measure(&self) -> HostMeasurement {
        self.0.borrow().size.unwrap_or(HostMeasurement::UNMEASURED)
    }

    fn subscribe(&mut self) -> u32 {
        let mut log = self.0.borrow_mut();
        log.subscribed += 1;
        log.subscribed
    }

    fn unsubscribe(&mut self, token: u32) {
        self.0.borrow_mut().unsubscribed.push(token);
    }
}

#[test]
fn one_subscription_per_mount() {
    let source = SharedSource::default();
    source.resize(800.0, 450.0);

    let observer = StageObserver::mount(source.clone(), StageConfig::basic(1600.0, 900.0));
    assert_eq!(source.0.borrow().subscribed, 1);
    assert!(source.0.borrow().unsubscribed.is_empty());

    observer.unmount();
    assert_eq!(source.0.borrow().unsubscribed, [1]);
}

#[test]
fn drop_releases_exactly_once() {
    let source = SharedSource::default();
    {
        let _a = StageObserver::mount(source.clone(), StageConfig::basic(1600.0, 900.0));
        let b = StageObserver::mount(source.clone(), StageConfig::safe_fit(1600.0, 900.0));
        b.unmount();
    }
    let log = source.0.borrow();
    assert_eq!(log.subscribed, 2);
    assert_eq!(log.unsubscribed, [2, 1]);
}

#[test]
fn resize_notifications_track_latest_size() {
    let source = SharedSource::default();
    let mut observer = StageObserver::mount(source.clone(), StageConfig::basic(1600.0, 900.0));

    // Detached until the host lays out.
    assert_eq!(observer.scale(), 1.0);

    source.resize(800.0, 450.0);
    assert_eq!(observer.on_resize().scale, 0.5);

    source.resize(400.0, 1000.0);
    source.resize(1600.0, 1800.0);
    assert_eq!(observer.on_resize().scale, 1.0);
    assert_eq!(observer.measurement(), HostMeasurement::new(1600.0, 1800.0));
}

#[test]
fn frame_follows_config_changes() {
    let source = SharedSource::default();
    source.resize(1000.0, 1000.0);
    let mut observer = StageObserver::mount(source, StageConfig::safe_fit(1600.0, 900.0));
    assert!((observer.scale() - 0.5625).abs() < 1e-12);

    observer.set_config(
        StageConfig::safe_fit(1600.0, 900.0)
            .mode(StageMode::Fill)
            .safety(1.0),
    );
    let frame = observer.frame();
    assert!((frame.scale - 1000.0 / 900.0).abs() < 1e-12);
    assert!(frame.overflows_host());
}
