//! Instrumented paths run under a live subscriber.

#![cfg(feature = "tracing")]

use deckstage::deck::{Deck, DeckCommand, DeckSettings};
use deckstage::registry::{SlideMeta, SlideRegistry};
use deckstage::{HostDrivenSource, HostMeasurement, StageConfig, StageObserver};

fn init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn observer_lifecycle_is_traced() {
    init();
    let mut source = HostDrivenSource::new(HostMeasurement::new(800.0, 450.0));
    let mut observer = StageObserver::mount(&mut source, StageConfig::basic(1600.0, 900.0));
    observer.push_measurement(HostMeasurement::new(1600.0, 900.0));
    assert_eq!(observer.scale(), 1.0);
    observer.unmount();
    assert_eq!(source.active_subscriptions(), 0);
}

#[test]
fn deck_and_registry_are_traced() {
    init();
    let slides = SlideRegistry::new()
        .with(SlideMeta::new("cover", "Cover"), |_| 0u8)
        .unwrap();
    assert_eq!(slides.instantiate(0), Ok(0));

    let mut deck = Deck::new(DeckSettings::default(), slides.len());
    assert!(!deck.dispatch(DeckCommand::Next));
    assert!(deck.dispatch(DeckCommand::ToggleHud));
}
