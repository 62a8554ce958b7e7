//! Slide registry: ordered slide ids mapped to on-demand factories.
//!
//! Registration order is presentation order. A factory only runs when its
//! slide is instantiated, so a deck of many heavy slides costs nothing
//! until a slide is shown.
//!
//! # Example
//!
//! ```
//! use deckstage::registry::{SlideMeta, SlideRegistry};
//!
//! let mut deck = SlideRegistry::new();
//! deck.register(SlideMeta::new("cover", "Cover").tag("intro"), |props| {
//!     format!("cover {}/{}", props.index + 1, props.total)
//! })
//! .unwrap();
//! deck.register(SlideMeta::new("agenda", "Agenda"), |_| String::from("agenda"))
//!     .unwrap();
//!
//! assert_eq!(deck.len(), 2);
//! assert_eq!(deck.instantiate_id("cover").unwrap(), "cover 1/2");
//! ```

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::RegistryError;

/// Descriptive data for one slide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlideMeta {
    /// Stable identifier, unique within a registry.
    pub id: String,
    /// Human-readable title for the HUD and palette.
    pub title: String,
    pub tags: Vec<String>,
}

impl SlideMeta {
    /// Create metadata with no tags.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
        }
    }

    /// Add a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether the slide carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Storage key for this slide's speaker notes, `deck:notes:<id>`.
    ///
    /// The host owns the storage; the key is stable across sessions.
    pub fn notes_key(&self) -> String {
        format!("deck:notes:{}", self.id)
    }
}

/// Arguments handed to a slide factory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlideProps {
    /// Zero-based position of the slide in the deck.
    pub index: usize,
    /// Number of slides in the deck.
    pub total: usize,
}

type Factory<R> = Box<dyn Fn(SlideProps) -> R>;

struct Entry<R> {
    meta: SlideMeta,
    factory: Factory<R>,
}

/// Ordered table of slides producing renderable units of type `R`.
pub struct SlideRegistry<R> {
    entries: Vec<Entry<R>>,
}

impl<R> Default for SlideRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for SlideRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.meta.id))
            .finish()
    }
}

impl<R> SlideRegistry<R> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a slide. Ids must be non-empty and unique.
    pub fn register<F>(&mut self, meta: SlideMeta, factory: F) -> Result<(), RegistryError>
    where
        F: Fn(SlideProps) -> R + 'static,
    {
        if meta.id.is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if self.index_of(&meta.id).is_some() {
            return Err(RegistryError::DuplicateId(meta.id));
        }
        self.entries.push(Entry {
            meta,
            factory: Box::new(factory),
        });
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, meta: SlideMeta, factory: F) -> Result<Self, RegistryError>
    where
        F: Fn(SlideProps) -> R + 'static,
    {
        self.register(meta, factory)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the slide with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.meta.id == id)
    }

    /// Metadata of the slide at `index`.
    pub fn meta(&self, index: usize) -> Option<&SlideMeta> {
        self.entries.get(index).map(|e| &e.meta)
    }

    /// Metadata of the slide with `id`.
    pub fn get(&self, id: &str) -> Option<&SlideMeta> {
        self.entries.iter().find(|e| e.meta.id == id).map(|e| &e.meta)
    }

    /// All slide metadata in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &SlideMeta> {
        self.entries.iter().map(|e| &e.meta)
    }

    /// `(index, meta)` of slides carrying `tag`.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = (usize, &'a SlideMeta)> {
        self.iter().enumerate().filter(move |(_, m)| m.has_tag(tag))
    }

    /// Run the factory for the slide at `index`.
    pub fn instantiate(&self, index: usize) -> Result<R, RegistryError> {
        let len = self.len();
        let entry = self
            .entries
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange { index, len })?;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("slide_instantiate", id = %entry.meta.id, index).entered();

        Ok((entry.factory)(SlideProps { index, total: len }))
    }

    /// Run the factory for the slide with `id`.
    pub fn instantiate_id(&self, id: &str) -> Result<R, RegistryError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| RegistryError::UnknownSlide(String::from(id)))?;
        self.instantiate(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn sample() -> SlideRegistry<String> {
        SlideRegistry::new()
            .with(SlideMeta::new("slide-00", "Cover").tag("intro"), |p| {
                format!("00:{}/{}", p.index, p.total)
            })
            .unwrap()
            .with(SlideMeta::new("slide-01", "Agenda").tag("overview"), |p| {
                format!("01:{}/{}", p.index, p.total)
            })
            .unwrap()
            .with(
                SlideMeta::new("slide-02", "Dashboard")
                    .tag("overview")
                    .tag("kpi"),
                |p| format!("02:{}/{}", p.index, p.total),
            )
            .unwrap()
    }

    #[test]
    fn preserves_registration_order() {
        let reg = sample();
        let ids: Vec<&str> = reg.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["slide-00", "slide-01", "slide-02"]);
        assert_eq!(reg.index_of("slide-02"), Some(2));
        assert_eq!(reg.meta(1).map(|m| m.title.as_str()), Some("Agenda"));
    }

    #[test]
    fn instantiate_passes_props() {
        let reg = sample();
        assert_eq!(reg.instantiate(1).unwrap(), "01:1/3");
        assert_eq!(reg.instantiate_id("slide-02").unwrap(), "02:2/3");
    }

    #[test]
    fn duplicate_and_empty_ids_rejected() {
        let mut reg = sample();
        assert_eq!(
            reg.register(SlideMeta::new("slide-01", "Again"), |_| String::new()),
            Err(RegistryError::DuplicateId(String::from("slide-01")))
        );
        assert_eq!(
            reg.register(SlideMeta::new("", "Nameless"), |_| String::new()),
            Err(RegistryError::EmptyId)
        );
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn lookup_errors() {
        let reg = sample();
        assert_eq!(
            reg.instantiate(3),
            Err(RegistryError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            reg.instantiate_id("slide-99"),
            Err(RegistryError::UnknownSlide(String::from("slide-99")))
        );
    }

    #[test]
    fn factories_run_only_on_demand() {
        let calls = Rc::new(Cell::new(0u32));
        let mut reg = SlideRegistry::new();
        for i in 0..4 {
            let calls = Rc::clone(&calls);
            reg.register(SlideMeta::new(format!("s{i}"), "t"), move |_| {
                calls.set(calls.get() + 1);
            })
            .unwrap();
        }
        assert_eq!(calls.get(), 0);
        reg.instantiate(2).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn notes_key_uses_slide_id() {
        let reg = sample();
        assert_eq!(
            reg.get("slide-01").map(SlideMeta::notes_key).as_deref(),
            Some("deck:notes:slide-01")
        );
    }

    #[test]
    fn tag_filter() {
        let reg = sample();
        let overview: Vec<usize> = reg.with_tag("overview").map(|(i, _)| i).collect();
        assert_eq!(overview, [1, 2]);
        assert_eq!(reg.with_tag("missing").count(), 0);
    }
}
