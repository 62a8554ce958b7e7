//! Parsed deck query parameters.

use alloc::collections::BTreeMap;
use alloc::string::String;

use super::parse::percent_encode;
use crate::deck::{Deck, DeckSettings, Grade};

/// Parsed deck query.
///
/// Produced by [`crate::query::parse()`]; applied to a [`Deck`] with
/// [`apply`](Self::apply) and written back with
/// [`to_query_string`](Self::to_query_string).
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct DeckQuery {
    /// Requested slide index (`s`, `slide`). Clamped on use.
    pub slide: Option<i64>,
    /// Requested zoom / underscan (`zoom`). Clamped on use.
    pub zoom: Option<f64>,
    /// Backdrop grade (`grade`).
    pub grade: Option<Grade>,
    /// Print layout (`print=1`).
    pub print: bool,
    /// Visual snapshot overlay (`vs=1`).
    pub visual_snapshot: bool,
    /// Parameters the deck does not use, preserved for round-tripping.
    pub extras: BTreeMap<String, String>,
}

impl DeckQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the URL-backed state of a deck.
    pub fn from_deck(deck: &Deck) -> Self {
        Self {
            slide: Some(deck.navigator.index() as i64),
            zoom: deck.zoom,
            grade: (deck.grade != Grade::default()).then_some(deck.grade),
            print: deck.view.print,
            visual_snapshot: deck.view.visual_snapshot,
            extras: BTreeMap::new(),
        }
    }

    /// Slide index clamped into a deck of `total` slides.
    ///
    /// Missing or negative values select the first slide.
    pub fn slide_index(&self, total: usize) -> usize {
        let last = total.saturating_sub(1);
        match self.slide {
            Some(s) if s > 0 => usize::try_from(s).map_or(last, |s| s.min(last)),
            _ => 0,
        }
    }

    /// Zoom resolved against the deck settings.
    pub fn zoom(&self, settings: &DeckSettings) -> f64 {
        settings.clamp_zoom(self.zoom)
    }

    /// Apply position, zoom, grade and flags to `deck`.
    pub fn apply(&self, deck: &mut Deck) {
        let index = self.slide_index(deck.navigator.total());
        deck.navigator.go(index);
        deck.zoom = self.zoom;
        deck.grade = self.grade.unwrap_or_default();
        deck.view.print = self.print;
        deck.view.visual_snapshot = self.visual_snapshot;
    }

    /// Same query pointing at another slide.
    pub fn with_slide(mut self, index: usize) -> Self {
        self.slide = Some(index as i64);
        self
    }

    /// Flip a boolean flag by its query key (`print` or `vs`).
    ///
    /// Returns `false` for keys that are not deck flags.
    pub fn toggle_flag(&mut self, key: &str) -> bool {
        match key {
            "print" => self.print = !self.print,
            "vs" => self.visual_snapshot = !self.visual_snapshot,
            _ => return false,
        }
        true
    }

    /// Serialize in canonical order: `s`, `zoom`, `grade`, `print`, `vs`,
    /// then extras by key. No leading `?`. Off flags are omitted.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        let mut push = |key: &str, value: &str| {
            if !out.is_empty() {
                out.push('&');
            }
            percent_encode(key, &mut out);
            out.push('=');
            percent_encode(value, &mut out);
        };

        if let Some(s) = self.slide {
            push("s", &alloc::format!("{s}"));
        }
        if let Some(z) = self.zoom {
            push("zoom", &alloc::format!("{z}"));
        }
        if let Some(g) = self.grade {
            push("grade", g.as_str());
        }
        if self.print {
            push("print", "1");
        }
        if self.visual_snapshot {
            push("vs", "1");
        }
        for (k, v) in &self.extras {
            push(k.as_str(), v.as_str());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse;

    #[test]
    fn slide_index_clamps() {
        let q = DeckQuery::new().with_slide(99);
        assert_eq!(q.slide_index(12), 11);
        let q = DeckQuery {
            slide: Some(-3),
            ..DeckQuery::new()
        };
        assert_eq!(q.slide_index(12), 0);
        assert_eq!(DeckQuery::new().slide_index(12), 0);
        assert_eq!(DeckQuery::new().with_slide(4).slide_index(0), 0);
    }

    #[test]
    fn zoom_clamps_or_defaults() {
        let settings = DeckSettings::default();
        assert_eq!(parse("zoom=5").query.zoom(&settings), 1.0);
        assert_eq!(parse("zoom=0.8").query.zoom(&settings), 0.8);

        let result = parse("zoom=wide");
        assert_eq!(result.query.zoom(&settings), 0.92);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn apply_sets_deck_state() {
        let mut deck = Deck::new(DeckSettings::default(), 5);
        parse("s=3&grade=soft&vs=1").query.apply(&mut deck);
        assert_eq!(deck.navigator.index(), 3);
        assert_eq!(deck.grade, Grade::Soft);
        assert!(deck.view.visual_snapshot);
        assert!(!deck.view.print);
    }

    #[test]
    fn canonical_serialization() {
        let q = parse("vs=1&theme=dark&grade=soft&s=2&zoom=0.9").query;
        assert_eq!(q.to_query_string(), "s=2&zoom=0.9&grade=soft&vs=1&theme=dark");
    }

    #[test]
    fn from_deck_round_trips() {
        let mut deck = Deck::new(DeckSettings::default(), 6);
        deck.navigator.go(4);
        deck.view.print = true;
        let s = DeckQuery::from_deck(&deck).to_query_string();
        assert_eq!(s, "s=4&print=1");

        let mut other = Deck::new(DeckSettings::default(), 6);
        parse(&s).query.apply(&mut other);
        assert_eq!(other.navigator, deck.navigator);
        assert_eq!(other.view.print, deck.view.print);
    }

    #[test]
    fn toggle_flags() {
        let mut q = DeckQuery::new();
        assert!(q.toggle_flag("print"));
        assert!(q.print);
        assert!(q.toggle_flag("print"));
        assert!(!q.print);
        assert!(!q.toggle_flag("zoom"));
    }

    #[test]
    fn extras_are_encoded() {
        let q = parse("note=a%20b").query;
        assert_eq!(q.to_query_string(), "note=a%20b");
    }
}
