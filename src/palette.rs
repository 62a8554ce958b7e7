//! Command palette model: a searchable list of deck actions.
//!
//! Holds open/closed state and the search text; the host draws the list
//! returned by [`CommandPalette::matches`] and reports which action ran.
//!
//! ```
//! use deckstage::deck::DeckCommand;
//! use deckstage::palette::CommandPalette;
//! use deckstage::registry::{SlideMeta, SlideRegistry};
//!
//! let mut slides = SlideRegistry::<()>::new();
//! slides.register(SlideMeta::new("cover", "Cover"), |_| ()).unwrap();
//! slides.register(SlideMeta::new("kpis", "KPIs").tag("kpi"), |_| ()).unwrap();
//!
//! let mut palette = CommandPalette::from_registry(&slides);
//! palette.toggle();
//! palette.set_query("kpi");
//! let first = palette.matches().next().unwrap();
//! assert_eq!(first.command, DeckCommand::GoTo(1));
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use alloc::{format, vec};

use crate::deck::DeckCommand;
use crate::registry::SlideRegistry;

/// One runnable palette entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteAction {
    /// Stable identifier, used by [`CommandPalette::run`].
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    /// Extra search terms.
    pub keywords: Vec<String>,
    pub command: DeckCommand,
}

impl PaletteAction {
    /// Create an action with no subtitle or keywords.
    pub fn new(id: impl Into<String>, title: impl Into<String>, command: DeckCommand) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            keywords: Vec::new(),
            command,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Match rank for a lowercased needle; lower is better, `None` is no
    /// match.
    fn rank(&self, needle: &str) -> Option<u8> {
        if needle.is_empty() {
            return Some(0);
        }
        let title = self.title.to_lowercase();
        if title.starts_with(needle) {
            return Some(0);
        }
        if title.contains(needle) {
            return Some(1);
        }
        let in_subtitle = self
            .subtitle
            .as_ref()
            .is_some_and(|s| s.to_lowercase().contains(needle));
        let in_keywords = self
            .keywords
            .iter()
            .any(|k| k.to_lowercase().contains(needle));
        (in_subtitle || in_keywords).then_some(2)
    }
}

/// Palette state: action list, visibility and search text.
#[derive(Clone, Debug, Default)]
pub struct CommandPalette {
    actions: Vec<PaletteAction>,
    open: bool,
    query: String,
}

impl CommandPalette {
    /// Palette over an explicit action list.
    pub fn new(actions: Vec<PaletteAction>) -> Self {
        Self {
            actions,
            open: false,
            query: String::new(),
        }
    }

    /// Standard deck actions: go to deck start, one entry per slide, prev
    /// and next.
    pub fn from_registry<R>(slides: &SlideRegistry<R>) -> Self {
        let mut actions = vec![
            PaletteAction::new("go_deck", "Go to deck", DeckCommand::First)
                .subtitle("First slide")
                .keyword("deck")
                .keyword("home"),
        ];
        for (i, meta) in slides.iter().enumerate() {
            let mut action = PaletteAction::new(
                format!("slide:{}", meta.id),
                format!("Open {}", meta.title),
                DeckCommand::GoTo(i),
            )
            .subtitle(meta.id.clone())
            .keyword("slide")
            .keyword(format!("{i:02}"));
            action.keywords.extend(meta.tags.iter().cloned());
            actions.push(action);
        }
        actions.push(
            PaletteAction::new("prev", "Previous", DeckCommand::Prev)
                .subtitle("Previous slide")
                .keyword("prev")
                .keyword("back"),
        );
        actions.push(
            PaletteAction::new("next", "Next", DeckCommand::Next)
                .subtitle("Next slide")
                .keyword("next")
                .keyword("forward"),
        );
        Self::new(actions)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn actions(&self) -> &[PaletteAction] {
        &self.actions
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open = true;
        }
    }

    /// Close and clear the search text.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Actions matching the search text, best first. Ties keep list order.
    pub fn matches(&self) -> impl Iterator<Item = &PaletteAction> {
        let needle = self.query.trim().to_lowercase();
        let mut ranked: Vec<(u8, &PaletteAction)> = self
            .actions
            .iter()
            .filter_map(|a| a.rank(&needle).map(|r| (r, a)))
            .collect();
        ranked.sort_by_key(|(r, _)| *r);
        ranked.into_iter().map(|(_, a)| a)
    }

    /// Run the action with `id`: close the palette and return its command.
    pub fn run(&mut self, id: &str) -> Option<DeckCommand> {
        let command = self.actions.iter().find(|a| a.id == id)?.command;
        self.close();
        Some(command)
    }

    /// Apply palette-related deck commands. Returns whether state changed.
    pub fn handle(&mut self, command: DeckCommand) -> bool {
        match command {
            DeckCommand::TogglePalette => {
                self.toggle();
                true
            }
            DeckCommand::ClosePalette if self.open => {
                self.close();
                true
            }
            _ => false,
        }
    }
}
