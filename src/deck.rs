//! Deck state: settings, slide navigation, key bindings and view toggles.
//!
//! [`DeckSettings`] is the one configuration object for a deck. Build it
//! once at startup and pass it by reference; nothing in the crate holds
//! ambient global state.
//!
//! # Example
//!
//! ```
//! use deckstage::deck::{Deck, DeckSettings, KeyPress, command_for_key};
//!
//! let mut deck = Deck::new(DeckSettings::default(), 8);
//! let cmd = command_for_key(&KeyPress::new("ArrowRight")).unwrap();
//! deck.dispatch(cmd);
//! assert_eq!(deck.navigator.index(), 1);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scale::{StageConfig, StageMode};

/// Deck-wide configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeckSettings {
    /// Native slide width in pixels.
    pub width: f64,
    /// Native slide height in pixels.
    pub height: f64,
    /// Stage fit mode.
    pub mode: StageMode,
    /// Underscan applied when no zoom is requested.
    pub default_zoom: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
            mode: StageMode::Fit,
            default_zoom: 0.92,
            zoom_min: 0.75,
            zoom_max: 1.0,
        }
    }
}

impl DeckSettings {
    /// Check slide size and zoom range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zoom_ok = self.zoom_min.is_finite()
            && self.zoom_min > 0.0
            && self.zoom_min <= self.zoom_max
            && self.zoom_max <= 1.0
            && (self.zoom_min..=self.zoom_max).contains(&self.default_zoom);
        if !zoom_ok {
            return Err(ConfigError::InvalidZoomRange {
                min: self.zoom_min,
                max: self.zoom_max,
                default: self.default_zoom,
            });
        }
        self.stage_config(Some(self.default_zoom)).validate()
    }

    /// Resolve a requested zoom: clamp finite values into range, fall back
    /// to the default otherwise.
    pub fn clamp_zoom(&self, requested: Option<f64>) -> f64 {
        match requested {
            Some(z) if z.is_finite() => z.max(self.zoom_min).min(self.zoom_max),
            _ => self.default_zoom,
        }
    }

    /// Safe-fit stage for this deck with the resolved zoom as underscan.
    pub fn stage_config(&self, zoom: Option<f64>) -> StageConfig {
        StageConfig::safe_fit(self.width, self.height)
            .mode(self.mode)
            .safety(self.clamp_zoom(zoom))
    }
}

/// Current slide position, clamped to the deck.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Navigator {
    index: usize,
    total: usize,
}

impl Navigator {
    /// Start at the first of `total` slides.
    pub const fn new(total: usize) -> Self {
        Self { index: 0, total }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    /// Index of the last slide (0 for an empty deck).
    pub const fn last_index(&self) -> usize {
        self.total.saturating_sub(1)
    }

    /// Jump to `index`, clamped into the deck. Returns whether it moved.
    pub fn go(&mut self, index: usize) -> bool {
        let target = index.min(self.last_index());
        let moved = target != self.index;
        self.index = target;
        moved
    }

    /// Jump by a signed offset, clamped.
    pub fn step(&mut self, delta: isize) -> bool {
        let target = if delta < 0 {
            self.index.saturating_sub(delta.unsigned_abs())
        } else {
            self.index.saturating_add(delta as usize)
        };
        self.go(target)
    }

    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    pub fn prev(&mut self) -> bool {
        self.step(-1)
    }

    pub fn first(&mut self) -> bool {
        self.go(0)
    }

    pub fn last(&mut self) -> bool {
        self.go(self.last_index())
    }

    /// Whether "previous" would do nothing.
    pub const fn at_start(&self) -> bool {
        self.index == 0
    }

    /// Whether "next" would do nothing.
    pub const fn at_end(&self) -> bool {
        self.index >= self.last_index()
    }

    /// One-based position for display, e.g. `(3, 12)`.
    pub const fn position(&self) -> (usize, usize) {
        (self.index + 1, self.total)
    }
}

/// Something the user asked the deck to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeckCommand {
    Next,
    Prev,
    First,
    Last,
    /// Jump to a zero-based slide index (clamped).
    GoTo(usize),
    ToggleHud,
    ToggleNotes,
    TogglePresentation,
    /// Toggle the visual snapshot overlay (`vs` query flag).
    ToggleVisualSnapshot,
    /// Toggle print layout (`print` query flag).
    TogglePrint,
    TogglePalette,
    ClosePalette,
}

/// A key press as reported by the host.
///
/// `key` follows the DOM `KeyboardEvent.key` naming (`"ArrowRight"`, `" "`,
/// `"h"`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    /// Focus is in a text input, textarea, select or contenteditable.
    pub editable_target: bool,
}

impl<'a> KeyPress<'a> {
    /// Plain key press with no modifiers.
    pub const fn new(key: &'a str) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            editable_target: false,
        }
    }

    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub const fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub const fn in_editable(mut self) -> Self {
        self.editable_target = true;
        self
    }
}

/// Map a key press to a deck command.
///
/// Palette keys (Ctrl/Cmd+K, Escape) work everywhere; everything else is
/// ignored while the user is typing.
pub fn command_for_key(press: &KeyPress<'_>) -> Option<DeckCommand> {
    let key = press.key;
    if (press.ctrl || press.meta) && key.eq_ignore_ascii_case("k") {
        return Some(DeckCommand::TogglePalette);
    }
    if key == "Escape" {
        return Some(DeckCommand::ClosePalette);
    }
    if press.editable_target || press.ctrl || press.meta {
        return None;
    }

    let cmd = match key {
        "ArrowRight" | "PageDown" | " " | "Spacebar" => DeckCommand::Next,
        "ArrowLeft" | "PageUp" => DeckCommand::Prev,
        "Home" => DeckCommand::First,
        "End" => DeckCommand::Last,
        k if k.eq_ignore_ascii_case("h") => DeckCommand::ToggleHud,
        k if k.eq_ignore_ascii_case("n") => DeckCommand::ToggleNotes,
        k if k.eq_ignore_ascii_case("p") => DeckCommand::TogglePresentation,
        k if k.eq_ignore_ascii_case("v") => DeckCommand::ToggleVisualSnapshot,
        k if k.eq_ignore_ascii_case("t") => DeckCommand::TogglePrint,
        _ => return None,
    };
    Some(cmd)
}

/// Colour grade of the backdrop behind the stage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Grade {
    #[default]
    Contrast,
    Soft,
}

impl Grade {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contrast => "contrast",
            Self::Soft => "soft",
        }
    }
}

/// Overlay and layout toggles around the stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewState {
    pub hud_open: bool,
    pub notes_open: bool,
    pub presentation: bool,
    pub print: bool,
    pub visual_snapshot: bool,
    pub palette_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            hud_open: true,
            notes_open: false,
            presentation: false,
            print: false,
            visual_snapshot: false,
            palette_open: false,
        }
    }
}

impl ViewState {
    /// Chrome is hidden while presenting or printing.
    pub const fn chrome_hidden(&self) -> bool {
        self.presentation || self.print
    }

    pub const fn hud_visible(&self) -> bool {
        self.hud_open && !self.chrome_hidden()
    }

    pub const fn notes_visible(&self) -> bool {
        self.notes_open && !self.chrome_hidden()
    }
}

/// A deck: settings, position and view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Deck {
    pub settings: DeckSettings,
    pub navigator: Navigator,
    pub view: ViewState,
    pub grade: Grade,
    /// Requested zoom, resolved through [`DeckSettings::clamp_zoom`].
    pub zoom: Option<f64>,
}

impl Deck {
    /// A deck of `total` slides at the first slide with default view.
    pub fn new(settings: DeckSettings, total: usize) -> Self {
        Self {
            settings,
            navigator: Navigator::new(total),
            view: ViewState::default(),
            grade: Grade::default(),
            zoom: None,
        }
    }

    /// Apply a command. Returns whether any state changed.
    pub fn dispatch(&mut self, cmd: DeckCommand) -> bool {
        let changed = match cmd {
            DeckCommand::Next => self.navigator.next(),
            DeckCommand::Prev => self.navigator.prev(),
            DeckCommand::First => self.navigator.first(),
            DeckCommand::Last => self.navigator.last(),
            DeckCommand::GoTo(i) => self.navigator.go(i),
            DeckCommand::ToggleHud => toggle(&mut self.view.hud_open),
            DeckCommand::ToggleNotes => toggle(&mut self.view.notes_open),
            DeckCommand::TogglePresentation => toggle(&mut self.view.presentation),
            DeckCommand::ToggleVisualSnapshot => toggle(&mut self.view.visual_snapshot),
            DeckCommand::TogglePrint => toggle(&mut self.view.print),
            DeckCommand::TogglePalette => toggle(&mut self.view.palette_open),
            DeckCommand::ClosePalette => core::mem::replace(&mut self.view.palette_open, false),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(?cmd, changed, index = self.navigator.index(), "deck dispatch");

        changed
    }

    /// Handle a key press end to end.
    pub fn handle_key(&mut self, press: &KeyPress<'_>) -> Option<DeckCommand> {
        let cmd = command_for_key(press)?;
        self.dispatch(cmd);
        Some(cmd)
    }

    /// Stage configuration for the current zoom.
    pub fn stage_config(&self) -> StageConfig {
        self.settings.stage_config(self.zoom)
    }
}

fn toggle(flag: &mut bool) -> bool {
    *flag = !*flag;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── navigator ───────────────────────────────────────────────────────

    #[test]
    fn navigator_clamps_both_ends() {
        let mut nav = Navigator::new(3);
        assert!(nav.at_start());
        assert!(!nav.prev());
        assert!(nav.next());
        assert!(nav.next());
        assert!(!nav.next());
        assert!(nav.at_end());
        assert_eq!(nav.index(), 2);
        assert!(nav.go(0));
        assert!(nav.go(99));
        assert_eq!(nav.index(), 2);
        assert_eq!(nav.position(), (3, 3));
    }

    #[test]
    fn empty_deck_stays_at_zero() {
        let mut nav = Navigator::new(0);
        assert!(!nav.next());
        assert!(!nav.last());
        assert_eq!(nav.index(), 0);
        assert!(nav.at_start() && nav.at_end());
    }

    #[test]
    fn step_saturates() {
        let mut nav = Navigator::new(5);
        nav.step(isize::MIN);
        assert_eq!(nav.index(), 0);
        nav.step(isize::MAX);
        assert_eq!(nav.index(), 4);
    }

    // ── key bindings ────────────────────────────────────────────────────

    #[test]
    fn navigation_keys() {
        for (key, cmd) in [
            ("ArrowRight", DeckCommand::Next),
            ("PageDown", DeckCommand::Next),
            (" ", DeckCommand::Next),
            ("ArrowLeft", DeckCommand::Prev),
            ("PageUp", DeckCommand::Prev),
            ("Home", DeckCommand::First),
            ("End", DeckCommand::Last),
        ] {
            assert_eq!(command_for_key(&KeyPress::new(key)), Some(cmd), "{key:?}");
        }
    }

    #[test]
    fn toggle_keys_are_case_insensitive() {
        assert_eq!(
            command_for_key(&KeyPress::new("H")),
            Some(DeckCommand::ToggleHud)
        );
        assert_eq!(
            command_for_key(&KeyPress::new("n")),
            Some(DeckCommand::ToggleNotes)
        );
        assert_eq!(
            command_for_key(&KeyPress::new("P")),
            Some(DeckCommand::TogglePresentation)
        );
        assert_eq!(
            command_for_key(&KeyPress::new("v")),
            Some(DeckCommand::ToggleVisualSnapshot)
        );
        assert_eq!(
            command_for_key(&KeyPress::new("t")),
            Some(DeckCommand::TogglePrint)
        );
        assert_eq!(command_for_key(&KeyPress::new("x")), None);
    }

    #[test]
    fn typing_suppresses_deck_keys_but_not_palette() {
        assert_eq!(
            command_for_key(&KeyPress::new("ArrowRight").in_editable()),
            None
        );
        assert_eq!(
            command_for_key(&KeyPress::new("k").with_ctrl().in_editable()),
            Some(DeckCommand::TogglePalette)
        );
        assert_eq!(
            command_for_key(&KeyPress::new("K").with_meta()),
            Some(DeckCommand::TogglePalette)
        );
        assert_eq!(
            command_for_key(&KeyPress::new("Escape").in_editable()),
            Some(DeckCommand::ClosePalette)
        );
    }

    #[test]
    fn modified_letters_do_not_toggle() {
        assert_eq!(command_for_key(&KeyPress::new("h").with_ctrl()), None);
    }

    // ── view / deck ─────────────────────────────────────────────────────

    #[test]
    fn presentation_hides_hud_and_notes() {
        let mut deck = Deck::new(DeckSettings::default(), 4);
        deck.dispatch(DeckCommand::ToggleNotes);
        assert!(deck.view.hud_visible());
        assert!(deck.view.notes_visible());

        deck.dispatch(DeckCommand::TogglePresentation);
        assert!(!deck.view.hud_visible());
        assert!(!deck.view.notes_visible());
        assert!(deck.view.hud_open);

        deck.dispatch(DeckCommand::TogglePresentation);
        deck.dispatch(DeckCommand::TogglePrint);
        assert!(!deck.view.hud_visible());
    }

    #[test]
    fn close_palette_reports_change_only_when_open() {
        let mut deck = Deck::new(DeckSettings::default(), 4);
        assert!(!deck.dispatch(DeckCommand::ClosePalette));
        assert!(deck.dispatch(DeckCommand::TogglePalette));
        assert!(deck.dispatch(DeckCommand::ClosePalette));
        assert!(!deck.view.palette_open);
    }

    #[test]
    fn handle_key_moves_and_reports() {
        let mut deck = Deck::new(DeckSettings::default(), 4);
        assert_eq!(deck.handle_key(&KeyPress::new("End")), Some(DeckCommand::Last));
        assert_eq!(deck.navigator.index(), 3);
        assert_eq!(deck.handle_key(&KeyPress::new("q")), None);
    }

    // ── settings ────────────────────────────────────────────────────────

    #[test]
    fn zoom_clamps_and_defaults() {
        let s = DeckSettings::default();
        assert_eq!(s.clamp_zoom(None), 0.92);
        assert_eq!(s.clamp_zoom(Some(5.0)), 1.0);
        assert_eq!(s.clamp_zoom(Some(0.1)), 0.75);
        assert_eq!(s.clamp_zoom(Some(f64::NAN)), 0.92);
        assert_eq!(s.clamp_zoom(Some(0.8)), 0.8);
    }

    #[test]
    fn settings_stage_config_uses_zoom_as_safety() {
        let s = DeckSettings::default();
        let cfg = s.stage_config(Some(0.8));
        assert_eq!(cfg.safety, 0.8);
        assert_eq!(cfg.content.width, 1600.0);
        assert_eq!(cfg.anchor, crate::stage::Anchor::Center);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn settings_validation() {
        let bad_range = DeckSettings {
            zoom_min: 0.9,
            zoom_max: 0.8,
            ..DeckSettings::default()
        };
        assert!(matches!(
            bad_range.validate(),
            Err(ConfigError::InvalidZoomRange { .. })
        ));

        let bad_size = DeckSettings {
            width: 0.0,
            ..DeckSettings::default()
        };
        assert!(matches!(
            bad_size.validate(),
            Err(ConfigError::InvalidContentSize { .. })
        ));
    }
}
