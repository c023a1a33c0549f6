//! Keyboard shortcuts and the one-time onboarding tip.
//!
//! Every shortcut needs Ctrl or Cmd held:
//!
//! | Keys | Action |
//! |------|--------|
//! | Mod+P | open all sections, then print |
//! | Mod+K | next theme (sets manual override) |
//! | Mod+O | open all sections |
//! | Mod+Shift+C | close all sections |
//!
//! Letters compare case-insensitively. Shift turns the chord into a
//! different shortcut, so Mod+Shift+P/K/O match nothing.

#[cfg(test)]
#[path = "shortcuts_test.rs"]
mod shortcuts_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::accordion::AccordionController;
use crate::config::SiteConfig;
use crate::platform::Scheduler;
use crate::settings::{Language, TIP_SHOWN_KEY};
use crate::store::Store;
use crate::theme::ThemeController;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Print,
    NextTheme,
    OpenAll,
    CloseAll,
}

impl Shortcut {
    pub const ALL: [Shortcut; 4] = [Self::NextTheme, Self::OpenAll, Self::CloseAll, Self::Print];

    #[must_use]
    pub fn keys(self) -> &'static str {
        match self {
            Self::Print => "Ctrl+P",
            Self::NextTheme => "Ctrl+K",
            Self::OpenAll => "Ctrl+O",
            Self::CloseAll => "Ctrl+Shift+C",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Print => "Print",
            Self::NextTheme => "Switch theme",
            Self::OpenAll => "Open all sections",
            Self::CloseAll => "Close all sections",
        }
    }
}

/// A key press with the modifier state that matters here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    /// `KeyboardEvent.key` as reported by the browser.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    /// Chord with Ctrl held.
    pub fn ctrl(key: impl Into<String>) -> Self {
        Self { key: key.into(), ctrl: true, ..Self::default() }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Map a chord to its shortcut, if any.
#[must_use]
pub fn resolve(chord: &KeyChord) -> Option<Shortcut> {
    if !(chord.ctrl || chord.meta) {
        return None;
    }
    let key = chord.key.to_ascii_lowercase();
    match (chord.shift, key.as_str()) {
        (true, "c") => Some(Shortcut::CloseAll),
        (false, "p") => Some(Shortcut::Print),
        (false, "k") => Some(Shortcut::NextTheme),
        (false, "o") => Some(Shortcut::OpenAll),
        _ => None,
    }
}

/// The platform print dialog.
pub trait PrintAction {
    fn print(&self);
}

/// Routes shortcuts to the theme and accordion controllers.
pub struct ShortcutDispatcher {
    theme: Rc<RefCell<ThemeController>>,
    accordion: Rc<RefCell<AccordionController>>,
    scheduler: Rc<dyn Scheduler>,
    printer: Rc<dyn PrintAction>,
    print_delay_ms: u32,
}

impl ShortcutDispatcher {
    pub fn new(
        theme: Rc<RefCell<ThemeController>>,
        accordion: Rc<RefCell<AccordionController>>,
        scheduler: Rc<dyn Scheduler>,
        printer: Rc<dyn PrintAction>,
        config: &SiteConfig,
    ) -> Self {
        Self { theme, accordion, scheduler, printer, print_delay_ms: config.animation_delay_ms }
    }

    /// Run the shortcut for `chord`. When this returns `Some`, the caller must
    /// suppress the browser's default handling of the key.
    pub fn handle(&self, chord: &KeyChord) -> Option<Shortcut> {
        let shortcut = resolve(chord)?;
        log::debug!("shortcuts: {}", shortcut.description());
        match shortcut {
            Shortcut::Print => self.print(),
            Shortcut::NextTheme => {
                self.theme.borrow_mut().next_theme();
            }
            Shortcut::OpenAll => self.accordion.borrow_mut().open_all(),
            Shortcut::CloseAll => self.accordion.borrow_mut().close_all(),
        }
        Some(shortcut)
    }

    // Expand everything first so the printout is complete.
    fn print(&self) {
        self.accordion.borrow_mut().open_all();
        let printer = Rc::clone(&self.printer);
        self.scheduler.schedule(self.print_delay_ms, Box::new(move || printer.print()));
    }
}

/// Tip text fragments for one language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TipText {
    pub heading: &'static str,
    pub use_word: &'static str,
    pub theme_hint: &'static str,
    pub open_hint: &'static str,
}

#[must_use]
pub fn tip_text(lang: Language) -> TipText {
    match lang {
        Language::Ru => TipText {
            heading: "💡 Подсказка:",
            use_word: "Используйте",
            theme_hint: "для смены темы,",
            open_hint: "для открытия всех секций",
        },
        Language::En => TipText {
            heading: "💡 Tip:",
            use_word: "Use",
            theme_hint: "to switch theme,",
            open_hint: "to open all sections",
        },
    }
}

/// Lifecycle of the on-screen tip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TipPhase {
    #[default]
    Hidden,
    Shown,
    /// Exit animation running; the tip is removed when it ends.
    Leaving,
}

impl TipPhase {
    /// Phase after a dismissal (timed or clicked). `None` unless the tip is
    /// fully shown, so a second dismissal never restarts the exit.
    #[must_use]
    pub fn dismissed(self) -> Option<Self> {
        match self {
            Self::Shown => Some(Self::Leaving),
            Self::Hidden | Self::Leaving => None,
        }
    }

    /// Phase once the exit animation ends.
    #[must_use]
    pub fn removed(self) -> Self {
        match self {
            Self::Leaving => Self::Hidden,
            other => other,
        }
    }
}

/// Shows and hides the onboarding tip.
pub trait TipView {
    fn show_tip(&self);
    /// Start the exit; the view removes the tip once its animation ends.
    fn hide_tip(&self);
}

/// Schedule the one-time tip unless it was already shown.
///
/// The tip appears after `tip_show_delay_ms`, the shown flag is written at
/// that moment, and the tip is dismissed `tip_duration_ms` later. Returns
/// whether the tip was scheduled.
pub fn schedule_onboarding_tip(
    store: &Store,
    scheduler: Rc<dyn Scheduler>,
    view: Rc<dyn TipView>,
    config: &SiteConfig,
) -> bool {
    if store.has(TIP_SHOWN_KEY) {
        return false;
    }
    let store = store.clone();
    let duration_ms = config.tip_duration_ms;
    let inner = Rc::clone(&scheduler);
    scheduler.schedule(
        config.tip_show_delay_ms,
        Box::new(move || {
            view.show_tip();
            store.set(TIP_SHOWN_KEY, &true);
            inner.schedule(duration_ms, Box::new(move || view.hide_tip()));
        }),
    );
    true
}
