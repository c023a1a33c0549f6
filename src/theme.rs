//! Theme selection and system color-scheme reconciliation.
//!
//! DESIGN
//! ======
//! The controller owns the active [`Theme`] and writes it through the store;
//! all class juggling on the page happens behind [`ThemeView`].
//!
//! Startup resolution, in order:
//! 1. a stored theme;
//! 2. with no manual-override flag, the system scheme (dark maps to the
//!    configured dark theme, light to the default);
//! 3. the configured default.
//!
//! Any explicit selection sets the manual-override flag, after which system
//! scheme changes are ignored. There is no way back to automatic mode.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::rc::Rc;

use crate::config::SiteConfig;
use crate::settings::{THEME_KEY, THEME_MANUAL_KEY, Theme};
use crate::store::Store;

/// Renders the active theme onto the page.
pub trait ThemeView {
    /// Swap the page marker class to `theme` and sync the selector controls'
    /// active/pressed state.
    fn render_theme(&self, theme: Theme);
}

pub struct ThemeController {
    store: Store,
    view: Rc<dyn ThemeView>,
    current: Theme,
    default_theme: Theme,
    dark_theme: Theme,
}

impl ThemeController {
    /// Resolve the startup theme and apply it.
    pub fn init(store: Store, view: Rc<dyn ThemeView>, config: &SiteConfig, prefers_dark: bool) -> Self {
        let mut controller = Self {
            store,
            view,
            current: config.default_theme,
            default_theme: config.default_theme,
            dark_theme: config.dark_theme,
        };
        let initial = controller.resolve_initial(prefers_dark);
        log::debug!("theme: startup theme `{initial}`");
        controller.apply(initial);
        controller
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Whether the user has explicitly chosen a theme.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.store.has(THEME_MANUAL_KEY)
    }

    #[must_use]
    pub fn resolve_initial(&self, prefers_dark: bool) -> Theme {
        if let Some(theme) = self.stored_theme() {
            return theme;
        }
        if !self.is_manual() {
            return self.theme_for_scheme(prefers_dark);
        }
        self.default_theme
    }

    /// Apply a theme by id. Unknown ids fall back to the default theme.
    pub fn apply_theme(&mut self, id: &str) -> Theme {
        let theme = Theme::parse(id).unwrap_or_else(|| {
            log::warn!("theme: invalid theme `{id}`, using `{}`", self.default_theme);
            self.default_theme
        });
        self.apply(theme);
        theme
    }

    pub fn apply(&mut self, theme: Theme) {
        self.view.render_theme(theme);
        self.current = theme;
        self.store.set(THEME_KEY, theme.id());
    }

    /// Explicit user choice (selector click): apply and mark manual override.
    pub fn select(&mut self, id: &str) -> Theme {
        let theme = self.apply_theme(id);
        self.mark_manual();
        theme
    }

    /// Advance to the next theme in cycling order and mark manual override.
    pub fn next_theme(&mut self) -> Theme {
        let next = self.current.next();
        self.apply(next);
        self.mark_manual();
        next
    }

    /// React to a system dark/light change. Returns whether a theme was applied.
    pub fn on_system_scheme_change(&mut self, prefers_dark: bool) -> bool {
        if self.is_manual() {
            log::debug!("theme: manual override set, ignoring system scheme change");
            return false;
        }
        self.apply(self.theme_for_scheme(prefers_dark));
        true
    }

    fn theme_for_scheme(&self, prefers_dark: bool) -> Theme {
        if prefers_dark { self.dark_theme } else { self.default_theme }
    }

    // A stored id outside the theme set resolves to the default theme; only a
    // missing or undecodable entry counts as absent.
    fn stored_theme(&self) -> Option<Theme> {
        let raw: Option<String> = self.store.get(THEME_KEY, None);
        let raw = raw?;
        Some(Theme::parse(&raw).unwrap_or_else(|| {
            log::warn!("theme: invalid stored theme `{raw}`, using `{}`", self.default_theme);
            self.default_theme
        }))
    }

    fn mark_manual(&self) {
        self.store.set(THEME_MANUAL_KEY, &true);
    }
}
