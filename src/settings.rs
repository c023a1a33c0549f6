//! Persisted UI settings: theme, language, section states, and flags.
//!
//! DESIGN
//! ======
//! Each entity is an independent key under the store namespace and is written
//! by exactly one controller. Theme and language are stored as plain JSON
//! strings rather than tagged enums so a value the current build does not know
//! reads back as "absent" instead of failing the whole decode.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Active theme id (JSON string).
pub const THEME_KEY: &str = "theme";
/// Present once the user picked a theme explicitly (JSON `true`).
pub const THEME_MANUAL_KEY: &str = "theme-manual";
/// Active language code (JSON string).
pub const LANGUAGE_KEY: &str = "lang";
/// Section id to open flag (JSON object).
pub const SECTIONS_STATE_KEY: &str = "sections-state";
/// Present once the onboarding tip has been shown (JSON `true`).
pub const TIP_SHOWN_KEY: &str = "tips-shown";

/// Visual theme, in cycling order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Malachite,
    Tech,
    Cozy,
    Art,
    Luxury,
}

impl Theme {
    pub const ALL: [Theme; 5] = [Self::Malachite, Self::Tech, Self::Cozy, Self::Art, Self::Luxury];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Malachite => "malachite",
            Self::Tech => "tech",
            Self::Cozy => "cozy",
            Self::Art => "art",
            Self::Luxury => "luxury",
        }
    }

    /// Marker class applied to the page for this theme.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Malachite => "theme-malachite",
            Self::Tech => "theme-tech",
            Self::Cozy => "theme-cozy",
            Self::Art => "theme-art",
            Self::Luxury => "theme-luxury",
        }
    }

    /// Human-readable name for the startup banner.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Malachite => "Malachite turquoise",
            Self::Tech => "Tech premium",
            Self::Cozy => "Cozy minimalism",
            Self::Art => "Contrast art palette",
            Self::Luxury => "Gold and silver",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.id() == raw)
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|theme| *theme == self).unwrap_or_default()
    }

    /// The following theme, wrapping after the last one.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One of the two supported page languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Self::Ru, Self::En];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == raw)
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Ru => Self::En,
            Self::En => Self::Ru,
        }
    }

    /// Toggle button text while this language is active (names the target).
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Ru => "EN",
            Self::En => "RU",
        }
    }

    /// Accessible label for the toggle while this language is active.
    #[must_use]
    pub fn toggle_aria_label(self) -> &'static str {
        match self {
            Self::Ru => "Switch to English",
            Self::En => "Переключить на русский",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Open/closed flag per section id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionStates(BTreeMap<String, bool>);

impl SectionStates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored flag, `None` when the section has never been recorded.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<bool> {
        self.0.get(id).copied()
    }

    #[must_use]
    pub fn is_open(&self, id: &str) -> bool {
        self.get(id).unwrap_or(false)
    }

    pub fn set(&mut self, id: &str, open: bool) {
        self.0.insert(id.to_owned(), open);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(id, open)| (id.as_str(), *open))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for SectionStates {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, open)| (id.into(), open)).collect())
    }
}
