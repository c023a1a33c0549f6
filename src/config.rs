//! Page configuration.
//!
//! Every field has a default matching the published page, so an empty JSON
//! object is a valid configuration. The browser entry point reads overrides
//! from an optional `<script type="application/json" id="cv-config">` element.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::{Language, Theme};

pub const DEFAULT_STORAGE_PREFIX: &str = "cv";
pub const DEFAULT_OPEN_SECTIONS: usize = 2;
pub const DEFAULT_SCROLL_THROTTLE_MS: u32 = 16;
pub const DEFAULT_ANIMATION_DELAY_MS: u32 = 100;
pub const DEFAULT_BADGE_STAGGER_MS: u32 = 100;
pub const DEFAULT_TIP_SHOW_DELAY_MS: u32 = 2000;
pub const DEFAULT_TIP_DURATION_MS: u32 = 5000;
pub const DEFAULT_TIP_EXIT_MS: u32 = 500;
pub const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Theme used when nothing is stored and for a light system scheme.
    pub default_theme: Theme,
    /// Theme chosen automatically for a dark system scheme.
    pub dark_theme: Theme,
    pub default_language: Language,
    /// Namespace prepended to every storage key as `{prefix}-{key}`.
    pub storage_prefix: String,
    /// How many leading sections start open on a first visit.
    pub default_open_sections: usize,
    pub scroll_throttle_ms: u32,
    /// Delay before scroll-after-open and print-after-expand.
    pub animation_delay_ms: u32,
    pub badge_stagger_ms: u32,
    pub tip_show_delay_ms: u32,
    pub tip_duration_ms: u32,
    pub tip_exit_ms: u32,
    pub back_to_top_threshold_px: f64,
    pub parallax: ParallaxConfig,
    pub reveal: RevealConfig,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::Malachite,
            dark_theme: Theme::Tech,
            default_language: Language::Ru,
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_owned(),
            default_open_sections: DEFAULT_OPEN_SECTIONS,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            animation_delay_ms: DEFAULT_ANIMATION_DELAY_MS,
            badge_stagger_ms: DEFAULT_BADGE_STAGGER_MS,
            tip_show_delay_ms: DEFAULT_TIP_SHOW_DELAY_MS,
            tip_duration_ms: DEFAULT_TIP_DURATION_MS,
            tip_exit_ms: DEFAULT_TIP_EXIT_MS,
            back_to_top_threshold_px: DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            parallax: ParallaxConfig::default(),
            reveal: RevealConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

/// Header parallax while the page is near the top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Parallax stops updating past this scroll offset.
    pub threshold_px: f64,
    /// Header translation per scrolled pixel.
    pub rate: f64,
    /// Scroll distance over which the header fades to transparent.
    pub fade_distance_px: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { threshold_px: 300.0, rate: 0.3, fade_distance_px: 500.0 }
    }
}

/// `IntersectionObserver` options for section reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.1, root_margin: "0px 0px -50px 0px".to_owned() }
    }
}

impl SiteConfig {
    /// Parse overrides from JSON and validate the result.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_prefix must not be empty".into()));
        }
        if log::Level::from_str(&self.log_level).is_err() {
            return Err(ConfigError::Invalid(format!("unknown log_level `{}`", self.log_level)));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid(format!(
                "reveal.threshold must be within 0..=1, got {}",
                self.reveal.threshold
            )));
        }
        if self.parallax.fade_distance_px <= 0.0 {
            return Err(ConfigError::Invalid("parallax.fade_distance_px must be positive".into()));
        }
        Ok(())
    }

    /// Configured log level, `Info` if the string does not parse.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}
