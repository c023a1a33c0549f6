//! Display-only scroll effects: progress bar, header parallax, back-to-top,
//! and staggered reveal. Nothing here is persisted.
//!
//! The math lives here so it can be tested; `crate::browser` feeds it scroll
//! metrics and writes the results to the page.

#[cfg(test)]
#[path = "effects_test.rs"]
mod effects_test;

use crate::config::ParallaxConfig;

/// Time-window throttle: at most one run per `interval_ms`.
///
/// The first call always runs. Calls inside the window are dropped, not
/// deferred.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl Throttle {
    #[must_use]
    pub fn new(interval_ms: u32) -> Self {
        Self { interval_ms: f64::from(interval_ms), last_ms: None }
    }

    /// Whether a call at `now_ms` may run; records it if so.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_ms {
            if now_ms - last < self.interval_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }
}

/// How far down the page the viewport is, as a width percentage.
#[must_use]
pub fn scroll_progress_percent(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let range = scroll_height - client_height;
    if range <= 0.0 {
        return 0.0;
    }
    (scroll_y / range * 100.0).clamp(0.0, 100.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxFrame {
    pub translate_y_px: f64,
    pub opacity: f64,
}

/// Header transform for `scroll_y`; `None` past the threshold, where the
/// header keeps its last frame.
#[must_use]
pub fn parallax(scroll_y: f64, config: &ParallaxConfig) -> Option<ParallaxFrame> {
    if scroll_y >= config.threshold_px {
        return None;
    }
    let scrolled = scroll_y.max(0.0);
    Some(ParallaxFrame {
        translate_y_px: scrolled * config.rate,
        opacity: (1.0 - scrolled / config.fade_distance_px).clamp(0.0, 1.0),
    })
}

#[must_use]
pub fn back_to_top_visible(scroll_y: f64, threshold_px: f64) -> bool {
    scroll_y > threshold_px
}

/// Stagger delay for the `index`-th badge in an intersection batch.
#[must_use]
pub fn badge_delay_ms(index: usize, stagger_ms: u32) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(stagger_ms)
}

/// One-shot gate for the badge animation.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevealLatch {
    fired: bool,
}

impl RevealLatch {
    /// Whether this batch may animate: true only for the first batch with any
    /// intersecting entry.
    pub fn admit(&mut self, any_intersecting: bool) -> bool {
        if self.fired || !any_intersecting {
            return false;
        }
        self.fired = true;
        true
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Element id targeted by an in-page anchor `href` (`#about` -> `about`).
#[must_use]
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
