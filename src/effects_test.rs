use super::*;

// =============================================================
// Throttle
// =============================================================

#[test]
fn throttle_first_call_runs() {
    let mut throttle = Throttle::new(16);
    assert!(throttle.ready(0.0));
}

#[test]
fn throttle_drops_calls_inside_window() {
    let mut throttle = Throttle::new(16);
    assert!(throttle.ready(1_000.0));
    assert!(!throttle.ready(1_005.0));
    assert!(!throttle.ready(1_015.9));
    assert!(throttle.ready(1_016.0));
    assert!(!throttle.ready(1_020.0));
}

// =============================================================
// Scroll progress
// =============================================================

#[test]
fn progress_spans_zero_to_hundred() {
    assert!((scroll_progress_percent(0.0, 3_000.0, 1_000.0)).abs() < f64::EPSILON);
    assert!((scroll_progress_percent(1_000.0, 3_000.0, 1_000.0) - 50.0).abs() < 1e-9);
    assert!((scroll_progress_percent(2_000.0, 3_000.0, 1_000.0) - 100.0).abs() < 1e-9);
}

#[test]
fn progress_is_zero_for_unscrollable_page() {
    assert!(scroll_progress_percent(0.0, 800.0, 800.0).abs() < f64::EPSILON);
    assert!(scroll_progress_percent(10.0, 500.0, 800.0).abs() < f64::EPSILON);
}

#[test]
fn progress_clamps_overscroll() {
    assert!((scroll_progress_percent(2_500.0, 3_000.0, 1_000.0) - 100.0).abs() < 1e-9);
    assert!(scroll_progress_percent(-40.0, 3_000.0, 1_000.0).abs() < f64::EPSILON);
}

// =============================================================
// Parallax
// =============================================================

#[test]
fn parallax_moves_and_fades_near_top() {
    let config = ParallaxConfig::default();
    let frame = parallax(100.0, &config).unwrap();
    assert!((frame.translate_y_px - 30.0).abs() < 1e-9);
    assert!((frame.opacity - 0.8).abs() < 1e-9);
}

#[test]
fn parallax_stops_past_threshold() {
    let config = ParallaxConfig::default();
    assert_eq!(parallax(300.0, &config), None);
    assert_eq!(parallax(1_200.0, &config), None);
}

#[test]
fn parallax_at_top_is_identity() {
    let frame = parallax(0.0, &ParallaxConfig::default()).unwrap();
    assert!(frame.translate_y_px.abs() < f64::EPSILON);
    assert!((frame.opacity - 1.0).abs() < f64::EPSILON);
}

// =============================================================
// Back-to-top, badges, anchors
// =============================================================

#[test]
fn back_to_top_appears_past_threshold() {
    assert!(!back_to_top_visible(300.0, 300.0));
    assert!(back_to_top_visible(300.5, 300.0));
}

#[test]
fn badge_delays_are_staggered() {
    assert_eq!(badge_delay_ms(0, 100), 0);
    assert_eq!(badge_delay_ms(3, 100), 300);
    assert_eq!(badge_delay_ms(usize::MAX, 100), u32::MAX);
}

#[test]
fn reveal_latch_fires_once() {
    let mut latch = RevealLatch::default();
    assert!(!latch.admit(false));
    assert!(!latch.has_fired());
    assert!(latch.admit(true));
    assert!(latch.has_fired());
    assert!(!latch.admit(true));
}

#[test]
fn anchor_ids() {
    assert_eq!(anchor_target_id("#about"), Some("about"));
    assert_eq!(anchor_target_id("#"), None);
    assert_eq!(anchor_target_id("about"), None);
}
