//! Scroll, intersection, and hover listeners for the display-only effects.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::Set;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollLogicalPosition, Window,
};

use super::dom::{listen, query_all, set_style, smooth_scroll_into_view};
use super::widgets::WidgetSignals;
use crate::config::{RevealConfig, SiteConfig};
use crate::effects::{
    RevealLatch, Throttle, anchor_target_id, back_to_top_visible, badge_delay_ms, parallax,
    scroll_progress_percent,
};
use crate::platform::Scheduler;

const SECTION_SELECTOR: &str = ".cv-section";
const BADGE_SELECTOR: &str = ".skill-badge";
const TECH_TAG_SELECTOR: &str = ".tech-tags span";
const HEADER_SELECTOR: &str = ".cv-header";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

const BADGE_ANIMATION: &str = "slideUp 0.6s ease-out forwards";
const TAG_HOVER: &str = "translateY(-4px) scale(1.08)";
const TAG_REST: &str = "translateY(0) scale(1)";

pub fn install(window: &Window, document: &Document, signals: WidgetSignals, scheduler: &Rc<dyn Scheduler>, config: &SiteConfig) {
    install_scroll(window, document, signals, config);
    install_section_reveal(document, &config.reveal);
    install_badge_reveal(document, Rc::clone(scheduler), config);
    install_tag_hover(document);
    install_anchor_scroll(document);
}

/// One throttled scroll listener drives the progress bar, the back-to-top
/// button, and the header parallax.
fn install_scroll(window: &Window, document: &Document, signals: WidgetSignals, config: &SiteConfig) {
    let header = match document.query_selector(HEADER_SELECTOR) {
        Ok(header) => header,
        Err(err) => {
            log::warn!("effects: header lookup failed: {err:?}");
            None
        }
    };
    let mut throttle = Throttle::new(config.scroll_throttle_ms);
    let parallax_config = config.parallax.clone();
    let back_to_top_px = config.back_to_top_threshold_px;
    let win = window.clone();
    let doc = document.clone();

    listen(window, "scroll", move |_| {
        if !throttle.ready(js_sys::Date::now()) {
            return;
        }
        let scroll_y = match win.scroll_y() {
            Ok(scroll_y) => scroll_y,
            Err(err) => {
                log::warn!("effects: scroll position unavailable: {err:?}");
                return;
            }
        };
        let (scroll_height, client_height) = doc
            .document_element()
            .map_or((0.0, 0.0), |root| (f64::from(root.scroll_height()), f64::from(root.client_height())));

        signals.progress.set(scroll_progress_percent(scroll_y, scroll_height, client_height));
        signals.back_to_top.set(back_to_top_visible(scroll_y, back_to_top_px));

        if let (Some(header), Some(frame)) = (&header, parallax(scroll_y, &parallax_config)) {
            set_style(header, "transform", &format!("translateY({}px)", frame.translate_y_px));
            set_style(header, "opacity", &frame.opacity.to_string());
        }
    });
}

/// Observe every element matching `selector`. The observer lives as long as
/// the page.
fn observe(
    document: &Document,
    selector: &str,
    init: &IntersectionObserverInit,
    mut on_batch: impl FnMut(Vec<IntersectionObserverEntry>) + 'static,
) {
    let targets = query_all(document, selector);
    if targets.is_empty() {
        log::debug!("effects: nothing matches `{selector}`");
        return;
    }
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            on_batch(entries.iter().map(JsCast::unchecked_into::<IntersectionObserverEntry>).collect());
        },
    );
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init) {
        Ok(observer) => {
            for target in &targets {
                observer.observe(target);
            }
        }
        Err(err) => log::warn!("effects: IntersectionObserver unavailable for `{selector}`: {err:?}"),
    }
    callback.forget();
}

fn observer_init(threshold: f64, root_margin: Option<&str>) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    init
}

fn install_section_reveal(document: &Document, reveal: &RevealConfig) {
    let init = observer_init(reveal.threshold, Some(&reveal.root_margin));
    observe(document, SECTION_SELECTOR, &init, |entries| {
        for entry in entries.iter().filter(|entry| entry.is_intersecting()) {
            let section = entry.target();
            set_style(&section, "opacity", "1");
            set_style(&section, "transform", "translateY(0)");
        }
    });
}

/// Badges animate once, staggered by their position in the first batch that
/// reports any of them visible.
fn install_badge_reveal(document: &Document, scheduler: Rc<dyn Scheduler>, config: &SiteConfig) {
    let init = observer_init(config.reveal.threshold, None);
    let stagger_ms = config.badge_stagger_ms;
    let latch = RefCell::new(RevealLatch::default());
    observe(document, BADGE_SELECTOR, &init, move |entries| {
        let any_visible = entries.iter().any(IntersectionObserverEntry::is_intersecting);
        if !latch.borrow_mut().admit(any_visible) {
            return;
        }
        for (index, entry) in entries.iter().enumerate() {
            if !entry.is_intersecting() {
                continue;
            }
            let badge: Element = entry.target();
            scheduler.schedule(
                badge_delay_ms(index, stagger_ms),
                Box::new(move || set_style(&badge, "animation", BADGE_ANIMATION)),
            );
        }
    });
}

fn install_tag_hover(document: &Document) {
    for tag in query_all(document, TECH_TAG_SELECTOR) {
        let entered = tag.clone();
        listen(&tag, "mouseenter", move |_| set_style(&entered, "transform", TAG_HOVER));
        let left = tag.clone();
        listen(&tag, "mouseleave", move |_| set_style(&left, "transform", TAG_REST));
    }
}

/// In-page anchors scroll smoothly to their target instead of jumping.
fn install_anchor_scroll(document: &Document) {
    for anchor in query_all(document, ANCHOR_SELECTOR) {
        let doc = document.clone();
        let link = anchor.clone();
        listen(&anchor, "click", move |event| {
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(target) = anchor_target_id(&href).and_then(|id| doc.get_element_by_id(id)) else {
                return;
            };
            event.prevent_default();
            smooth_scroll_into_view(&target, ScrollLogicalPosition::Start);
        });
    }
}
