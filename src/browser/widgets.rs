//! Injected page widgets: scroll progress bar, back-to-top button, and the
//! onboarding keyboard tip.
//!
//! SYSTEM CONTEXT
//! ==============
//! The static page ships none of these. They are mounted once at startup and
//! driven by signals that the scroll listener and the tip scheduler write.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use web_sys::{Document, ScrollBehavior, ScrollToOptions};

use crate::settings::Language;
use crate::shortcuts::{Shortcut, TipPhase, TipView, tip_text};

const TIP_EXIT_ANIMATION: &str = "slideUpTip 0.5s ease-out reverse";
const BACK_TO_TOP_HOVER: &str = "translateY(-5px) scale(1.1)";

/// Signals shared between the widgets and the code that drives them.
#[derive(Clone, Copy)]
pub struct WidgetSignals {
    pub progress: RwSignal<f64>,
    pub back_to_top: RwSignal<bool>,
    pub tip_phase: RwSignal<TipPhase>,
    pub tip_language: RwSignal<Language>,
}

impl WidgetSignals {
    pub fn new() -> Self {
        Self {
            progress: RwSignal::new(0.0),
            back_to_top: RwSignal::new(false),
            tip_phase: RwSignal::new(TipPhase::Hidden),
            tip_language: RwSignal::new(Language::default()),
        }
    }
}

impl Default for WidgetSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the widgets to `<body>` for the lifetime of the page.
pub fn mount(signals: WidgetSignals, tip_exit_ms: u32) {
    leptos::mount::mount_to_body(move || {
        view! {
            <ScrollIndicator progress=signals.progress />
            <BackToTop visible=signals.back_to_top />
            <KeyboardTip phase=signals.tip_phase language=signals.tip_language exit_ms=tip_exit_ms />
        }
    });
}

/// Thin bar whose width follows scroll progress.
#[component]
pub fn ScrollIndicator(progress: RwSignal<f64>) -> impl IntoView {
    view! {
        <div class="scroll-indicator" aria-hidden="true" style:width=move || format!("{}%", progress.get())></div>
    }
}

#[component]
pub fn BackToTop(visible: RwSignal<bool>) -> impl IntoView {
    let hovered = RwSignal::new(false);
    let on_click = move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    };

    view! {
        <button
            type="button"
            class="back-to-top"
            aria-label="Вернуться наверх"
            style:opacity=move || if visible.get() { "1" } else { "0" }
            style:visibility=move || if visible.get() { "visible" } else { "hidden" }
            style:transform=move || if hovered.get() { BACK_TO_TOP_HOVER } else { "" }
            on:click=on_click
            on:mouseenter=move |_| hovered.set(true)
            on:mouseleave=move |_| hovered.set(false)
        >
            "↑"
        </button>
    }
}

#[component]
pub fn KeyboardTip(phase: RwSignal<TipPhase>, language: RwSignal<Language>, exit_ms: u32) -> impl IntoView {
    let text = move || tip_text(language.get());
    let animation = move || if phase.get() == TipPhase::Leaving { TIP_EXIT_ANIMATION } else { "" };

    view! {
        <Show when=move || phase.get() != TipPhase::Hidden>
            <div class="keyboard-tip" role="alert" aria-live="polite" style:animation=animation on:click=move |_| dismiss(phase, exit_ms)>
                <strong>{move || text().heading}</strong>
                " "
                {move || text().use_word}
                " "
                <kbd>{Shortcut::NextTheme.keys()}</kbd>
                " "
                {move || text().theme_hint}
                " "
                <kbd>{Shortcut::OpenAll.keys()}</kbd>
                " "
                {move || text().open_hint}
            </div>
        </Show>
    }
}

/// Start the exit animation and remove the tip once it ends. A tip that is
/// already leaving or gone stays as it is.
fn dismiss(phase: RwSignal<TipPhase>, exit_ms: u32) {
    let Some(next) = phase.get_untracked().dismissed() else {
        return;
    };
    phase.set(next);
    Timeout::new(exit_ms, move || phase.set(phase.get_untracked().removed())).forget();
}

/// [`TipView`] that drives [`KeyboardTip`] through its signals.
pub struct LeptosTipView {
    document: Document,
    signals: WidgetSignals,
    exit_ms: u32,
}

impl LeptosTipView {
    pub fn new(document: Document, signals: WidgetSignals, exit_ms: u32) -> Self {
        Self { document, signals, exit_ms }
    }

    // The tip follows whatever language the page is showing when it appears.
    fn page_language(&self) -> Language {
        self.document
            .document_element()
            .and_then(|root| root.get_attribute("lang"))
            .and_then(|code| Language::parse(&code))
            .unwrap_or_default()
    }
}

impl TipView for LeptosTipView {
    fn show_tip(&self) {
        self.signals.tip_language.set(self.page_language());
        self.signals.tip_phase.set(TipPhase::Shown);
    }

    fn hide_tip(&self) {
        dismiss(self.signals.tip_phase, self.exit_ms);
    }
}
