//! Browser entry point: builds the controllers over the live document and
//! wires page events to them.
//!
//! DESIGN
//! ======
//! Controllers are created once and shared through `Rc<RefCell<_>>` by the
//! event closures, which are leaked for the lifetime of the page. Startup
//! waits for `DOMContentLoaded` when the script runs before the document has
//! finished parsing.
//!
//! TRADE-OFFS
//! ==========
//! Storage falls back to an in-memory backend when `localStorage` is blocked,
//! so the page stays interactive but forgets settings on reload.

pub mod dom;
pub mod effects;
pub mod storage;
pub mod widgets;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, ErrorEvent, KeyboardEvent, MediaQueryList, MediaQueryListEvent, PromiseRejectionEvent, Window};

use self::dom::{
    DomLanguageView, DomSectionView, DomThemeView, THEME_BUTTON_SELECTOR, TimeoutScheduler, WindowPrinter, listen,
    query_all, set_class,
};
use self::storage::LocalStorageBackend;
use self::widgets::{LeptosTipView, WidgetSignals};
use crate::accordion::{AccordionController, is_activation_key};
use crate::config::SiteConfig;
use crate::error::ConfigError;
use crate::language::LanguageController;
use crate::platform::{KeyValueBackend, MemoryBackend, Scheduler};
use crate::settings::{Language, Theme};
use crate::shortcuts::{KeyChord, Shortcut, ShortcutDispatcher, schedule_onboarding_tip};
use crate::store::Store;
use crate::theme::ThemeController;

const CONFIG_ELEMENT_ID: &str = "cv-config";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
const JS_ENABLED_CLASS: &str = "js-enabled";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        let (win, doc) = (window.clone(), document.clone());
        listen(&document, "DOMContentLoaded", move |_| boot(&win, &doc));
    } else {
        boot(&window, &document);
    }
}

fn boot(window: &Window, document: &Document) {
    let (config, config_error) = load_config(document);
    init_logging(&config);
    if let Some(err) = config_error {
        log::warn!("config: {err}; using defaults");
    }
    install_error_logging(window);

    let store = Store::new(config.storage_prefix.clone(), storage_backend());
    let scheduler: Rc<dyn Scheduler> = Rc::new(TimeoutScheduler);

    let theme = wire_theme(window, document, &store, &config);
    let language = wire_language(document, &store, &config);
    let accordion = wire_accordion(document, &store, &scheduler, &config);

    let dispatcher = ShortcutDispatcher::new(
        Rc::clone(&theme),
        Rc::clone(&accordion),
        Rc::clone(&scheduler),
        Rc::new(WindowPrinter::new(window.clone())),
        &config,
    );
    listen(document, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let chord = KeyChord { key: key.key(), ctrl: key.ctrl_key(), meta: key.meta_key(), shift: key.shift_key() };
        if dispatcher.handle(&chord).is_some() {
            event.prevent_default();
        }
    });

    let signals = WidgetSignals::new();
    widgets::mount(signals, config.tip_exit_ms);
    effects::install(window, document, signals, &scheduler, &config);

    let tip = LeptosTipView::new(document.clone(), signals, config.tip_exit_ms);
    schedule_onboarding_tip(&store, Rc::clone(&scheduler), Rc::new(tip), &config);

    if let Some(root) = document.document_element() {
        set_class(&root, JS_ENABLED_CLASS, true);
    }

    let current_theme = theme.borrow().current();
    let current_language = language.borrow().current();
    log_banner(current_theme, current_language);
}

/// Overrides from the page's `#cv-config` JSON block, if any.
fn load_config(document: &Document) -> (SiteConfig, Option<ConfigError>) {
    let raw = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|element| element.text_content());
    let Some(raw) = raw else {
        return (SiteConfig::default(), None);
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(err) => (SiteConfig::default(), Some(err)),
    }
}

fn init_logging(config: &SiteConfig) {
    if let Err(err) = console_log::init_with_level(config.log_level()) {
        web_sys::console::warn_1(&format!("cv-page: logger already installed: {err}").into());
    }
}

fn install_error_logging(window: &Window) {
    listen(window, "error", |event| {
        if let Some(err) = event.dyn_ref::<ErrorEvent>() {
            log::error!("uncaught error: {} ({}:{})", err.message(), err.filename(), err.lineno());
        }
    });
    listen(window, "unhandledrejection", |event| {
        if let Some(rejection) = event.dyn_ref::<PromiseRejectionEvent>() {
            log::error!("unhandled promise rejection: {:?}", rejection.reason());
        }
    });
}

fn storage_backend() -> Rc<dyn KeyValueBackend> {
    match LocalStorageBackend::from_window() {
        Ok(backend) => Rc::new(backend),
        Err(err) => {
            log::warn!("store: {err}; settings will not persist");
            Rc::new(MemoryBackend::new())
        }
    }
}

fn wire_theme(window: &Window, document: &Document, store: &Store, config: &SiteConfig) -> Rc<RefCell<ThemeController>> {
    let scheme = match window.match_media(DARK_SCHEME_QUERY) {
        Ok(scheme) => scheme,
        Err(err) => {
            log::warn!("theme: color scheme query failed: {err:?}");
            None
        }
    };
    let prefers_dark = scheme.as_ref().is_some_and(MediaQueryList::matches);
    let view = Rc::new(DomThemeView::new(document.clone()));
    let theme = Rc::new(RefCell::new(ThemeController::init(store.clone(), view, config, prefers_dark)));

    if let Some(scheme) = scheme {
        let theme = Rc::clone(&theme);
        listen(&scheme, "change", move |event| {
            if let Some(change) = event.dyn_ref::<MediaQueryListEvent>() {
                theme.borrow_mut().on_system_scheme_change(change.matches());
            }
        });
    }

    for button in query_all(document, THEME_BUTTON_SELECTOR) {
        let theme = Rc::clone(&theme);
        let source = button.clone();
        listen(&button, "click", move |_| match source.get_attribute("data-theme") {
            Some(id) => {
                theme.borrow_mut().select(&id);
            }
            None => log::warn!("theme: selector button without `data-theme`"),
        });
    }
    theme
}

fn wire_language(document: &Document, store: &Store, config: &SiteConfig) -> Rc<RefCell<LanguageController>> {
    let view = Rc::new(DomLanguageView::new(document.clone()));
    let toggle = view.toggle().cloned();
    let language = Rc::new(RefCell::new(LanguageController::init(store.clone(), view, config)));

    if let Some(toggle) = toggle {
        let language = Rc::clone(&language);
        listen(&toggle, "click", move |_| {
            language.borrow_mut().toggle_language();
        });
    }
    language
}

fn wire_accordion(
    document: &Document,
    store: &Store,
    scheduler: &Rc<dyn Scheduler>,
    config: &SiteConfig,
) -> Rc<RefCell<AccordionController>> {
    let view = Rc::new(DomSectionView::new(document.clone()));
    let headers = view.headers().to_vec();
    let accordion =
        Rc::new(RefCell::new(AccordionController::init(store.clone(), view, Rc::clone(scheduler), config)));

    for (id, header) in headers {
        let on_click = Rc::clone(&accordion);
        let click_id = id.clone();
        listen(&header, "click", move |_| {
            on_click.borrow_mut().toggle_section(&click_id);
        });

        let on_key = Rc::clone(&accordion);
        listen(&header, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_activation_key(&key.key()) {
                event.prevent_default();
                on_key.borrow_mut().toggle_section(&id);
            }
        });
    }
    accordion
}

fn log_banner(theme: Theme, language: Language) {
    log::info!("cv-page {} ready (theme `{theme}`, language `{language}`)", env!("CARGO_PKG_VERSION"));
    for shortcut in Shortcut::ALL {
        log::info!("  {:<14} {}", shortcut.keys(), shortcut.description());
    }
    log::info!("themes:");
    for theme in Theme::ALL {
        log::info!("  {:<10} {}", theme.id(), theme.label());
    }
}
