//! web-sys implementations of the controller view traits.
//!
//! Every DOM write goes through the small helpers at the top so a failing
//! call is logged instead of silently dropped.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, Node, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::accordion::SectionView;
use crate::language::{LanguageView, Localizable};
use crate::platform::{Scheduler, Task};
use crate::settings::{Language, Theme};
use crate::shortcuts::PrintAction;
use crate::theme::ThemeView;

pub const THEME_BUTTON_SELECTOR: &str = ".theme-btn";
pub const LANGUAGE_TOGGLE_ID: &str = "langToggle";
pub const BILINGUAL_SELECTOR: &str = "[data-ru][data-en]";
pub const BILINGUAL_TITLE_SELECTOR: &str = "[data-title-ru][data-title-en]";
pub const SECTION_HEADER_SELECTOR: &str = ".section-header";

// ── Helpers ─────────────────────────────────────────────────────

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("browser: failed to listen for `{event}`: {err:?}");
    }
    closure.forget();
}

/// All elements matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("browser: bad selector `{selector}`: {err:?}");
            return Vec::new();
        }
    };
    // querySelectorAll only ever yields elements.
    (0..list.length())
        .filter_map(|index| list.item(index))
        .map(JsCast::unchecked_into::<Element>)
        .collect()
}

pub fn set_attr(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        log::warn!("browser: failed to set `{name}`: {err:?}");
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        log::warn!("browser: failed to toggle class `{class}`: {err:?}");
    }
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    if let Err(err) = html.style().set_property(property, value) {
        log::warn!("browser: failed to set style `{property}`: {err:?}");
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

pub fn smooth_scroll_into_view(element: &Element, block: ScrollLogicalPosition) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(block);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

// ── Theme ───────────────────────────────────────────────────────

pub struct DomThemeView {
    document: Document,
}

impl DomThemeView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ThemeView for DomThemeView {
    fn render_theme(&self, theme: Theme) {
        match self.document.body() {
            Some(body) => {
                for candidate in Theme::ALL {
                    set_class(&body, candidate.css_class(), candidate == theme);
                }
            }
            None => log::warn!("theme: document has no body"),
        }
        for button in query_all(&self.document, THEME_BUTTON_SELECTOR) {
            let active = button.get_attribute("data-theme").as_deref() == Some(theme.id());
            set_class(&button, "active", active);
            set_attr(&button, "aria-pressed", bool_attr(active));
        }
    }
}

// ── Language ────────────────────────────────────────────────────

pub struct DomLocalizable(pub Element);

impl DomLocalizable {
    fn text_children(&self) -> Vec<Node> {
        let nodes = self.0.child_nodes();
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter(|node| node.node_type() == Node::TEXT_NODE)
            .collect()
    }
}

impl Localizable for DomLocalizable {
    fn text_payload(&self, lang: Language) -> Option<String> {
        self.0.get_attribute(&format!("data-{}", lang.code()))
    }

    fn title_payload(&self, lang: Language) -> Option<String> {
        self.0.get_attribute(&format!("data-title-{}", lang.code()))
    }

    fn has_child_elements(&self) -> bool {
        self.0.child_element_count() > 0
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn direct_text_nodes(&self) -> Vec<String> {
        self.text_children()
            .iter()
            .map(|node| node.text_content().unwrap_or_default())
            .collect()
    }

    fn set_direct_text_node(&self, index: usize, text: &str) {
        if let Some(node) = self.text_children().get(index) {
            node.set_text_content(Some(text));
        }
    }

    fn set_title(&self, text: &str) {
        set_attr(&self.0, "title", text);
    }
}

pub struct DomLanguageView {
    document: Document,
    toggle: Option<Element>,
}

impl DomLanguageView {
    pub fn new(document: Document) -> Self {
        let toggle = document.get_element_by_id(LANGUAGE_TOGGLE_ID);
        if toggle.is_none() {
            log::warn!("language: toggle button `#{LANGUAGE_TOGGLE_ID}` not found");
        }
        Self { document, toggle }
    }

    pub fn toggle(&self) -> Option<&Element> {
        self.toggle.as_ref()
    }
}

impl LanguageView for DomLanguageView {
    fn render_toggle(&self, label: &str, aria_label: &str) {
        if let Some(toggle) = &self.toggle {
            toggle.set_text_content(Some(label));
            set_attr(toggle, "aria-label", aria_label);
        }
    }

    fn text_elements(&self) -> Vec<Box<dyn Localizable>> {
        query_all(&self.document, BILINGUAL_SELECTOR)
            .into_iter()
            .map(|element| Box::new(DomLocalizable(element)) as Box<dyn Localizable>)
            .collect()
    }

    fn title_elements(&self) -> Vec<Box<dyn Localizable>> {
        query_all(&self.document, BILINGUAL_TITLE_SELECTOR)
            .into_iter()
            .map(|element| Box::new(DomLocalizable(element)) as Box<dyn Localizable>)
            .collect()
    }

    fn set_document_language(&self, lang: Language) {
        match self.document.document_element() {
            Some(root) => set_attr(&root, "lang", lang.code()),
            None => log::warn!("language: document has no root element"),
        }
    }
}

// ── Sections ────────────────────────────────────────────────────

/// Section headers captured at startup, keyed by their `data-section`.
pub struct DomSectionView {
    document: Document,
    headers: Vec<(String, Element)>,
}

impl DomSectionView {
    pub fn new(document: Document) -> Self {
        let headers = query_all(&document, SECTION_HEADER_SELECTOR)
            .into_iter()
            .filter_map(|header| match header.get_attribute("data-section") {
                Some(id) => Some((id, header)),
                None => {
                    log::warn!("accordion: section header without `data-section`");
                    None
                }
            })
            .collect();
        Self { document, headers }
    }

    pub fn headers(&self) -> &[(String, Element)] {
        &self.headers
    }

    fn header(&self, id: &str) -> Option<&Element> {
        self.headers.iter().find(|(known, _)| known == id).map(|(_, header)| header)
    }
}

impl SectionView for DomSectionView {
    fn section_ids(&self) -> Vec<String> {
        self.headers.iter().map(|(id, _)| id.clone()).collect()
    }

    fn has_content(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn render_section(&self, id: &str, open: bool) {
        let (Some(header), Some(content)) = (self.header(id), self.document.get_element_by_id(id)) else {
            log::warn!("accordion: section `{id}` is missing its header or content");
            return;
        };
        set_class(header, "active", open);
        set_class(&content, "active", open);
        set_attr(header, "aria-expanded", bool_attr(open));
        set_attr(&content, "aria-hidden", bool_attr(!open));
    }

    fn scroll_header_into_view(&self, id: &str) {
        if let Some(header) = self.header(id) {
            smooth_scroll_into_view(header, ScrollLogicalPosition::Nearest);
        }
    }
}

// ── Timers and printing ─────────────────────────────────────────

/// `setTimeout`-backed scheduler. Timers are never cancelled.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        Timeout::new(delay_ms, task).forget();
    }
}

pub struct WindowPrinter {
    window: Window,
}

impl WindowPrinter {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl PrintAction for WindowPrinter {
    fn print(&self) {
        if let Err(err) = self.window.print() {
            log::error!("shortcuts: print failed: {err:?}");
        }
    }
}
