//! Bilingual text switching.
//!
//! Elements carry both translations in `data-ru`/`data-en` (and optionally
//! `data-title-ru`/`data-title-en` for tooltips). Switching rewrites the visible
//! text from the payload for the active language:
//! - an element without child elements gets its whole text replaced;
//! - an element with child elements only has its non-blank direct text nodes
//!   replaced, so nested markup survives;
//! - an element with no usable payload for the language is left alone.

#[cfg(test)]
#[path = "language_test.rs"]
mod language_test;

use std::rc::Rc;

use crate::config::SiteConfig;
use crate::settings::{LANGUAGE_KEY, Language};
use crate::store::Store;

/// One page element that carries per-language payloads.
pub trait Localizable {
    fn text_payload(&self, lang: Language) -> Option<String>;
    fn title_payload(&self, lang: Language) -> Option<String>;
    fn has_child_elements(&self) -> bool;
    /// Replace the element's entire text content.
    fn set_text(&self, text: &str);
    /// Contents of the direct text-node children, in document order.
    fn direct_text_nodes(&self) -> Vec<String>;
    /// Replace the `index`-th direct text node (same indexing as `direct_text_nodes`).
    fn set_direct_text_node(&self, index: usize, text: &str);
    fn set_title(&self, text: &str);
}

/// The page surface the language controller writes to.
pub trait LanguageView {
    /// Update the toggle control; `label` names the language it switches to.
    fn render_toggle(&self, label: &str, aria_label: &str);
    /// Elements carrying both text payloads.
    fn text_elements(&self) -> Vec<Box<dyn Localizable>>;
    /// Elements carrying both title payloads.
    fn title_elements(&self) -> Vec<Box<dyn Localizable>>;
    /// Set the document language attribute (drives `:lang()` styling).
    fn set_document_language(&self, lang: Language);
}

/// Rewrite an element's visible text. Returns whether anything was touched.
pub fn localize_text(element: &dyn Localizable, lang: Language) -> bool {
    let Some(text) = element.text_payload(lang).filter(|text| !text.is_empty()) else {
        return false;
    };
    if !element.has_child_elements() {
        element.set_text(&text);
        return true;
    }
    for (index, node) in element.direct_text_nodes().iter().enumerate() {
        if !node.trim().is_empty() {
            element.set_direct_text_node(index, &text);
        }
    }
    true
}

/// Rewrite an element's `title`. Returns whether it was touched.
pub fn localize_title(element: &dyn Localizable, lang: Language) -> bool {
    match element.title_payload(lang).filter(|title| !title.is_empty()) {
        Some(title) => {
            element.set_title(&title);
            true
        }
        None => false,
    }
}

pub struct LanguageController {
    store: Store,
    view: Rc<dyn LanguageView>,
    current: Language,
    default_language: Language,
}

impl LanguageController {
    /// Apply the stored language (or the default) to the page.
    pub fn init(store: Store, view: Rc<dyn LanguageView>, config: &SiteConfig) -> Self {
        let stored: String = store.get(LANGUAGE_KEY, config.default_language.code().to_owned());
        let mut controller = Self {
            store,
            view,
            current: config.default_language,
            default_language: config.default_language,
        };
        controller.switch_language(&stored);
        controller
    }

    #[must_use]
    pub fn current(&self) -> Language {
        self.current
    }

    /// Switch by language code. Unknown codes fall back to the default.
    pub fn switch_language(&mut self, code: &str) -> Language {
        let lang = Language::parse(code).unwrap_or_else(|| {
            log::warn!("language: invalid language `{code}`, using `{}`", self.default_language);
            self.default_language
        });
        self.apply(lang);
        lang
    }

    pub fn apply(&mut self, lang: Language) {
        self.view.render_toggle(lang.toggle_label(), lang.toggle_aria_label());

        let mut touched = 0_usize;
        for element in self.view.text_elements() {
            if localize_text(&*element, lang) {
                touched += 1;
            }
        }
        for element in self.view.title_elements() {
            localize_title(&*element, lang);
        }
        self.view.set_document_language(lang);
        log::debug!("language: switched to `{lang}`, {touched} elements rewritten");

        self.current = lang;
        self.store.set(LANGUAGE_KEY, lang.code());
    }

    /// Flip to the other supported language.
    pub fn toggle_language(&mut self) -> Language {
        let next = self.current.other();
        self.apply(next);
        next
    }
}
