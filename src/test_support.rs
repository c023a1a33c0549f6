//! In-memory stand-ins for the page, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::accordion::SectionView;
use crate::config::SiteConfig;
use crate::language::{LanguageView, Localizable};
use crate::platform::MemoryBackend;
use crate::settings::{Language, Theme};
use crate::shortcuts::{PrintAction, TipView};
use crate::store::Store;
use crate::theme::ThemeView;

pub fn memory_store() -> (Store, MemoryBackend) {
    let backend = MemoryBackend::new();
    let store = Store::new(SiteConfig::default().storage_prefix, Rc::new(backend.clone()));
    (store, backend)
}

#[derive(Default)]
pub struct RecordingThemeView {
    pub rendered: RefCell<Vec<Theme>>,
}

impl RecordingThemeView {
    pub fn last(&self) -> Option<Theme> {
        self.rendered.borrow().last().copied()
    }
}

impl ThemeView for RecordingThemeView {
    fn render_theme(&self, theme: Theme) {
        self.rendered.borrow_mut().push(theme);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FakeNode {
    Text(String),
    Element(String),
}

/// A page element with optional payloads and a flat list of child nodes.
#[derive(Default)]
pub struct FakeElementState {
    pub payloads: BTreeMap<String, String>,
    pub children: Vec<FakeNode>,
    pub title: Option<String>,
}

#[derive(Clone, Default)]
pub struct FakeElement(pub Rc<RefCell<FakeElementState>>);

impl FakeElement {
    pub fn bilingual(ru: &str, en: &str) -> Self {
        let element = Self::default();
        {
            let mut state = element.0.borrow_mut();
            state.payloads.insert("data-ru".into(), ru.into());
            state.payloads.insert("data-en".into(), en.into());
            state.children.push(FakeNode::Text(ru.into()));
        }
        element
    }

    pub fn with_children(ru: &str, en: &str, children: Vec<FakeNode>) -> Self {
        let element = Self::bilingual(ru, en);
        element.0.borrow_mut().children = children;
        element
    }

    pub fn with_payload(self, attribute: &str, value: &str) -> Self {
        self.0.borrow_mut().payloads.insert(attribute.into(), value.into());
        self
    }

    pub fn without_payload(self, attribute: &str) -> Self {
        self.0.borrow_mut().payloads.remove(attribute);
        self
    }

    pub fn text(&self) -> String {
        self.0
            .borrow()
            .children
            .iter()
            .map(|node| match node {
                FakeNode::Text(text) | FakeNode::Element(text) => text.as_str(),
            })
            .collect()
    }

    pub fn children(&self) -> Vec<FakeNode> {
        self.0.borrow().children.clone()
    }

    pub fn title(&self) -> Option<String> {
        self.0.borrow().title.clone()
    }
}

impl Localizable for FakeElement {
    fn text_payload(&self, lang: Language) -> Option<String> {
        self.0.borrow().payloads.get(&format!("data-{}", lang.code())).cloned()
    }

    fn title_payload(&self, lang: Language) -> Option<String> {
        self.0.borrow().payloads.get(&format!("data-title-{}", lang.code())).cloned()
    }

    fn has_child_elements(&self) -> bool {
        self.0.borrow().children.iter().any(|node| matches!(node, FakeNode::Element(_)))
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().children = vec![FakeNode::Text(text.to_owned())];
    }

    fn direct_text_nodes(&self) -> Vec<String> {
        self.0
            .borrow()
            .children
            .iter()
            .filter_map(|node| match node {
                FakeNode::Text(text) => Some(text.clone()),
                FakeNode::Element(_) => None,
            })
            .collect()
    }

    fn set_direct_text_node(&self, index: usize, text: &str) {
        let mut state = self.0.borrow_mut();
        let slot = state
            .children
            .iter_mut()
            .filter(|node| matches!(node, FakeNode::Text(_)))
            .nth(index);
        if let Some(node) = slot {
            *node = FakeNode::Text(text.to_owned());
        }
    }

    fn set_title(&self, text: &str) {
        self.0.borrow_mut().title = Some(text.to_owned());
    }
}

#[derive(Default)]
pub struct FakeLanguageView {
    pub elements: Vec<FakeElement>,
    pub titled: Vec<FakeElement>,
    pub toggle: RefCell<Option<(String, String)>>,
    pub document_language: Cell<Option<Language>>,
}

impl LanguageView for FakeLanguageView {
    fn render_toggle(&self, label: &str, aria_label: &str) {
        *self.toggle.borrow_mut() = Some((label.to_owned(), aria_label.to_owned()));
    }

    fn text_elements(&self) -> Vec<Box<dyn Localizable>> {
        self.elements
            .iter()
            .map(|element| Box::new(element.clone()) as Box<dyn Localizable>)
            .collect()
    }

    fn title_elements(&self) -> Vec<Box<dyn Localizable>> {
        self.titled
            .iter()
            .map(|element| Box::new(element.clone()) as Box<dyn Localizable>)
            .collect()
    }

    fn set_document_language(&self, lang: Language) {
        self.document_language.set(Some(lang));
    }
}

/// Sections in document order; ids listed in `missing_content` have a header
/// but no content element.
#[derive(Default)]
pub struct FakeSections {
    pub ids: Vec<String>,
    pub missing_content: Vec<String>,
    pub rendered: RefCell<BTreeMap<String, bool>>,
    pub render_calls: Cell<usize>,
    pub scrolled: RefCell<Vec<String>>,
}

impl FakeSections {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self { ids: ids.iter().map(|id| (*id).to_owned()).collect(), ..Self::default() }
    }

    pub fn rendered_open(&self, id: &str) -> Option<bool> {
        self.rendered.borrow().get(id).copied()
    }
}

impl SectionView for FakeSections {
    fn section_ids(&self) -> Vec<String> {
        self.ids.clone()
    }

    fn has_content(&self, id: &str) -> bool {
        !self.missing_content.iter().any(|missing| missing == id)
    }

    fn render_section(&self, id: &str, open: bool) {
        self.rendered.borrow_mut().insert(id.to_owned(), open);
        self.render_calls.set(self.render_calls.get() + 1);
    }

    fn scroll_header_into_view(&self, id: &str) {
        self.scrolled.borrow_mut().push(id.to_owned());
    }
}

#[derive(Default)]
pub struct CountingPrinter {
    pub calls: Cell<usize>,
}

impl PrintAction for CountingPrinter {
    fn print(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingTip {
    pub events: RefCell<Vec<&'static str>>,
}

impl TipView for RecordingTip {
    fn show_tip(&self) {
        self.events.borrow_mut().push("show");
    }

    fn hide_tip(&self) {
        self.events.borrow_mut().push("hide");
    }
}
