//! Collapsible CV sections.
//!
//! Each section is a header (carrying `data-section`) paired with a content
//! element whose id is that section id. The open/closed flag of every section
//! is persisted as one mapping; the whole mapping is written on each change.
//!
//! On a first visit the first `default_open_sections` sections (by document
//! order) start open and the rest closed. Those defaults are persisted right
//! away so later loads take the stored branch.

#[cfg(test)]
#[path = "accordion_test.rs"]
mod accordion_test;

use std::rc::Rc;

use crate::config::SiteConfig;
use crate::platform::Scheduler;
use crate::settings::{SECTIONS_STATE_KEY, SectionStates};
use crate::store::Store;

/// The page surface for sections.
pub trait SectionView {
    /// Section ids from the headers, in document order.
    fn section_ids(&self) -> Vec<String>;
    /// Whether the content element for `id` exists.
    fn has_content(&self, id: &str) -> bool;
    /// Apply open/closed classes and `aria-expanded`/`aria-hidden`.
    fn render_section(&self, id: &str, open: bool);
    fn scroll_header_into_view(&self, id: &str);
}

/// Keys that activate a focused section header, same as a click.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

pub struct AccordionController {
    store: Store,
    view: Rc<dyn SectionView>,
    scheduler: Rc<dyn Scheduler>,
    sections: Vec<String>,
    states: SectionStates,
    scroll_delay_ms: u32,
}

impl AccordionController {
    /// Discover sections, apply stored or default state, persist defaults.
    pub fn init(store: Store, view: Rc<dyn SectionView>, scheduler: Rc<dyn Scheduler>, config: &SiteConfig) -> Self {
        let saved: SectionStates = store.get(SECTIONS_STATE_KEY, SectionStates::new());
        let mut states = saved.clone();
        let mut sections = Vec::new();

        for (index, id) in view.section_ids().into_iter().enumerate() {
            if !view.has_content(&id) {
                log::warn!("accordion: section content not found for `{id}`");
                continue;
            }
            let open = saved.get(&id).unwrap_or_else(|| {
                let open = index < config.default_open_sections;
                states.set(&id, open);
                open
            });
            view.render_section(&id, open);
            sections.push(id);
        }

        let controller = Self {
            store,
            view,
            scheduler,
            sections,
            states,
            scroll_delay_ms: config.animation_delay_ms,
        };
        if controller.states != saved {
            controller.save();
        }
        controller
    }

    /// Known section ids, in document order.
    #[must_use]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    #[must_use]
    pub fn states(&self) -> &SectionStates {
        &self.states
    }

    #[must_use]
    pub fn is_open(&self, id: &str) -> bool {
        self.states.is_open(id)
    }

    /// Flip one section (click or keyboard activation on its header).
    ///
    /// Opening schedules a scroll to the header once the transition has
    /// started. Returns the new state, or `None` for an unknown section.
    pub fn toggle_section(&mut self, id: &str) -> Option<bool> {
        if !self.sections.iter().any(|known| known == id) {
            log::warn!("accordion: unknown section `{id}`");
            return None;
        }
        let open = !self.states.is_open(id);
        self.states.set(id, open);
        self.view.render_section(id, open);
        self.save();

        if open {
            let view = Rc::clone(&self.view);
            let id = id.to_owned();
            self.scheduler
                .schedule(self.scroll_delay_ms, Box::new(move || view.scroll_header_into_view(&id)));
        }
        Some(open)
    }

    pub fn open_all(&mut self) {
        self.set_all(true);
    }

    pub fn close_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, open: bool) {
        for id in &self.sections {
            self.states.set(id, open);
            self.view.render_section(id, open);
        }
        self.save();
    }

    fn save(&self) {
        self.store.set(SECTIONS_STATE_KEY, &self.states);
    }
}
