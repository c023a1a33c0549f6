//! # cv-page
//!
//! WebAssembly front-end for a static bilingual CV page: theme switching,
//! language toggling, the collapsible section accordion, keyboard shortcuts,
//! and a handful of scroll-driven effects.
//!
//! Controllers own their state and reach the page only through the traits in
//! [`platform`] and the per-controller view traits, so every rule in this crate
//! is testable without a browser. The `browser` module (behind the `csr`
//! feature) supplies the web-sys implementations and wires events at startup.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Namespaced JSON facade over key-value storage |
//! | [`settings`] | Persisted entities: theme, language, section states, flags |
//! | [`theme`] | Theme selection and system dark-mode reconciliation |
//! | [`language`] | Bilingual text rewriting |
//! | [`accordion`] | Per-section open/closed state |
//! | [`shortcuts`] | Modifier-key shortcuts and the one-time tip |
//! | [`effects`] | Scroll progress, parallax, reveal and throttling math |
//! | [`platform`] | Storage and scheduling seams with in-memory versions |
//! | [`config`] | Page configuration and its defaults |

pub mod accordion;
#[cfg(feature = "csr")]
pub mod browser;
pub mod config;
pub mod effects;
pub mod error;
pub mod language;
pub mod platform;
pub mod settings;
pub mod shortcuts;
pub mod store;
pub mod theme;

#[cfg(test)]
mod test_support;
