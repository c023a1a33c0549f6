//! Namespaced JSON facade over key-value storage.
//!
//! Every key is stored as `{prefix}-{key}` so the page never collides with
//! other data on the same origin. Values are JSON text.
//!
//! TRADE-OFFS
//! ==========
//! The infallible methods (`get`, `set`, `remove`, `has`, `clear`) swallow
//! backend and codec errors after logging them: a broken store must never stop
//! the page from being interactive. `try_get`/`try_set` expose the error for
//! callers that care. There is no cache; every call reaches the backend.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::platform::KeyValueBackend;

#[derive(Clone)]
pub struct Store {
    prefix: String,
    backend: Rc<dyn KeyValueBackend>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").field("prefix", &self.prefix).finish_non_exhaustive()
    }
}

impl Store {
    pub fn new(prefix: impl Into<String>, backend: Rc<dyn KeyValueBackend>) -> Self {
        Self { prefix: prefix.into(), backend }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Fully qualified backend key for `key`.
    #[must_use]
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}-{key}", self.prefix)
    }

    /// Read and decode `key`. `Ok(None)` when absent.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let full = self.namespaced(key);
        let Some(raw) = self.backend.get_item(&full)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode { key: full, source })
    }

    /// Read `key`, returning `default` when absent, unreadable, or undecodable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                log::warn!("store: {err}; using default");
                default
            }
        }
    }

    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let full = self.namespaced(key);
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode { key: full.clone(), source })?;
        self.backend.set_item(&full, &raw)
    }

    /// Encode and write `value`. On failure the previous value stays in place.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_set(key, value) {
            log::error!("store: {err}");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove_item(&self.namespaced(key)) {
            log::error!("store: {err}");
        }
    }

    /// Whether `key` is present, regardless of whether it decodes.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        match self.backend.get_item(&self.namespaced(key)) {
            Ok(value) => value.is_some(),
            Err(err) => {
                log::warn!("store: {err}");
                false
            }
        }
    }

    /// Remove every key under this namespace; unrelated keys are untouched.
    pub fn clear(&self) {
        let keys = match self.backend.keys() {
            Ok(keys) => keys,
            Err(err) => {
                log::error!("store: {err}");
                return;
            }
        };
        let marker = format!("{}-", self.prefix());
        for key in keys.iter().filter(|key| key.starts_with(&marker)) {
            if let Err(err) = self.backend.remove_item(key) {
                log::error!("store: {err}");
            }
        }
    }
}
