//! `window.localStorage` as a [`KeyValueBackend`].

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::StoreError;
use crate::platform::KeyValueBackend;

pub struct LocalStorageBackend {
    storage: Storage,
}

impl LocalStorageBackend {
    /// Open the window's local storage. Fails when storage is disabled
    /// (private mode, blocked cookies) or there is no window.
    pub fn from_window() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) | Err(_) => Err(StoreError::Unavailable),
        }
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|err| StoreError::Read { key: key.to_owned(), reason: describe(&err) })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StoreError::Write { key: key.to_owned(), reason: describe(&err) })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|err| StoreError::Remove { key: key.to_owned(), reason: describe(&err) })
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let length = self.storage.length().map_err(|err| StoreError::Keys(describe(&err)))?;
        let mut keys = Vec::new();
        for index in 0..length {
            if let Some(key) = self.storage.key(index).map_err(|err| StoreError::Keys(describe(&err)))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
