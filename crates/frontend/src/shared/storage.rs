use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use web_sys::window;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,

    #[error("failed to write key '{0}'")]
    Write(String),

    #[error("stored value under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

/// String key-value storage, `window.localStorage` in the browser
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str);
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Browser localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-process storage used by tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }
}
