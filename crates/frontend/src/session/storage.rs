//! Tab-scoped persistence for the session store.
//!
//! Every collection is written whole under a fixed key on each mutation.
//! The store is the only reader and writer of these keys; a value that fails
//! to parse is treated as absent, never as a startup error.

use serde::{de::DeserializeOwned, Serialize};
use web_sys::window;

pub const LIBRARY_KEY: &str = "pdfs";
pub const CHATS_KEY: &str = "chats";
pub const ATTEMPTS_KEY: &str = "quizAttempts";
pub const SELECTION_KEY: &str = "selectedPdfId";

fn session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

/// Load a collection, defaulting on a missing key or an incompatible value.
pub fn load<T: DeserializeOwned + Default>(key: &str) -> T {
    load_opt(key).unwrap_or_default()
}

pub fn load_opt<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = session_storage()?.get_item(key).ok()??;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Discarding unreadable '{}' from session storage: {}", key, err);
            None
        }
    }
}

/// Overwrite the value stored under `key` with the serialized `value`.
pub fn save<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = session_storage() else {
        return;
    };
    match serde_json::to_string(value) {
        Ok(raw) => {
            let _ = storage.set_item(key, &raw);
        }
        Err(err) => log::error!("Failed to serialize '{}' for session storage: {}", key, err),
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = session_storage() {
        let _ = storage.remove_item(key);
    }
}
