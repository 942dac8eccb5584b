//! Key/value persistence
//!
//! Backends mirror the Web Storage API:
//! - `MemoryStorage`: process lifetime (tests, native session scope)
//! - `FileStorage`: one file per key in a directory (native durable store)
//! - `WebStorage`: `sessionStorage` / `localStorage` (wasm32)

use std::collections::HashMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

/// Session-scoped key recording that a game was started
pub const SESSION_STARTED_KEY: &str = "gameStarted";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stored data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected the operation: {0}")]
    Backend(String),
}

/// String key/value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Whether a game was already started in this session
///
/// An unreadable store counts as "not started".
pub fn session_started(storage: &dyn Storage) -> bool {
    match storage.get_item(SESSION_STARTED_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            log::warn!("Session flag unavailable: {}", e);
            false
        }
    }
}

/// Record that a game was started in this session
pub fn mark_session_started(storage: &mut dyn Storage) -> Result<(), StorageError> {
    storage.set_item(SESSION_STARTED_KEY, "true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("a").unwrap(), None);
        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
        storage.remove_item("a").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
    }

    #[test]
    fn test_session_flag() {
        let mut storage = MemoryStorage::new();
        assert!(!session_started(&storage));
        mark_session_started(&mut storage).unwrap();
        assert!(session_started(&storage));

        storage.set_item(SESSION_STARTED_KEY, "false").unwrap();
        assert!(!session_started(&storage));
    }
}
