//! Key-value store wrapper with automatic serialization.

use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::backend::{Backend, FileBackend, MemoryBackend};
use crate::StoreError;

/// Type-safe store over a pluggable [`Backend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Default)]
pub struct Store<B: Backend = MemoryBackend> {
    backend: B,
}

impl Store<MemoryBackend> {
    /// Open an empty in-memory store.
    ///
    /// # Example
    ///
    /// ```rust
    /// let store = urbno_store::Store::in_memory();
    /// assert!(store.keys().unwrap().is_empty());
    /// ```
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl Store<FileBackend> {
    /// Open a file-backed store rooted at `dir`, creating the directory.
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(FileBackend::open(dir)?))
    }
}

impl<B: Backend> Store<B> {
    /// Wrap an existing backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                debug!(key, bytes = bytes.len(), "store read");
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a value, falling back to `T::default()` when the key is absent.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StoreError> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    /// Set a value in the store.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        debug!(key, bytes = bytes.len(), "store write");
        self.backend.set(key, &bytes)
    }

    /// Read-modify-write a value, starting from `T::default()` if absent.
    ///
    /// Returns whatever the closure returns, after the updated value has
    /// been written back.
    pub fn update<T, R, F>(&self, key: &str, f: F) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T) -> R,
    {
        let mut value: T = self.get_or_default(key)?;
        let result = f(&mut value);
        self.set(key, &value)?;
        Ok(result)
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        debug!(key, "store delete");
        self.backend.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.exists(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        visits: u32,
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = Store::in_memory();
        let prefs: Option<Prefs> = store.get("prefs").unwrap();
        assert!(prefs.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let store = Store::in_memory();
        let prefs = Prefs {
            theme: "dark".to_string(),
            visits: 3,
        };
        store.set("prefs", &prefs).unwrap();
        assert_eq!(store.get::<Prefs>("prefs").unwrap(), Some(prefs));
    }

    #[test]
    fn test_update_starts_from_default() {
        let store = Store::in_memory();
        let visits = store
            .update("prefs", |p: &mut Prefs| {
                p.visits += 1;
                p.visits
            })
            .unwrap();
        assert_eq!(visits, 1);

        let visits = store
            .update("prefs", |p: &mut Prefs| {
                p.visits += 1;
                p.visits
            })
            .unwrap();
        assert_eq!(visits, 2);
    }

    #[test]
    fn test_type_mismatch_is_serialize_error() {
        let store = Store::in_memory();
        store.set("prefs", &"not an object").unwrap();
        let err = store.get::<Prefs>("prefs").unwrap_err();
        assert!(matches!(err, StoreError::Serialize(_)));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_dir(dir.path().join("nested")).unwrap();
        store.set("urbno_current", &Some("a@b.co")).unwrap();

        let reopened = Store::open_dir(dir.path().join("nested")).unwrap();
        let current: Option<Option<String>> = reopened.get("urbno_current").unwrap();
        assert_eq!(current, Some(Some("a@b.co".to_string())));

        reopened.delete("urbno_current").unwrap();
        assert!(!reopened.exists("urbno_current").unwrap());
    }
}
