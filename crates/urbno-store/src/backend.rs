//! Byte-level storage backends.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;

use crate::StoreError;

/// Raw key-value storage underneath a [`Store`](crate::Store).
///
/// Backends deal in bytes only; JSON encoding happens one level up.
pub trait Backend: Send + Sync {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List every stored key in ascending order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-process backend. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("memory store lock poisoned".to_string())
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.contains_key(key))
    }
}

/// Directory-backed store: one `<key>.json` file per entry.
///
/// Writes go to a temporary file in the same directory and are renamed
/// into place, so a crash never leaves a half-written entry behind.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

const EXTENSION: &str = "json";

impl FileBackend {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value)?;
        temp.flush()?;
        temp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |e| e == EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(key)?.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        backend.set("a", b"1").unwrap();
        assert_eq!(backend.get("a").unwrap(), Some(b"1".to_vec()));
        assert!(backend.exists("a").unwrap());

        backend.delete("a").unwrap();
        assert_eq!(backend.get("a").unwrap(), None);
        assert!(!backend.exists("a").unwrap());
    }

    #[test]
    fn test_file_backend_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileBackend::open(dir.path()).unwrap();
        first.set("urbno_cart", b"[]").unwrap();

        let second = FileBackend::open(dir.path()).unwrap();
        assert_eq!(second.get("urbno_cart").unwrap(), Some(b"[]".to_vec()));
        assert_eq!(second.keys().unwrap(), vec!["urbno_cart".to_string()]);
    }

    #[test]
    fn test_file_backend_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("nothing").unwrap(), None);
        backend.delete("nothing").unwrap();
    }

    #[test]
    fn test_file_backend_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden", "with space"] {
            assert!(
                matches!(backend.set(key, b"x"), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_keys_are_sorted() {
        let backend = MemoryBackend::new();
        backend.set("b", b"2").unwrap();
        backend.set("a", b"1").unwrap();
        assert_eq!(backend.keys().unwrap(), vec!["a", "b"]);
    }
}
