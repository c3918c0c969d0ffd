//! Raw byte-slot stores.

use crate::CacheError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// A store of named byte slots with whole-value overwrite semantics.
///
/// There are no partial writes and no locking across handles: two writers of
/// the same slot race and the last write wins.
pub trait KvStore {
    /// Read a slot. `None` if the slot was never written or was deleted.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Overwrite a slot with `value`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Delete a slot. Deleting an absent slot is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all slot keys.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Check whether a slot exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-memory store.
///
/// Clones share the same slots, the way several tabs of one browser profile
/// share its local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::StoreError("memory store lock poisoned".to_string())
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let slots = self.slots.read().map_err(poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut slots = self.slots.write().map_err(poisoned)?;
        slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut slots = self.slots.write().map_err(poisoned)?;
        slots.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let slots = self.slots.read().map_err(poisoned)?;
        Ok(slots.keys().cloned().collect())
    }
}

/// File-backed store: one `<key>.json` file per slot under a directory.
///
/// Keys are percent-encoded into file names, so distinct keys never share a
/// file and [`KvStore::keys`] returns them unchanged.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// The directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.slot_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.slot_path(key);
        fs::write(&path, value)?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                let Some(stem) = path.file_stem() else {
                    continue;
                };
                match urlencoding::decode(&stem.to_string_lossy()) {
                    Ok(key) => keys.push(key.into_owned()),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping undecodable slot file")
                    }
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "medimart-cache-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("cart").unwrap().is_none());

        store.set("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some(&b"[]"[..]));
        assert!(store.exists("cart").unwrap());

        store.delete("cart").unwrap();
        assert!(!store.exists("cart").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_clones_share_slots() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.clone();

        tab_a.set("cart", b"[1]").unwrap();
        tab_b.set("cart", b"[2]").unwrap();

        // Last write wins.
        assert_eq!(tab_a.get("cart").unwrap().as_deref(), Some(&b"[2]"[..]));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = scratch_dir("roundtrip");
        let store = FileStore::open(&dir).unwrap();

        assert!(store.get("cart").unwrap().is_none());
        store.set("cart", b"[]").unwrap();
        store.set("order:42", b"{}").unwrap();

        assert_eq!(store.get("cart").unwrap().as_deref(), Some(&b"[]"[..]));
        assert_eq!(store.keys().unwrap(), vec!["cart", "order:42"]);

        store.delete("cart").unwrap();
        store.delete("cart").unwrap();
        assert!(store.get("cart").unwrap().is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_keys_do_not_collide() {
        let dir = scratch_dir("collide");
        let store = FileStore::open(&dir).unwrap();

        store.set("cart:a.b@x.com", b"[1]").unwrap();
        assert!(store.get("cart:a_b@x.com").unwrap().is_none());

        store.set("cart:a_b@x.com", b"[2]").unwrap();
        assert_eq!(store.get("cart:a.b@x.com").unwrap().as_deref(), Some(&b"[1]"[..]));
        assert_eq!(
            store.keys().unwrap(),
            vec!["cart:a.b@x.com", "cart:a_b@x.com"]
        );

        let _ = fs::remove_dir_all(&dir);
    }
}
