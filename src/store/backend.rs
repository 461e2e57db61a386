// Key-value backends
//
// The store only needs synchronous string get/set. Two backends exist:
// - MemoryBackend: process-local map, used by tests and as a scratch store
// - FileBackend: a JSON object on disk, re-read on every access so edits made
//   by another process (the admin page) become visible on the next read

use super::StoreError;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;
use std::io;
use std::sync::{Mutex, RwLock};

/// Synchronous string-to-string storage
///
/// Values are opaque strings; the [`Store`](super::Store) layer owns the JSON
/// encoding of each collection.
pub trait KeyValueBackend: Send + Sync {
    /// Read a raw value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`, doing nothing if it is absent.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory backend preserving insertion order
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<IndexMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend(io::Error::other("storage lock poisoned"))
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.shift_remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.clear();
        Ok(())
    }
}

/// Backend persisting a flat JSON object (`{"key": "value", ...}`) to disk
///
/// Writes go to a sibling temp file first and are then renamed over the
/// target, so a reader never sees a half-written file. Writers in this
/// process are serialized; writers in other processes are not (last one wins).
#[derive(Debug)]
pub struct FileBackend {
    path: Utf8PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open (or lazily create) the storage file at `path`.
    ///
    /// The parent directory is created if needed; the file itself is only
    /// created on the first write.
    pub fn open<P: AsRef<Utf8Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!("Opened file storage at {}", path);
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read_entries(&self) -> Result<IndexMap<String, String>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(IndexMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StoreError::Backend(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("storage file {} is not a JSON object of strings: {}", self.path, e),
            ))
        })
    }

    fn write_entries(&self, entries: &IndexMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
        let tmp_path = self.path.with_extension("tmp");

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut IndexMap<String, String>),
    {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        let mut entries = self.read_entries()?;
        f(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.modify(|entries| {
            entries.shift_remove(key);
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.modify(|entries| entries.clear())
    }
}
