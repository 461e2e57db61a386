// Store - typed access to the catalog collections
//
// The store is a document-replacement cache: each collection lives under one
// key as a JSON string and is always read and written whole. There is no
// partial update; callers read, mutate in memory, and write back.

pub mod backend;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};

use crate::models::{Category, Mod, SiteConfig, Theme};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Storage key for the mods collection
pub const MODS_KEY: &str = "rb_mods";
/// Storage key for the categories collection
pub const CATEGORIES_KEY: &str = "rb_cats";
/// Storage key for the site config singleton
pub const CONFIG_KEY: &str = "rb_config";
/// Storage key for the theme preference
pub const THEME_KEY: &str = "rb_theme";
/// Marker written after the first full carousel build; never read back
pub const FEATURED_INITIALIZED_KEY: &str = "rb_featured_initialized";

/// Defaults substituted for missing or empty collections.
pub mod defaults {
    use crate::models::{Category, Mod, SiteConfig};

    /// Bumped whenever a default below changes shape or value.
    pub const VERSION: u32 = 1;

    pub fn mods() -> Vec<Mod> {
        Vec::new()
    }

    pub fn categories() -> Vec<Category> {
        vec![Category::new(1, "Geral", "fas fa-folder")]
    }

    pub fn config() -> SiteConfig {
        SiteConfig::default()
    }
}

/// Errors raised by the store and its backends
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Stored value for {key} is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize value for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage backend error: {0}")]
    Backend(#[from] std::io::Error),
}

/// Result of reading one key, keeping "missing", "empty" and "present" apart
///
/// A malformed value is not a variant: it is returned as
/// [`StoreError::Malformed`] so it is never confused with absence.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Key was never written (or was removed)
    Missing,
    /// Key exists but holds a blank string or JSON `null`
    Empty,
    /// Key holds a well-formed value
    Present(T),
}

impl<T> Lookup<T> {
    /// Collapse missing and empty into `default`.
    pub fn or_default_with<F: FnOnce() -> T>(self, default: F) -> T {
        match self {
            Lookup::Present(value) => value,
            Lookup::Missing | Lookup::Empty => default(),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Lookup::Present(_))
    }
}

/// Change events emitted after a successful write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreChange {
    Mods,
    Categories,
    Config,
    Theme,
}

/// Typed facade over a [`KeyValueBackend`]
///
/// Cloning is cheap; clones share the backend and the change channel.
/// Subscribers are notified of writes made through any clone, which lets the
/// UI reconcile immediately instead of waiting for the next sync tick. Writes
/// made by other processes are not observed and still rely on polling.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueBackend>,
    change_tx: broadcast::Sender<StoreChange>,
}

impl Store {
    /// Create a store over `backend` with a change channel buffer of 100 events
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        let (change_tx, _) = broadcast::channel(100);
        Self { backend, change_tx }
    }

    /// Store backed by a fresh [`MemoryBackend`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Subscribe to write notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.change_tx.subscribe()
    }

    /// Whether `key` currently holds a non-blank value
    pub fn has_value(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self
            .backend
            .get(key)?
            .is_some_and(|raw| !raw.trim().is_empty()))
    }

    /// Read and decode one key
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Lookup<T>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(Lookup::Missing);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Lookup::Empty);
        }

        serde_json::from_str(trimmed)
            .map(Lookup::Present)
            .map_err(|source| {
                tracing::error!("Malformed stored value under {}: {}", key, source);
                StoreError::Malformed {
                    key: key.to_string(),
                    source,
                }
            })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &json)
    }

    fn notify(&self, change: StoreChange) {
        // No subscribers is fine
        let _ = self.change_tx.send(change);
    }

    /// All mods, or an empty list if none are stored
    pub fn get_mods(&self) -> Result<Vec<Mod>, StoreError> {
        Ok(self.lookup(MODS_KEY)?.or_default_with(defaults::mods))
    }

    /// Replace the whole mods collection
    pub fn set_mods(&self, mods: &[Mod]) -> Result<(), StoreError> {
        self.write(MODS_KEY, mods)?;
        tracing::debug!("Stored {} mods", mods.len());
        self.notify(StoreChange::Mods);
        Ok(())
    }

    /// All categories, or the single synthetic "Geral" category if none are stored
    pub fn get_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self
            .lookup(CATEGORIES_KEY)?
            .or_default_with(defaults::categories))
    }

    /// Replace the whole categories collection
    pub fn set_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        self.write(CATEGORIES_KEY, categories)?;
        tracing::debug!("Stored {} categories", categories.len());
        self.notify(StoreChange::Categories);
        Ok(())
    }

    /// Site config, or the default config if none is stored
    pub fn get_config(&self) -> Result<SiteConfig, StoreError> {
        Ok(self.lookup(CONFIG_KEY)?.or_default_with(defaults::config))
    }

    /// Replace the site config
    pub fn set_config(&self, config: &SiteConfig) -> Result<(), StoreError> {
        self.write(CONFIG_KEY, config)?;
        self.notify(StoreChange::Config);
        Ok(())
    }

    /// Theme preference, dark unless `"light"` is stored
    ///
    /// The theme is stored as a bare string rather than JSON.
    pub fn get_theme(&self) -> Result<Theme, StoreError> {
        Ok(self
            .backend
            .get(THEME_KEY)?
            .map(|raw| Theme::from_stored(raw.trim()))
            .unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.backend.set(THEME_KEY, theme.as_str())?;
        self.notify(StoreChange::Theme);
        Ok(())
    }

    /// Record that the carousel has been built at least once
    pub fn mark_featured_initialized(&self) -> Result<(), StoreError> {
        self.backend.set(FEATURED_INITIALIZED_KEY, "1")
    }

    /// Remove every key. Later reads fall back to defaults.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.clear()?;
        for change in [
            StoreChange::Mods,
            StoreChange::Categories,
            StoreChange::Config,
            StoreChange::Theme,
        ] {
            self.notify(change);
        }
        Ok(())
    }

    /// Direct access to the backend, for raw reads and out-of-band writes
    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("subscribers", &self.change_tx.receiver_count())
            .finish()
    }
}
