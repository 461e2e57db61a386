use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application settings from `modshelf.yaml`
///
/// Every field has a default so a partial (or missing) file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Key-value storage file, relative to the config directory unless absolute
    #[serde(rename = "Storage File", default = "default_storage_file")]
    pub storage_file: Utf8PathBuf,

    /// Seed document location: a file path or an `http(s)://` URL
    #[serde(rename = "Seed Source", default = "default_seed_source")]
    pub seed_source: String,

    #[serde(rename = "Sync Interval Ms", default = "default_sync_interval_ms")]
    pub sync_interval_ms: u64,

    #[serde(rename = "Rotation Interval Ms", default = "default_rotation_interval_ms")]
    pub rotation_interval_ms: u64,

    #[serde(rename = "Rebuild Cooldown Ms", default = "default_rebuild_cooldown_ms")]
    pub rebuild_cooldown_ms: u64,

    #[serde(rename = "Max Featured", default = "default_max_featured")]
    pub max_featured: usize,

    #[serde(rename = "Catalog Settle Ms", default = "default_catalog_settle_ms")]
    pub catalog_settle_ms: u64,

    #[serde(rename = "Home Settle Ms", default = "default_home_settle_ms")]
    pub home_settle_ms: u64,

    #[serde(rename = "Log Dir", default = "default_log_dir")]
    pub log_dir: Utf8PathBuf,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            storage_file: default_storage_file(),
            seed_source: default_seed_source(),
            sync_interval_ms: default_sync_interval_ms(),
            rotation_interval_ms: default_rotation_interval_ms(),
            rebuild_cooldown_ms: default_rebuild_cooldown_ms(),
            max_featured: default_max_featured(),
            catalog_settle_ms: default_catalog_settle_ms(),
            home_settle_ms: default_home_settle_ms(),
            log_dir: default_log_dir(),
            debug_mode: false,
        }
    }
}

/// Shortest period a repeating timer accepts; tokio intervals reject zero
const MIN_TIMER_PERIOD_MS: u64 = 1;

impl AppSettings {
    /// Replace zero timer periods with their defaults.
    ///
    /// # Returns
    /// The names of the fields that were replaced
    pub fn normalize(&mut self) -> Vec<&'static str> {
        let mut replaced = Vec::new();
        if self.sync_interval_ms == 0 {
            self.sync_interval_ms = default_sync_interval_ms();
            replaced.push("Sync Interval Ms");
        }
        if self.rotation_interval_ms == 0 {
            self.rotation_interval_ms = default_rotation_interval_ms();
            replaced.push("Rotation Interval Ms");
        }
        replaced
    }

    /// Periodic sync period, never shorter than 1ms
    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms.max(MIN_TIMER_PERIOD_MS))
    }

    /// Carousel rotation period, never shorter than 1ms
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms.max(MIN_TIMER_PERIOD_MS))
    }

    pub fn rebuild_cooldown(&self) -> Duration {
        Duration::from_millis(self.rebuild_cooldown_ms)
    }

    pub fn catalog_settle(&self) -> Duration {
        Duration::from_millis(self.catalog_settle_ms)
    }

    pub fn home_settle(&self) -> Duration {
        Duration::from_millis(self.home_settle_ms)
    }
}

fn default_storage_file() -> Utf8PathBuf {
    Utf8PathBuf::from("storage.json")
}

fn default_seed_source() -> String {
    "data.json".to_string()
}

fn default_sync_interval_ms() -> u64 {
    5000
}

fn default_rotation_interval_ms() -> u64 {
    4000
}

fn default_rebuild_cooldown_ms() -> u64 {
    5000
}

fn default_max_featured() -> usize {
    5
}

fn default_catalog_settle_ms() -> u64 {
    150
}

fn default_home_settle_ms() -> u64 {
    100
}

fn default_log_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("logs")
}
