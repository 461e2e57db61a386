use crate::models::SeedDocument;
use crate::store::{CATEGORIES_KEY, CONFIG_KEY, MODS_KEY, Store, StoreError};
use camino::Utf8PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Timeout for fetching a seed document over HTTP
const SEED_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the seed document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    File(Utf8PathBuf),
    Url(String),
}

impl SeedSource {
    /// Interpret a configured location: `http://` and `https://` are URLs,
    /// anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            SeedSource::Url(trimmed.to_string())
        } else {
            SeedSource::File(Utf8PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedSource::File(path) => write!(f, "{}", path),
            SeedSource::Url(url) => f.write_str(url),
        }
    }
}

/// Errors that can occur while loading the seed document
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch seed document: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Seed request returned status {0}")]
    Status(u16),

    #[error("Seed document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which keys a seeding pass wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub mods: bool,
    pub categories: bool,
    pub config: bool,
}

impl SeedReport {
    pub fn wrote_anything(&self) -> bool {
        self.mods || self.categories || self.config
    }
}

/// Load and parse the seed document.
pub async fn load_seed_document(source: &SeedSource) -> Result<SeedDocument, SeedError> {
    match source {
        SeedSource::File(path) => {
            let body = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&body)?)
        }
        SeedSource::Url(url) => {
            let client = reqwest::Client::builder()
                .timeout(SEED_FETCH_TIMEOUT)
                .build()?;
            let response = client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(SeedError::Status(response.status().as_u16()));
            }
            // A malformed body surfaces as an Http error from reqwest's decoder
            Ok(response.json::<SeedDocument>().await?)
        }
    }
}

/// Copy the document's fields into the store, only for keys that hold no value.
///
/// Each key is handled independently. Empty `mods`/`categories` lists in the
/// document are ignored; a present `config` is always eligible.
pub fn apply_seed(store: &Store, document: &SeedDocument) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();

    if let Some(mods) = document.mods.as_ref().filter(|m| !m.is_empty()) {
        if !store.has_value(MODS_KEY)? {
            tracing::info!("Seeding {} mods", mods.len());
            store.set_mods(mods)?;
            report.mods = true;
        }
    }

    if let Some(categories) = document.categories.as_ref().filter(|c| !c.is_empty()) {
        if !store.has_value(CATEGORIES_KEY)? {
            tracing::info!("Seeding {} categories", categories.len());
            store.set_categories(categories)?;
            report.categories = true;
        }
    }

    if let Some(config) = document.config.as_ref() {
        if !store.has_value(CONFIG_KEY)? {
            tracing::info!("Seeding site config");
            store.set_config(config)?;
            report.config = true;
        }
    }

    Ok(report)
}

/// Run the one-time startup seeding.
///
/// Never fails: a load or write error is logged and the store's own defaults
/// stand in.
pub async fn seed_store(store: &Store, source: &SeedSource) -> SeedReport {
    tracing::info!("Loading seed document from {}", source);

    let document = match load_seed_document(source).await {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Could not load seed document ({}), using stored data", e);
            return SeedReport::default();
        }
    };

    match apply_seed(store, &document) {
        Ok(report) => {
            if !report.wrote_anything() {
                tracing::debug!("Store already populated, seed document not applied");
            }
            report
        }
        Err(e) => {
            tracing::error!("Failed to write seed data: {}", e);
            SeedReport::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Mod, SiteConfig};

    #[test]
    fn test_seed_source_parse() {
        assert_eq!(
            SeedSource::parse("https://example.com/data.json"),
            SeedSource::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            SeedSource::parse("data.json"),
            SeedSource::File(Utf8PathBuf::from("data.json"))
        );
    }

    #[test]
    fn test_apply_seed_into_empty_store() {
        let store = Store::in_memory();
        let document = SeedDocument {
            mods: Some(vec![Mod::new(1, "A", 1)]),
            categories: Some(vec![Category::new(1, "Geral", "i")]),
            config: Some(SiteConfig::default()),
        };

        let report = apply_seed(&store, &document).unwrap();
        assert!(report.mods && report.categories && report.config);
        assert_eq!(store.get_mods().unwrap(), vec![Mod::new(1, "A", 1)]);
    }

    #[test]
    fn test_apply_seed_never_overwrites() {
        let store = Store::in_memory();
        store.set_mods(&[Mod::new(7, "Existing", 1)]).unwrap();

        let document = SeedDocument {
            mods: Some(vec![Mod::new(1, "A", 1)]),
            ..SeedDocument::default()
        };

        let report = apply_seed(&store, &document).unwrap();
        assert!(!report.mods);
        assert_eq!(store.get_mods().unwrap()[0].id, 7);
    }

    #[test]
    fn test_apply_seed_skips_empty_lists() {
        let store = Store::in_memory();
        let document = SeedDocument {
            mods: Some(Vec::new()),
            categories: Some(Vec::new()),
            config: None,
        };

        let report = apply_seed(&store, &document).unwrap();
        assert!(!report.wrote_anything());
        assert!(!store.has_value(MODS_KEY).unwrap());
    }

    #[tokio::test]
    async fn test_seed_store_missing_file_is_not_fatal() {
        let store = Store::in_memory();
        let report = seed_store(
            &store,
            &SeedSource::File(Utf8PathBuf::from("/nonexistent/data.json")),
        )
        .await;

        assert!(!report.wrote_anything());
        assert_eq!(store.get_categories().unwrap().len(), 1);
    }
}
