// Modshelf - catalog browser for mod listings
//
// This is the library crate containing the store, catalog services and the
// page controller. The binary crate (main.rs) wires them to a tokio event loop.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod store;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use metrics::Metrics;
pub use models::{AppSettings, Category, LooseId, Mod, SiteConfig, Theme};
pub use store::{Store, StoreChange, StoreError};
pub use ui::{CatalogController, EventBridge, Page, Section, UiEvent};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
