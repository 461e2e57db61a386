//! Modshelf - catalog browser for mod listings
//!
//! Main entry point for the catalog process.
//!
//! # Overview
//!
//! This binary wires the library together. It initializes:
//! - Configuration loading ([`ConfigManager`])
//! - Logging infrastructure (file rotation + console output)
//! - A single-threaded tokio runtime (timers and the event loop)
//! - The file-backed [`Store`], seeded once from the seed document
//! - The [`CatalogController`] and its event channel
//!
//! # Execution Flow
//!
//! 1. Load `modshelf.yaml` from the config directory (`MODSHELF_CONFIG_DIR`
//!    or `Modshelf Data/`)
//! 2. Initialize logging → logs/modshelf.<date>
//! 3. Open the storage file and seed absent keys from the seed document
//! 4. Render the initial page and start periodic sync
//! 5. Process events until Ctrl-C
//! 6. Log render metrics and exit

use anyhow::{Context, Result};
use modshelf::services::{SeedSource, seed_store};
use modshelf::store::FileBackend;
use modshelf::{
    APP_NAME, CatalogController, ConfigManager, EventBridge, Metrics, Page, Store, UiEvent,
    VERSION,
};
use std::sync::Arc;

/// Default config directory when `MODSHELF_CONFIG_DIR` is not set
const DEFAULT_CONFIG_DIR: &str = "Modshelf Data";

fn main() -> Result<()> {
    let config_dir =
        std::env::var("MODSHELF_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config_manager = ConfigManager::new(&config_dir)?;
    let settings = config_manager.load_settings()?;

    let log_dir = config_manager.resolve_path(&settings.log_dir);
    let _log_guard = modshelf::logging::setup_logging_with_console(
        &log_dir,
        modshelf::logging::LOG_PREFIX,
        settings.debug_mode,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // Every handler runs on one task; a single thread is all the catalog needs
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let storage_path = config_manager.resolve_path(&settings.storage_file);
    let store = Store::new(Arc::new(FileBackend::open(&storage_path)?));
    tracing::info!("Store opened at {}", storage_path);

    let seed_source = match SeedSource::parse(&settings.seed_source) {
        SeedSource::File(path) => SeedSource::File(config_manager.resolve_path(&path)),
        other => other,
    };

    let metrics = Arc::new(Metrics::new());

    let controller = runtime.block_on(async {
        seed_store(&store, &seed_source).await;

        let (bridge, events) = EventBridge::new(tokio::runtime::Handle::current());

        let shutdown_bridge = bridge.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Ctrl-C received, shutting down");
                    shutdown_bridge.send(UiEvent::Shutdown);
                }
                Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
            }
        });

        let mut controller =
            CatalogController::new(store, Page::standard(), &settings, Arc::clone(&metrics))
                .with_bridge(bridge);
        controller.startup();
        controller.start_periodic_sync();
        tracing::info!("Initial page:\n{}", controller.page().summary());

        controller.run(events).await
    });

    tracing::info!("Final page:\n{}", controller.page().summary());
    metrics.log_summary();

    drop(controller);
    runtime.shutdown_timeout(std::time::Duration::from_secs(1));

    tracing::info!("Application shutdown complete");
    Ok(())
}
