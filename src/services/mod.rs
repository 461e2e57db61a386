//! Services module - catalog logic with no page dependencies.
//!
//! # Components
//!
//! - [`catalog`]: pure selection over the mods collection
//!   - [`mods_in_category`]: category view (loose id comparison)
//!   - [`apply_filter_state`]: category, featured-only and title search combined
//!   - [`select_featured`]: carousel candidates
//!   - [`increment_downloads`]: in-memory counter bump used by download recording
//! - [`stats`]: [`CatalogStats`] aggregate counters for the stats panel
//! - [`seeder`]: one-time copy of the static seed document into an empty store
//!
//! Everything here takes collections as plain slices and returns records, so
//! it can be tested without a page. Rendering lives in [`crate::ui`].

pub mod catalog;
pub mod seeder;
pub mod stats;

pub use catalog::{
    FEATURED_ONLY, FilterState, apply_filter_state, category_name, increment_downloads,
    mods_in_category, select_featured,
};
pub use seeder::{SeedError, SeedReport, SeedSource, apply_seed, load_seed_document, seed_store};
pub use stats::{CatalogStats, TOP_TITLE_MAX_CHARS, truncate_title};
