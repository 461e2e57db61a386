//! Data models for the Modshelf catalog.
//!
//! - [`Mod`], [`Category`], [`SiteConfig`]: the three stored collections, in the
//!   JSON shape the admin page writes them
//! - [`SeedDocument`]: the static document used to seed an empty store
//! - [`Theme`]: persisted colour scheme
//! - [`AppSettings`]: process settings loaded from `modshelf.yaml`
//!
//! # Architecture Note
//!
//! Stored models derive `Serialize`/`Deserialize` and are read and written
//! wholesale through [`Store`](crate::store::Store). Nothing here holds
//! runtime state.

pub mod catalog;
pub mod settings;

pub use catalog::{
    Category, FALLBACK_CATEGORY_NAME, FALLBACK_GRADIENT, LooseId, Mod, SeedDocument, SiteConfig,
    Theme,
};
pub use settings::AppSettings;
