// UI module - page model, renderers and the controller event loop
//
// This module contains:
// - Page: the named regions the catalog renders into
// - render: functions writing records into the page
// - CarouselEngine: featured slides, rotation and rebuild throttling
// - EventBridge: timers and callers feeding UiEvents to the controller
// - CatalogController: owns the page and reacts to events and store writes

pub mod bridge;
pub mod carousel;
pub mod controller;
pub mod page;
pub mod render;

pub use bridge::{EventBridge, TimerSlot, Ticker, UiEvent};
pub use carousel::{BuildOutcome, CarouselEngine, CarouselSettings};
pub use controller::{CatalogController, GridView};
pub use page::{Page, RenderError, Section};
