// Catalog Controller - drives the page from UI events, timers and store writes
//
// This module contains the CatalogController which coordinates between:
// - Store (mods, categories, site config, theme)
// - Page (the rendered regions)
// - CarouselEngine (featured slides and rotation)
// - EventBridge (timers and callers feeding UiEvents)
//
// It handles:
// - Section switching with settle delays
// - Category and filter views of the mod grid
// - Download counting and the stats panel
// - Periodic sync and push reconciliation of store writes

use super::bridge::{EventBridge, TimerSlot, UiEvent};
use super::carousel::{BuildOutcome, CarouselEngine, CarouselSettings};
use super::page::{EMPTY_CATEGORY_TEXT, NO_RESULTS_TEXT, Page, RenderError, Section};
use super::render;
use crate::metrics::Metrics;
use crate::models::{AppSettings, LooseId, Theme};
use crate::services::{
    CatalogStats, FilterState, apply_filter_state, increment_downloads, mods_in_category,
};
use crate::store::{Store, StoreChange};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

/// Which query the mod grid currently shows
///
/// Push reconciliation re-runs this query when the mods or categories change,
/// so the grid keeps showing what the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum GridView {
    /// Mods of one category (category card click or section entry)
    Category(LooseId),
    /// Search box and filter selects
    Filtered,
}

/// Controller that owns the page and every piece of transient UI state
///
/// All handlers run on one task, one event at a time, so each
/// read-modify-write against the store completes before the next begins.
///
/// # Example
/// ```ignore
/// let store = Store::new(Arc::new(FileBackend::open("storage.json")?));
/// let (bridge, events) = EventBridge::new(tokio::runtime::Handle::current());
///
/// let mut controller = CatalogController::new(store, Page::standard(), &settings, metrics)
///     .with_bridge(bridge.clone());
/// controller.startup();
/// controller.start_periodic_sync();
/// controller.run(events).await;
/// ```
#[derive(Debug)]
pub struct CatalogController {
    store: Store,
    page: Page,
    carousel: CarouselEngine,
    filters: FilterState,
    settings: AppSettings,
    bridge: Option<EventBridge>,
    sync_timer: TimerSlot,
    metrics: Arc<Metrics>,
    last_view: Option<GridView>,
}

impl CatalogController {
    /// Create a headless controller
    ///
    /// Without a bridge no timer tasks are spawned and settle delays run
    /// inline, which is what tests want.
    ///
    /// # Arguments
    /// * `store` - Store the page is rendered from
    /// * `page` - Page to render into
    /// * `settings` - Timing and size limits
    /// * `metrics` - Shared render counters
    pub fn new(store: Store, page: Page, settings: &AppSettings, metrics: Arc<Metrics>) -> Self {
        Self {
            store,
            page,
            carousel: CarouselEngine::new(CarouselSettings::from(settings)),
            filters: FilterState::default(),
            settings: settings.clone(),
            bridge: None,
            sync_timer: TimerSlot::new(),
            metrics,
            last_view: None,
        }
    }

    /// Deliver timer ticks and settle delays through `bridge`
    pub fn with_bridge(mut self, bridge: EventBridge) -> Self {
        self.carousel = CarouselEngine::new(CarouselSettings::from(&self.settings))
            .with_bridge(bridge.clone());
        self.bridge = Some(bridge);
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mutable page access, for simulating user edits to form controls
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn carousel(&self) -> &CarouselEngine {
        &self.carousel
    }

    /// Filter values read by the last `apply_filters` call
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn last_view(&self) -> Option<&GridView> {
        self.last_view.as_ref()
    }

    pub fn is_syncing(&self) -> bool {
        self.sync_timer.is_running()
    }

    /// Initial render after seeding.
    ///
    /// Restores the theme, activates home, renders categories, carousel and
    /// stats, shows the first category's mods and fills the category select.
    pub fn startup(&mut self) {
        tracing::info!("Starting catalog");

        self.restore_theme();
        render::activate_section(&mut self.page, Section::Home);

        self.run_step("render categories", Self::render_categories);
        self.run_step("build featured", Self::build_featured);
        self.run_step("refresh stats", Self::refresh_stats);
        self.run_step("show first category", Self::show_first_category);
        self.run_step("populate category filter", Self::populate_category_filter);

        tracing::info!("Catalog started");
    }

    /// Switch to `section`.
    ///
    /// Rotation stops immediately; the section's refresh runs after its
    /// settle delay (catalog: full render, home: warning check).
    pub fn show_section(&mut self, section: Section) {
        tracing::debug!("Switching to section {:?}", section);

        self.carousel.stop_rotation();
        render::activate_section(&mut self.page, section);

        let delay = match section {
            Section::Home => self.settings.home_settle(),
            Section::Catalog => self.settings.catalog_settle(),
        };
        match &self.bridge {
            Some(bridge) => bridge.send_after(delay, UiEvent::SectionSettled(section)),
            None => self.on_section_settled(section),
        }
    }

    /// Refresh run once a section's settle delay has elapsed
    pub fn on_section_settled(&mut self, section: Section) {
        match section {
            Section::Home => {
                self.run_step("check warning", Self::check_warning);
            }
            Section::Catalog => {
                self.run_step("render categories", Self::render_categories);
                self.run_step("build featured", Self::build_featured);
                self.run_step("refresh stats", Self::refresh_stats);
                self.run_step("show first category", Self::show_first_category);
            }
        }
    }

    /// Render one card per category.
    ///
    /// # Returns
    /// `true` if the cards were replaced, `false` if they already matched
    pub fn render_categories(&mut self) -> Result<bool, RenderError> {
        let categories = self.store.get_categories()?;
        let changed = render::render_category_cards(&mut self.page, &categories)?;
        self.metrics.record_render(changed);
        Ok(changed)
    }

    /// Show the mods of one category.
    ///
    /// # Arguments
    /// * `category_id` - Category to show; numeric and string ids compare loosely
    /// * `card` - Index of the clicked category card, marked active if given
    ///
    /// # Returns
    /// Number of mods shown
    pub fn filter_by_category(
        &mut self,
        category_id: &LooseId,
        card: Option<usize>,
    ) -> Result<usize, RenderError> {
        if let Some(index) = card {
            render::mark_category_active(&mut self.page, index);
        }

        let mods = self.store.get_mods()?;
        let categories = self.store.get_categories()?;
        let selected = mods_in_category(&mods, category_id);
        tracing::debug!("Category {}: {} mods", category_id, selected.len());

        self.last_view = Some(GridView::Category(category_id.clone()));
        let changed =
            render::render_mod_grid(&mut self.page, &selected, &categories, EMPTY_CATEGORY_TEXT)?;
        self.metrics.record_render(changed);
        Ok(selected.len())
    }

    /// Read the search box and filter selects, then show the matching mods.
    ///
    /// # Returns
    /// Number of mods shown
    pub fn apply_filters(&mut self) -> Result<usize, RenderError> {
        let search = self.page.search_input.as_deref().unwrap_or_default();
        let category = self
            .page
            .category_select
            .as_ref()
            .map(|s| s.value.as_str())
            .unwrap_or_default();
        let featured = self
            .page
            .featured_select
            .as_ref()
            .map(|s| s.value.as_str())
            .unwrap_or_default();
        self.filters = FilterState::from_controls(search, category, featured);

        let mods = self.store.get_mods()?;
        let categories = self.store.get_categories()?;
        let selected = apply_filter_state(&mods, &self.filters);
        tracing::debug!("Filters {:?}: {} mods", self.filters, selected.len());

        self.last_view = Some(GridView::Filtered);
        let changed =
            render::render_mod_grid(&mut self.page, &selected, &categories, NO_RESULTS_TEXT)?;
        self.metrics.record_render(changed);
        Ok(selected.len())
    }

    /// Count one download of `mod_id` and refresh the stats panel.
    ///
    /// # Returns
    /// `false` if no mod has that id (nothing is written)
    pub fn record_download(&mut self, mod_id: i64) -> Result<bool, RenderError> {
        let mut mods = self.store.get_mods()?;
        let Some(downloads) = increment_downloads(&mut mods, mod_id) else {
            tracing::debug!("Download for unknown mod {}", mod_id);
            return Ok(false);
        };

        self.store.set_mods(&mods)?;
        self.metrics.record_download();
        tracing::debug!("Mod {} now has {} downloads", mod_id, downloads);

        self.refresh_stats()?;
        Ok(true)
    }

    /// Recompute and render the stats panel
    pub fn refresh_stats(&mut self) -> Result<CatalogStats, RenderError> {
        let mods = self.store.get_mods()?;
        let categories = self.store.get_categories()?;
        let stats = CatalogStats::compute(&mods, &categories);
        render::render_stats(&mut self.page, &stats);
        Ok(stats)
    }

    /// Show or hide the warning banner from the site config.
    ///
    /// # Returns
    /// Whether the banner is visible
    pub fn check_warning(&mut self) -> Result<bool, RenderError> {
        let config = self.store.get_config()?;
        render::render_warning(&mut self.page, &config)
    }

    /// Rebuild the featured carousel, subject to cool-down and change detection
    pub fn build_featured(&mut self) -> Result<BuildOutcome, RenderError> {
        let mods = self.store.get_mods()?;
        let outcome = self
            .carousel
            .build_featured(&mods, &mut self.page, Instant::now())?;

        let rebuilt = outcome == BuildOutcome::Rebuilt;
        self.metrics.record_carousel_build(rebuilt);
        if rebuilt {
            if let Err(e) = self.store.mark_featured_initialized() {
                tracing::debug!("Could not write featured marker: {}", e);
            }
        }
        Ok(outcome)
    }

    /// Jump to an absolute slide (indicator click)
    pub fn go_to_slide(&mut self, index: usize) {
        self.carousel.go_to_slide(index, &mut self.page);
    }

    /// Step the carousel forward or backward (prev/next buttons)
    pub fn step_slide(&mut self, direction: i32) {
        self.carousel.step(direction, &mut self.page);
    }

    /// Flip between light and dark and persist the choice
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.page.theme.toggled();
        render::apply_theme(&mut self.page, theme);
        if let Err(e) = self.store.set_theme(theme) {
            self.metrics.record_store_error();
            tracing::error!("Failed to save theme: {}", e);
        }
        tracing::debug!("Theme switched to {}", theme.as_str());
        theme
    }

    /// Apply the stored theme, dark if none or unreadable
    pub fn restore_theme(&mut self) {
        let theme = match self.store.get_theme() {
            Ok(theme) => theme,
            Err(e) => {
                self.metrics.record_store_error();
                tracing::error!("Failed to read theme: {}", e);
                Theme::default()
            }
        };
        render::apply_theme(&mut self.page, theme);
    }

    /// Fill the category select with the stored categories
    pub fn populate_category_filter(&mut self) -> Result<(), RenderError> {
        let categories = self.store.get_categories()?;
        render::populate_category_filter(&mut self.page, &categories)
    }

    /// Start the periodic sync timer. Does nothing if it is already running.
    pub fn start_periodic_sync(&mut self) {
        if self.sync_timer.is_running() {
            tracing::debug!("Periodic sync already running");
            return;
        }

        let interval = self.settings.sync_interval();
        self.sync_timer
            .start(self.bridge.as_ref(), interval, |_| UiEvent::SyncTick);
        tracing::info!("Periodic sync every {}ms", interval.as_millis());
    }

    /// Body of the periodic sync timer.
    ///
    /// Picks up writes made outside this process.
    pub fn sync_tick(&mut self) {
        self.metrics.record_sync_tick();

        self.run_step("render categories", Self::render_categories);
        self.run_step("build featured", Self::build_featured);
        self.run_step("refresh stats", Self::refresh_stats);

        if self.page.is_section_active(Section::Catalog) {
            self.run_step("apply filters", Self::apply_filters);
        }
        if self.page.is_section_active(Section::Home) {
            self.run_step("check warning", Self::check_warning);
        }
    }

    /// Reconcile the page after a write made through the store.
    pub fn on_store_change(&mut self, change: StoreChange) {
        tracing::debug!("Reconciling store change: {:?}", change);
        self.metrics.record_store_reconcile();

        match change {
            StoreChange::Mods => {
                self.run_step("build featured", Self::build_featured);
                self.run_step("refresh stats", Self::refresh_stats);
                self.run_step("refresh grid", Self::refresh_grid);
            }
            StoreChange::Categories => {
                self.run_step("render categories", Self::render_categories);
                self.run_step("populate category filter", Self::populate_category_filter);
                self.run_step("refresh stats", Self::refresh_stats);
                self.run_step("refresh grid", Self::refresh_grid);
            }
            StoreChange::Config => {
                if self.page.is_section_active(Section::Home) {
                    self.run_step("check warning", Self::check_warning);
                }
            }
            // Theme writes only come from toggle_theme, which already applied it
            StoreChange::Theme => {}
        }
    }

    /// Handle one event.
    ///
    /// # Returns
    /// `false` once the controller should stop
    pub fn handle_event(&mut self, event: UiEvent) -> bool {
        tracing::trace!("UI event: {:?}", event);

        match event {
            UiEvent::ShowSection(section) => self.show_section(section),
            UiEvent::SectionSettled(section) => self.on_section_settled(section),
            UiEvent::FilterByCategory { category_id, card } => {
                let result = self.filter_by_category(&category_id, card);
                self.report("filter by category", result);
            }
            UiEvent::ApplyFilters => {
                self.run_step("apply filters", Self::apply_filters);
            }
            UiEvent::SetSearch(text) => {
                match self.page.search_input.as_mut() {
                    Some(input) => *input = text,
                    None => tracing::warn!("Page element not found: search-input"),
                }
                self.run_step("apply filters", Self::apply_filters);
            }
            UiEvent::SetCategoryFilter(value) => {
                match self.page.category_select.as_mut() {
                    Some(select) => select.value = value,
                    None => tracing::warn!("Page element not found: filter-category"),
                }
                self.run_step("apply filters", Self::apply_filters);
            }
            UiEvent::SetFeaturedFilter(value) => {
                match self.page.featured_select.as_mut() {
                    Some(select) => select.value = value,
                    None => tracing::warn!("Page element not found: filter-featured"),
                }
                self.run_step("apply filters", Self::apply_filters);
            }
            UiEvent::RecordDownload(mod_id) => {
                self.run_step("record download", |c| c.record_download(mod_id));
            }
            UiEvent::StepSlide(direction) => self.step_slide(direction),
            UiEvent::GoToSlide(index) => self.go_to_slide(index),
            UiEvent::RotateTick { generation } => {
                self.carousel.on_rotation_tick(generation, &mut self.page);
            }
            UiEvent::SyncTick => self.sync_tick(),
            UiEvent::ToggleTheme => {
                self.toggle_theme();
            }
            UiEvent::Shutdown => return false,
        }

        true
    }

    /// Process events and store changes until shutdown.
    ///
    /// Stops on [`UiEvent::Shutdown`]. A bridged controller keeps its own
    /// sender (and its timers hold more), so only a headless controller can
    /// also stop because every sender was dropped.
    ///
    /// # Returns
    /// The stopped controller, so the final page can be inspected
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> Self {
        let mut changes = self.store.subscribe();
        let mut changes_open = true;
        tracing::info!("Catalog controller running");

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        tracing::info!("UI event channel closed - stopping controller");
                        break;
                    };
                    if !self.handle_event(event) {
                        tracing::info!("Shutdown requested");
                        break;
                    }
                }
                change = changes.recv(), if changes_open => match change {
                    Ok(change) => self.on_store_change(change),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "Store subscription lagged - {} changes were skipped, running a full sync",
                            skipped
                        );
                        self.sync_tick();
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Store change channel closed - relying on periodic sync");
                        changes_open = false;
                    }
                },
            }
        }

        self.shutdown();
        self
    }

    /// Stop every timer
    pub fn shutdown(&mut self) {
        self.carousel.stop_rotation();
        self.sync_timer.cancel();
        tracing::debug!("Final page state:\n{}", self.page.summary());
        tracing::info!("Catalog controller stopped");
    }

    /// Re-run whichever query the grid currently shows
    fn refresh_grid(&mut self) -> Result<usize, RenderError> {
        match self.last_view.clone() {
            Some(GridView::Category(id)) => self.filter_by_category(&id, None),
            Some(GridView::Filtered) => self.apply_filters(),
            None => Ok(0),
        }
    }

    /// Show the first category's mods, or the filter view if there are no categories
    fn show_first_category(&mut self) -> Result<usize, RenderError> {
        let categories = self.store.get_categories()?;
        match categories.first() {
            Some(first) => self.filter_by_category(&first.id, Some(0)),
            None => self.apply_filters(),
        }
    }

    /// Run one render step, logging its failure; the remaining steps still run
    fn run_step<T, F>(&mut self, step: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Self) -> Result<T, RenderError>,
    {
        let result = f(self);
        self.report(step, result)
    }

    fn report<T>(&self, step: &str, result: Result<T, RenderError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(RenderError::MissingElement(element)) => {
                self.metrics.record_missing_element();
                tracing::warn!("Skipping {}: page element {} not found", step, element);
                None
            }
            Err(RenderError::Store(e)) => {
                self.metrics.record_store_error();
                tracing::error!("Failed to {}: {}", step, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Mod, SiteConfig};
    use crate::store::MODS_KEY;
    use crate::ui::page::GridContent;
    use std::sync::atomic::Ordering;

    fn featured(id: i64, title: &str, category: i64) -> Mod {
        let mut m = Mod::new(id, title, category);
        m.destaque = true;
        m
    }

    fn controller_with(mods: &[Mod], categories: &[Category]) -> CatalogController {
        let store = Store::in_memory();
        store.set_mods(mods).unwrap();
        store.set_categories(categories).unwrap();
        CatalogController::new(
            store,
            Page::standard(),
            &AppSettings::default(),
            Arc::new(Metrics::new()),
        )
    }

    #[test]
    fn test_startup_renders_home_and_first_category() {
        let mut controller = controller_with(
            &[featured(1, "A", 1), Mod::new(2, "B", 2)],
            &[
                Category::new(1, "Carros", "fas fa-car"),
                Category::new(2, "Mapas", "fas fa-map"),
            ],
        );

        controller.startup();
        let page = controller.page();

        assert_eq!(page.active_section(), Some(Section::Home));
        assert!(page.nav_buttons[0].active);
        assert_eq!(page.categories.as_ref().unwrap().len(), 2);
        assert_eq!(page.mods.as_ref().unwrap().cards()[0].title, "A");
        assert_eq!(page.slide_titles(), vec!["A"]);
        assert_eq!(page.stats.mods.as_ref().unwrap().text, "2");
        assert_eq!(page.category_select.as_ref().unwrap().options.len(), 3);
        assert_eq!(
            controller.last_view(),
            Some(&GridView::Category(LooseId::Number(1)))
        );
    }

    #[test]
    fn test_startup_without_categories_applies_filters() {
        let mut controller = controller_with(&[Mod::new(1, "A", 1)], &[]);

        controller.startup();

        assert_eq!(controller.last_view(), Some(&GridView::Filtered));
        assert_eq!(controller.page().mods.as_ref().unwrap().cards().len(), 1);
    }

    #[test]
    fn test_filter_by_category_marks_card_and_shows_placeholder() {
        let mut controller = controller_with(
            &[Mod::new(1, "A", 1)],
            &[
                Category::new(1, "Carros", "fas fa-car"),
                Category::new(2, "Mapas", "fas fa-map"),
            ],
        );
        controller.render_categories().unwrap();

        let shown = controller
            .filter_by_category(&LooseId::from("2"), Some(1))
            .unwrap();

        assert_eq!(shown, 0);
        let cards = controller.page().categories.as_ref().unwrap();
        assert!(!cards[0].active);
        assert!(cards[1].active);
        assert_eq!(
            controller.page().mods,
            Some(GridContent::Placeholder(EMPTY_CATEGORY_TEXT))
        );
    }

    #[test]
    fn test_apply_filters_reads_controls() {
        let mut controller = controller_with(
            &[
                featured(1, "Fast Car", 1),
                Mod::new(2, "Slow Car", 1),
                featured(3, "Map", 2),
            ],
            &[Category::new(1, "Carros", "fas fa-car")],
        );

        controller.page_mut().search_input = Some("CAR".to_string());
        controller.page_mut().featured_select.as_mut().unwrap().value = "featured".to_string();

        assert_eq!(controller.apply_filters().unwrap(), 1);
        assert_eq!(controller.filters().search_term, "car");
        assert_eq!(
            controller.page().mods.as_ref().unwrap().cards()[0].title,
            "Fast Car"
        );
    }

    #[test]
    fn test_record_download_counts_and_refreshes_stats() {
        let mut controller = controller_with(&[Mod::new(1, "A", 1), Mod::new(2, "B", 1)], &[]);

        assert!(controller.record_download(2).unwrap());
        assert!(controller.record_download(2).unwrap());
        assert!(!controller.record_download(99).unwrap());

        let mods = controller.store().get_mods().unwrap();
        assert_eq!(mods[1].downloads, 2);
        assert_eq!(mods[0].downloads, 0);
        assert_eq!(
            controller.page().stats.top_download.as_ref().unwrap().text,
            "B"
        );
    }

    #[test]
    fn test_malformed_mods_are_reported_not_fatal() {
        let mut controller = controller_with(&[], &[]);
        controller.store().backend().set(MODS_KEY, "{oops").unwrap();

        let err = controller.record_download(1).unwrap_err();
        assert!(matches!(err, RenderError::Store(_)));

        controller.sync_tick();
        assert!(controller.metrics.store_errors.load(Ordering::Relaxed) >= 1);
    }

    #[test]
    fn test_missing_mods_container_is_counted() {
        let mut controller = controller_with(&[Mod::new(1, "A", 1)], &[]);
        controller.page_mut().mods = None;

        controller.handle_event(UiEvent::ApplyFilters);

        assert_eq!(
            controller.metrics.missing_elements.load(Ordering::Relaxed),
            1
        );
    }

    #[test]
    fn test_show_section_headless_runs_settle_inline() {
        let mut controller = controller_with(&[], &[]);
        let mut config = SiteConfig::default();
        config.warning_message = "Maintenance".to_string();
        controller.store().set_config(&config).unwrap();

        controller.show_section(Section::Home);

        let warning = controller.page().warning.as_ref().unwrap();
        assert!(warning.visible);
        assert_eq!(warning.text, "Maintenance");
    }

    #[test]
    fn test_toggle_and_restore_theme() {
        let mut controller = controller_with(&[], &[]);
        controller.restore_theme();
        assert_eq!(controller.page().theme, Theme::Dark);

        assert_eq!(controller.toggle_theme(), Theme::Light);
        assert_eq!(controller.store().get_theme().unwrap(), Theme::Light);

        assert_eq!(controller.toggle_theme(), Theme::Dark);
        assert_eq!(controller.store().get_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_start_periodic_sync_once() {
        let mut controller = controller_with(&[], &[]);
        assert!(!controller.is_syncing());

        controller.start_periodic_sync();
        controller.start_periodic_sync();
        assert!(controller.is_syncing());

        controller.shutdown();
        assert!(!controller.is_syncing());
    }

    #[test]
    fn test_store_change_refreshes_last_view() {
        let mut controller = controller_with(
            &[Mod::new(1, "A", 1)],
            &[Category::new(1, "Carros", "fas fa-car")],
        );
        controller.startup();

        let mut mods = controller.store().get_mods().unwrap();
        mods.push(Mod::new(2, "B", 1));
        controller.store().set_mods(&mods).unwrap();
        controller.on_store_change(StoreChange::Mods);

        assert_eq!(controller.page().mods.as_ref().unwrap().cards().len(), 2);
        assert_eq!(controller.page().stats.mods.as_ref().unwrap().text, "2");
    }

    #[test]
    fn test_shutdown_event_stops() {
        let mut controller = controller_with(&[], &[]);
        assert!(controller.handle_event(UiEvent::SyncTick));
        assert!(!controller.handle_event(UiEvent::Shutdown));
    }
}
