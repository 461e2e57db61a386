// Carousel engine - featured slides with rotation, cool-down and change detection
//
// Rebuilding the slides restarts the CSS-style slide animation and jumps back
// to the first slide, so the engine avoids it whenever it can: inside the
// cool-down window nothing structural happens, and if the featured titles are
// unchanged only the active marker and button visibility are refreshed.

use super::bridge::{EventBridge, TimerSlot, UiEvent};
use super::page::{
    FALLBACK_DESCRIPTION, FEATURED_BADGE, Indicator, Page, RenderError, Slide, SlideBackground,
};
use crate::models::{FALLBACK_GRADIENT, Mod};
use crate::services::select_featured;
use std::time::Duration;
use tokio::time::Instant;

/// What a call to [`CarouselEngine::build_featured`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No featured mods; the carousel is hidden
    Hidden,
    /// Inside the cool-down window; only counts and buttons were refreshed
    CooledDown,
    /// Same titles as already rendered; only markers and buttons were refreshed
    Unchanged,
    /// Slides and indicators were rebuilt from scratch
    Rebuilt,
}

/// Timing and size limits for the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSettings {
    pub max_featured: usize,
    pub rotation_interval: Duration,
    pub rebuild_cooldown: Duration,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            max_featured: 5,
            rotation_interval: Duration::from_millis(4000),
            rebuild_cooldown: Duration::from_millis(5000),
        }
    }
}

impl From<&crate::models::AppSettings> for CarouselSettings {
    fn from(settings: &crate::models::AppSettings) -> Self {
        Self {
            max_featured: settings.max_featured,
            rotation_interval: settings.rotation_interval(),
            rebuild_cooldown: settings.rebuild_cooldown(),
        }
    }
}

/// Carousel state: current slide, slide count, last build time and the rotation timer
#[derive(Debug)]
pub struct CarouselEngine {
    settings: CarouselSettings,
    current_slide: usize,
    total_slides: usize,
    last_build: Option<Instant>,
    rotation: TimerSlot,
    bridge: Option<EventBridge>,
}

impl CarouselEngine {
    pub fn new(settings: CarouselSettings) -> Self {
        Self {
            settings,
            current_slide: 0,
            total_slides: 0,
            last_build: None,
            rotation: TimerSlot::new(),
            bridge: None,
        }
    }

    /// Deliver rotation ticks through `bridge` instead of only arming the timer slot
    pub fn with_bridge(mut self, bridge: EventBridge) -> Self {
        self.bridge = Some(bridge);
        self
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    pub fn last_build(&self) -> Option<Instant> {
        self.last_build
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_running()
    }

    /// Stop rotation and forget all state, including the cool-down timestamp
    pub fn reset(&mut self) {
        self.rotation.cancel();
        self.current_slide = 0;
        self.total_slides = 0;
        self.last_build = None;
    }

    /// Rebuild (or refresh) the carousel from the mods collection.
    ///
    /// # Arguments
    /// * `mods` - Full mods collection; featured ones are selected here
    /// * `page` - Page to render into
    /// * `now` - Current time, compared against the last build for the cool-down
    ///
    /// # Errors
    /// [`RenderError::MissingElement`] if the carousel region is absent
    pub fn build_featured(
        &mut self,
        mods: &[Mod],
        page: &mut Page,
        now: Instant,
    ) -> Result<BuildOutcome, RenderError> {
        let featured = select_featured(mods, self.settings.max_featured);
        let region = page
            .carousel
            .as_mut()
            .ok_or(RenderError::MissingElement("featured"))?;

        tracing::debug!(
            "Featured mods: {} of {} total",
            featured.len(),
            mods.len()
        );

        if featured.is_empty() {
            region.visible = false;
            region.slides.clear();
            region.indicators.clear();
            self.total_slides = 0;
            self.rotation.cancel();
            return Ok(BuildOutcome::Hidden);
        }

        region.visible = true;

        if let Some(last) = self.last_build {
            if now.saturating_duration_since(last) < self.settings.rebuild_cooldown {
                tracing::debug!("Skipping carousel rebuild inside cool-down");
                self.total_slides = featured.len();
                self.update_nav_buttons(page);
                return Ok(BuildOutcome::CooledDown);
            }
        }

        let unchanged = region.slides.len() == featured.len()
            && region
                .slides
                .iter()
                .zip(&featured)
                .all(|(slide, m)| slide.title == m.titulo);

        if unchanged {
            self.total_slides = featured.len();
            self.update_nav_buttons(page);
            self.mark_active(page);
            // Rotation may have been stopped by a section switch
            if self.total_slides > 1 && !self.rotation.is_running() {
                self.start_rotation();
            }
            self.last_build = Some(now);
            return Ok(BuildOutcome::Unchanged);
        }

        region.slides = featured
            .iter()
            .enumerate()
            .map(|(index, m)| build_slide(m, index == 0))
            .collect();
        region.indicators = (0..featured.len())
            .map(|index| Indicator {
                target: index,
                active: index == 0,
            })
            .collect();

        self.current_slide = 0;
        self.total_slides = featured.len();
        self.update_nav_buttons(page);

        if self.total_slides > 1 {
            self.start_rotation();
        } else {
            self.rotation.cancel();
        }

        self.last_build = Some(now);
        tracing::info!("Carousel rebuilt with {} slides", self.total_slides);
        Ok(BuildOutcome::Rebuilt)
    }

    /// Jump to an absolute slide index (indicator click).
    ///
    /// Out-of-range indexes are ignored.
    pub fn go_to_slide(&mut self, index: usize, page: &mut Page) {
        if index >= self.total_slides {
            tracing::debug!(
                "Ignoring jump to slide {} of {}",
                index,
                self.total_slides
            );
            return;
        }

        self.rotation.cancel();
        self.current_slide = index;
        self.mark_active(page);
        self.start_rotation();
    }

    /// Move `direction` slides forward (negative for backward), wrapping around.
    pub fn step(&mut self, direction: i32, page: &mut Page) {
        if self.total_slides == 0 {
            return;
        }

        self.rotation.cancel();
        let total = self.total_slides as i64;
        let next = (self.current_slide as i64 + direction as i64).rem_euclid(total);
        self.current_slide = next as usize;
        self.mark_active(page);
        self.start_rotation();
    }

    /// Handle a rotation tick.
    ///
    /// # Returns
    /// `true` if the slide advanced; stale ticks from a replaced timer and
    /// ticks with fewer than two slides do nothing
    pub fn on_rotation_tick(&mut self, generation: u64, page: &mut Page) -> bool {
        if !self.rotation.is_current(generation) {
            tracing::debug!("Ignoring stale rotation tick (generation {})", generation);
            return false;
        }
        if self.total_slides <= 1 {
            return false;
        }

        self.current_slide = (self.current_slide + 1) % self.total_slides;
        self.mark_active(page);
        true
    }

    /// Stop automatic rotation.
    pub fn stop_rotation(&mut self) {
        self.rotation.cancel();
    }

    /// Generation of the most recently started rotation timer
    pub fn rotation_generation(&self) -> u64 {
        self.rotation.generation()
    }

    fn start_rotation(&mut self) {
        self.rotation.start(
            self.bridge.as_ref(),
            self.settings.rotation_interval,
            |generation| UiEvent::RotateTick { generation },
        );
    }

    fn mark_active(&self, page: &mut Page) {
        let Some(region) = page.carousel.as_mut() else {
            return;
        };

        for (index, slide) in region.slides.iter_mut().enumerate() {
            slide.active = index == self.current_slide;
        }
        for (index, indicator) in region.indicators.iter_mut().enumerate() {
            indicator.active = index == self.current_slide;
        }
    }

    fn update_nav_buttons(&self, page: &mut Page) {
        let visible = self.total_slides > 1;
        for (button, name) in [
            (&mut page.prev_button, "prev-btn"),
            (&mut page.next_button, "next-btn"),
        ] {
            match button {
                Some(button) => button.visible = visible,
                None => tracing::warn!("Carousel button {} not found, skipping", name),
            }
        }
    }
}

impl Default for CarouselEngine {
    fn default() -> Self {
        Self::new(CarouselSettings::default())
    }
}

fn build_slide(m: &Mod, active: bool) -> Slide {
    let background = match m.image_url() {
        Some(url) => SlideBackground::Image {
            url: url.to_string(),
            alt: m.titulo.clone(),
        },
        None => SlideBackground::Gradient(FALLBACK_GRADIENT),
    };

    Slide {
        badge: FEATURED_BADGE,
        title: m.titulo.clone(),
        description: m
            .description()
            .unwrap_or(FALLBACK_DESCRIPTION)
            .to_string(),
        link: m.link.clone(),
        background,
        active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn featured(id: i64, title: &str) -> Mod {
        let mut m = Mod::new(id, title, 1);
        m.destaque = true;
        m
    }

    fn three_featured() -> Vec<Mod> {
        vec![featured(1, "A"), featured(2, "B"), featured(3, "C")]
    }

    #[test]
    fn test_build_hides_when_no_featured() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();

        let outcome = engine
            .build_featured(&[Mod::new(1, "A", 1)], &mut page, Instant::now())
            .unwrap();

        assert_eq!(outcome, BuildOutcome::Hidden);
        assert_eq!(engine.total_slides(), 0);
        assert!(!page.carousel.as_ref().unwrap().visible);
        assert!(!engine.is_rotating());
    }

    #[test]
    fn test_build_caps_at_five() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        let mods: Vec<Mod> = (0..8).map(|i| featured(i, &format!("M{}", i))).collect();

        engine.build_featured(&mods, &mut page, Instant::now()).unwrap();

        assert_eq!(engine.total_slides(), 5);
        assert_eq!(page.slide_titles(), vec!["M0", "M1", "M2", "M3", "M4"]);
        assert_eq!(page.carousel.as_ref().unwrap().indicators.len(), 5);
    }

    #[test]
    fn test_single_slide_hides_buttons_and_does_not_rotate() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();

        let outcome = engine
            .build_featured(&[featured(1, "A")], &mut page, Instant::now())
            .unwrap();

        assert_eq!(outcome, BuildOutcome::Rebuilt);
        assert_eq!(engine.total_slides(), 1);
        assert!(!page.prev_button.as_ref().unwrap().visible);
        assert!(!page.next_button.as_ref().unwrap().visible);
        assert!(!engine.is_rotating());
    }

    #[test]
    fn test_rebuild_starts_rotation_and_shows_buttons() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();

        engine
            .build_featured(&three_featured(), &mut page, Instant::now())
            .unwrap();

        assert!(engine.is_rotating());
        assert!(page.prev_button.as_ref().unwrap().visible);
        assert_eq!(page.active_slide(), Some(0));
    }

    #[test]
    fn test_cooldown_skips_rebuild() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        let start = Instant::now();

        engine.build_featured(&three_featured(), &mut page, start).unwrap();
        engine.step(1, &mut page);

        let changed = vec![featured(9, "X"), featured(8, "Y")];
        let outcome = engine
            .build_featured(&changed, &mut page, start + Duration::from_millis(1000))
            .unwrap();

        assert_eq!(outcome, BuildOutcome::CooledDown);
        assert_eq!(engine.total_slides(), 2);
        assert_eq!(engine.current_slide(), 1);
        // Slides are left as they were
        assert_eq!(page.slide_titles(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unchanged_titles_keep_current_slide() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        let start = Instant::now();

        engine.build_featured(&three_featured(), &mut page, start).unwrap();
        engine.go_to_slide(2, &mut page);

        let mut same = three_featured();
        same[0].downloads = 500;
        let later = start + Duration::from_secs(6);
        let outcome = engine.build_featured(&same, &mut page, later).unwrap();

        assert_eq!(outcome, BuildOutcome::Unchanged);
        assert_eq!(engine.current_slide(), 2);
        assert_eq!(page.active_slide(), Some(2));
        assert_eq!(engine.last_build(), Some(later));
    }

    #[test]
    fn test_changed_titles_rebuild_and_reset() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        let start = Instant::now();

        engine.build_featured(&three_featured(), &mut page, start).unwrap();
        engine.go_to_slide(2, &mut page);

        let changed = vec![featured(1, "A"), featured(2, "B2"), featured(3, "C")];
        let outcome = engine
            .build_featured(&changed, &mut page, start + Duration::from_secs(6))
            .unwrap();

        assert_eq!(outcome, BuildOutcome::Rebuilt);
        assert_eq!(engine.current_slide(), 0);
        assert_eq!(page.slide_titles(), vec!["A", "B2", "C"]);
    }

    #[test]
    fn test_step_wraps_both_ways() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        engine
            .build_featured(&three_featured(), &mut page, Instant::now())
            .unwrap();

        engine.step(-1, &mut page);
        assert_eq!(engine.current_slide(), 2);
        engine.step(1, &mut page);
        assert_eq!(engine.current_slide(), 0);
        assert!(page.carousel.as_ref().unwrap().indicators[0].active);
    }

    #[test]
    fn test_rotation_tick_advances_and_ignores_stale() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        engine
            .build_featured(&three_featured(), &mut page, Instant::now())
            .unwrap();

        let stale = engine.rotation_generation();
        engine.step(1, &mut page);
        let current = engine.rotation_generation();
        assert_ne!(stale, current);

        assert!(!engine.on_rotation_tick(stale, &mut page));
        assert_eq!(engine.current_slide(), 1);

        assert!(engine.on_rotation_tick(current, &mut page));
        assert!(engine.on_rotation_tick(current, &mut page));
        assert_eq!(engine.current_slide(), 0);
        assert_eq!(page.active_slide(), Some(0));
    }

    #[test]
    fn test_go_to_slide_out_of_range_ignored() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        engine
            .build_featured(&three_featured(), &mut page, Instant::now())
            .unwrap();

        engine.go_to_slide(7, &mut page);
        assert_eq!(engine.current_slide(), 0);
    }

    #[test]
    fn test_slide_content_fallbacks() {
        let mut with_image = featured(1, "A");
        with_image.imagem = Some("https://img/a.png".to_string());
        with_image.descricao = Some("Desc".to_string());

        let slide = build_slide(&with_image, true);
        assert_eq!(slide.badge, FEATURED_BADGE);
        assert_eq!(slide.description, "Desc");
        assert!(matches!(slide.background, SlideBackground::Image { .. }));

        let slide = build_slide(&featured(2, "B"), false);
        assert_eq!(slide.description, FALLBACK_DESCRIPTION);
        assert_eq!(slide.background, SlideBackground::Gradient(FALLBACK_GRADIENT));
    }

    #[test]
    fn test_missing_region_is_error() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        page.carousel = None;

        let err = engine
            .build_featured(&three_featured(), &mut page, Instant::now())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingElement("featured")));
    }

    #[test]
    fn test_reset() {
        let mut engine = CarouselEngine::default();
        let mut page = Page::standard();
        engine
            .build_featured(&three_featured(), &mut page, Instant::now())
            .unwrap();

        engine.reset();
        assert_eq!(engine.total_slides(), 0);
        assert!(engine.last_build().is_none());
        assert!(!engine.is_rotating());
    }
}
