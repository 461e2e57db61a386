// Page model - the named regions the catalog renders into
//
// Every region is an Option: `None` means the element is absent from the
// page. Renderers treat a missing non-critical element as "skip this step"
// and a missing critical container (categories, mods) as "abort this call".

use crate::models::{LooseId, Theme};
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

/// Icon shown on mod cards without an image
pub const GAMEPAD_ICON: &str = "fas fa-gamepad";

/// Badge shown on every carousel slide
pub const FEATURED_BADGE: &str = "Em Destaque";

/// Description shown on slides whose mod has none
pub const FALLBACK_DESCRIPTION: &str = "Confira este incrível mod!";

/// Placeholder for a category with no mods
pub const EMPTY_CATEGORY_TEXT: &str = "Nenhum mod nesta categoria.";

/// Placeholder for a filter set with no matches
pub const NO_RESULTS_TEXT: &str = "Nenhum mod encontrado.";

/// Errors raised while rendering into the page
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Page element not found: {0}")]
    MissingElement(&'static str),

    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Catalog,
}

impl Section {
    /// Text a navigation button label must contain to belong to this section
    pub fn nav_key(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Catalog => "mods",
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Section::Home),
            "mods" | "catalog" => Ok(Section::Catalog),
            other => Err(format!("unknown section: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegion {
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A `<select>`-like control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    pub value: String,
    pub options: Vec<SelectOption>,
}

impl Select {
    pub fn with_options(options: &[(&str, &str)]) -> Self {
        Self {
            value: String::new(),
            options: options
                .iter()
                .map(|(value, label)| SelectOption {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub category_id: LooseId,
    pub name: String,
    pub icon: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMedia {
    Image { url: String, alt: String },
    Icon(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModCard {
    pub mod_id: i64,
    pub title: String,
    pub category_name: String,
    pub downloads: u64,
    pub link: String,
    pub media: CardMedia,
}

/// Content of the mods container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GridContent {
    #[default]
    Blank,
    Cards(Vec<ModCard>),
    Placeholder(&'static str),
}

impl GridContent {
    pub fn cards(&self) -> &[ModCard] {
        match self {
            GridContent::Cards(cards) => cards,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideBackground {
    Image { url: String, alt: String },
    Gradient(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub badge: &'static str,
    pub title: String,
    pub description: String,
    pub link: String,
    pub background: SlideBackground,
    pub active: bool,
}

/// Dot below the carousel; clicking it jumps to `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub target: usize,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselRegion {
    pub visible: bool,
    pub slides: Vec<Slide>,
    pub indicators: Vec<Indicator>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toggle {
    pub visible: bool,
}

/// Text slot in the stats panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatSlot {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatSlots {
    pub mods: Option<StatSlot>,
    pub featured: Option<StatSlot>,
    pub categories: Option<StatSlot>,
    pub top_download: Option<StatSlot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningBanner {
    pub visible: bool,
    pub text: String,
}

/// The whole page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub theme: Theme,
    pub home_section: Option<SectionRegion>,
    pub catalog_section: Option<SectionRegion>,
    pub nav_buttons: Vec<NavButton>,
    pub search_input: Option<String>,
    pub category_select: Option<Select>,
    pub featured_select: Option<Select>,
    pub categories: Option<Vec<CategoryCard>>,
    pub mods: Option<GridContent>,
    pub carousel: Option<CarouselRegion>,
    pub prev_button: Option<Toggle>,
    pub next_button: Option<Toggle>,
    pub stats: StatSlots,
    pub warning: Option<WarningBanner>,
}

impl Page {
    /// A page with every region present, as the site's markup provides it
    pub fn standard() -> Self {
        let slot = || Some(StatSlot::default());

        Self {
            theme: Theme::Dark,
            home_section: Some(SectionRegion::default()),
            catalog_section: Some(SectionRegion::default()),
            nav_buttons: vec![
                NavButton {
                    label: "Home".to_string(),
                    active: false,
                },
                NavButton {
                    label: "Mods".to_string(),
                    active: false,
                },
            ],
            search_input: Some(String::new()),
            category_select: Some(Select::with_options(&[("", "Todas as categorias")])),
            featured_select: Some(Select::with_options(&[
                ("", "Todos"),
                (crate::services::FEATURED_ONLY, "Em destaque"),
            ])),
            categories: Some(Vec::new()),
            mods: Some(GridContent::Blank),
            carousel: Some(CarouselRegion::default()),
            prev_button: Some(Toggle::default()),
            next_button: Some(Toggle::default()),
            stats: StatSlots {
                mods: slot(),
                featured: slot(),
                categories: slot(),
                top_download: slot(),
            },
            warning: Some(WarningBanner::default()),
        }
    }

    /// The section currently marked active, if any
    pub fn active_section(&self) -> Option<Section> {
        if self.catalog_section.as_ref().is_some_and(|s| s.active) {
            Some(Section::Catalog)
        } else if self.home_section.as_ref().is_some_and(|s| s.active) {
            Some(Section::Home)
        } else {
            None
        }
    }

    pub fn is_section_active(&self, section: Section) -> bool {
        let region = match section {
            Section::Home => &self.home_section,
            Section::Catalog => &self.catalog_section,
        };
        region.as_ref().is_some_and(|r| r.active)
    }

    /// Titles of the slides currently rendered in the carousel
    pub fn slide_titles(&self) -> Vec<&str> {
        self.carousel
            .as_ref()
            .map(|c| c.slides.iter().map(|s| s.title.as_str()).collect())
            .unwrap_or_default()
    }

    /// Index of the slide marked active, if any
    pub fn active_slide(&self) -> Option<usize> {
        self.carousel
            .as_ref()
            .and_then(|c| c.slides.iter().position(|s| s.active))
    }

    /// One-line-per-region text dump, used for logging the rendered state
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let section = match self.active_section() {
            Some(Section::Home) => "home",
            Some(Section::Catalog) => "mods",
            None => "none",
        };
        let _ = writeln!(out, "section={} theme={}", section, self.theme.as_str());

        if let Some(cards) = &self.categories {
            let names: Vec<String> = cards
                .iter()
                .map(|c| {
                    if c.active {
                        format!("[{}]", c.name)
                    } else {
                        c.name.clone()
                    }
                })
                .collect();
            let _ = writeln!(out, "categories: {}", names.join(", "));
        }

        match &self.mods {
            Some(GridContent::Cards(cards)) => {
                for card in cards {
                    let _ = writeln!(
                        out,
                        "mod #{} {} ({}) downloads={}",
                        card.mod_id, card.title, card.category_name, card.downloads
                    );
                }
            }
            Some(GridContent::Placeholder(text)) => {
                let _ = writeln!(out, "mods: {}", text);
            }
            _ => {}
        }

        if let Some(carousel) = &self.carousel {
            if carousel.visible {
                let _ = writeln!(
                    out,
                    "carousel: {} slides, active={:?}",
                    carousel.slides.len(),
                    self.active_slide()
                );
            }
        }

        let stat = |slot: &Option<StatSlot>| {
            slot.as_ref()
                .map(|s| s.text.clone())
                .unwrap_or_else(|| "-".to_string())
        };
        let _ = writeln!(
            out,
            "stats: mods={} featured={} categories={} top={}",
            stat(&self.stats.mods),
            stat(&self.stats.featured),
            stat(&self.stats.categories),
            stat(&self.stats.top_download)
        );

        if let Some(warning) = self.warning.as_ref().filter(|w| w.visible) {
            let _ = writeln!(out, "warning: {}", warning.text);
        }

        out
    }
}
