// Renderers - write records into the page model
//
// These functions take already-selected records and update page regions.
// They never read the store; selection happens in `services`.

use super::page::{
    CardMedia, CategoryCard, GAMEPAD_ICON, GridContent, ModCard, Page, RenderError, Section,
    SelectOption, StatSlot,
};
use crate::models::{Category, Mod, SiteConfig, Theme};
use crate::services::{CatalogStats, category_name};

/// Render one card per category, marking the first active.
///
/// If the rendered cards already match `categories` (same ids, names and
/// icons in the same order) nothing is touched, so the card the user last
/// clicked stays active across background refreshes.
///
/// # Returns
/// `true` if the cards were replaced
pub fn render_category_cards(
    page: &mut Page,
    categories: &[Category],
) -> Result<bool, RenderError> {
    let container = page
        .categories
        .as_mut()
        .ok_or(RenderError::MissingElement("categories-container"))?;

    let unchanged = container.len() == categories.len()
        && container.iter().zip(categories).all(|(card, cat)| {
            card.category_id == cat.id && card.name == cat.name && card.icon == cat.icon
        });
    if unchanged {
        return Ok(false);
    }

    *container = categories
        .iter()
        .enumerate()
        .map(|(index, cat)| CategoryCard {
            category_id: cat.id.clone(),
            name: cat.name.clone(),
            icon: cat.icon.clone(),
            active: index == 0,
        })
        .collect();

    tracing::debug!("Rendered {} category cards", categories.len());
    Ok(true)
}

/// Mark the category card at `index` active and every other card inactive.
pub fn mark_category_active(page: &mut Page, index: usize) {
    if let Some(cards) = page.categories.as_mut() {
        for (i, card) in cards.iter_mut().enumerate() {
            card.active = i == index;
        }
    }
}

/// Build the card shown for one mod in the grid.
pub fn mod_card(m: &Mod, categories: &[Category]) -> ModCard {
    let media = match m.image_url() {
        Some(url) => CardMedia::Image {
            url: url.to_string(),
            alt: m.titulo.clone(),
        },
        None => CardMedia::Icon(GAMEPAD_ICON),
    };

    ModCard {
        mod_id: m.id,
        title: m.titulo.clone(),
        category_name: category_name(categories, &m.categoria).to_string(),
        downloads: m.downloads,
        link: m.link.clone(),
        media,
    }
}

/// Render `mods` as cards, or `empty_text` when there are none.
///
/// # Returns
/// `true` if the grid content changed
pub fn render_mod_grid(
    page: &mut Page,
    mods: &[&Mod],
    categories: &[Category],
    empty_text: &'static str,
) -> Result<bool, RenderError> {
    let container = page
        .mods
        .as_mut()
        .ok_or(RenderError::MissingElement("mods-container"))?;

    let content = if mods.is_empty() {
        GridContent::Placeholder(empty_text)
    } else {
        GridContent::Cards(mods.iter().map(|m| mod_card(m, categories)).collect())
    };

    if *container == content {
        return Ok(false);
    }

    *container = content;
    Ok(true)
}

fn write_slot(slot: &mut Option<StatSlot>, name: &'static str, text: String) {
    match slot {
        Some(slot) => slot.text = text,
        None => tracing::warn!("Stat slot {} not found, skipping", name),
    }
}

/// Write the stats panel.
///
/// The top-download slot is left at its prior value when there is no top mod.
pub fn render_stats(page: &mut Page, stats: &CatalogStats) {
    write_slot(&mut page.stats.mods, "stat-mods", stats.total_mods.to_string());
    write_slot(
        &mut page.stats.featured,
        "stat-featured",
        stats.featured.to_string(),
    );
    write_slot(
        &mut page.stats.categories,
        "stat-cats",
        stats.categories.to_string(),
    );

    if let Some(top) = &stats.top_download {
        write_slot(&mut page.stats.top_download, "stat-topdownload", top.clone());
    }
}

/// Show the warning banner if the config carries a non-blank message, hide it otherwise.
pub fn render_warning(page: &mut Page, config: &SiteConfig) -> Result<bool, RenderError> {
    let banner = page
        .warning
        .as_mut()
        .ok_or(RenderError::MissingElement("site-warning"))?;

    match config.active_warning() {
        Some(message) => {
            banner.text = message.to_string();
            banner.visible = true;
        }
        None => banner.visible = false,
    }

    Ok(banner.visible)
}

/// Fill the category select with one option per category.
///
/// The leading "all categories" option (empty value) is kept; everything
/// after it is replaced.
pub fn populate_category_filter(
    page: &mut Page,
    categories: &[Category],
) -> Result<(), RenderError> {
    let select = page
        .category_select
        .as_mut()
        .ok_or(RenderError::MissingElement("filter-category"))?;

    select.options.retain(|o| o.value.is_empty());
    select
        .options
        .extend(categories.iter().map(|cat| SelectOption {
            value: cat.id.to_string(),
            label: cat.name.clone(),
        }));

    Ok(())
}

/// Activate one top-level section and the navigation button whose label
/// contains the section's name.
pub fn activate_section(page: &mut Page, section: Section) {
    for region in [&mut page.home_section, &mut page.catalog_section] {
        match region {
            Some(region) => region.active = false,
            None => tracing::warn!("Section region missing while switching sections"),
        }
    }

    let target = match section {
        Section::Home => page.home_section.as_mut(),
        Section::Catalog => page.catalog_section.as_mut(),
    };
    if let Some(region) = target {
        region.active = true;
    }

    let key = section.nav_key();
    for button in &mut page.nav_buttons {
        button.active = button.label.trim().to_lowercase().contains(key);
    }
}

/// Apply a colour scheme to the page.
pub fn apply_theme(page: &mut Page, theme: Theme) {
    page.theme = theme;
}
