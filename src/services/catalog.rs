use crate::models::{Category, FALLBACK_CATEGORY_NAME, LooseId, Mod};

/// Value of the featured-only select that restricts results to featured mods
pub const FEATURED_ONLY: &str = "featured";

/// Transient filter values read from the search box and the two selects
///
/// Rebuilt from the form controls on every filter application; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Category select value; empty means all categories
    pub category_filter: String,
    /// Lower-cased search text; empty means no title filter
    pub search_term: String,
    /// Featured select value; [`FEATURED_ONLY`] restricts to featured mods
    pub featured_filter: String,
}

impl FilterState {
    /// Capture the current control values.
    pub fn from_controls(search: &str, category: &str, featured: &str) -> Self {
        Self {
            category_filter: category.to_string(),
            search_term: search.to_lowercase(),
            featured_filter: featured.to_string(),
        }
    }

    /// Clear every filter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether no narrowing is applied at all
    pub fn is_unfiltered(&self) -> bool {
        self.category_filter.is_empty()
            && self.search_term.is_empty()
            && self.featured_filter != FEATURED_ONLY
    }
}

/// Mods whose category loosely equals `category_id`, in collection order
pub fn mods_in_category<'a>(mods: &'a [Mod], category_id: &LooseId) -> Vec<&'a Mod> {
    mods.iter()
        .filter(|m| m.categoria.loosely_eq(category_id))
        .collect()
}

/// Apply category, featured and title filters, in that order
///
/// The title match is a case-insensitive substring test.
pub fn apply_filter_state<'a>(mods: &'a [Mod], filters: &FilterState) -> Vec<&'a Mod> {
    let category = (!filters.category_filter.is_empty())
        .then(|| LooseId::Text(filters.category_filter.clone()));
    let featured_only = filters.featured_filter == FEATURED_ONLY;
    let needle = filters.search_term.to_lowercase();

    mods.iter()
        .filter(|m| category.as_ref().is_none_or(|c| m.categoria.loosely_eq(c)))
        .filter(|m| !featured_only || m.destaque)
        .filter(|m| needle.is_empty() || m.titulo.to_lowercase().contains(&needle))
        .collect()
}

/// Up to `max` featured mods, in collection order
pub fn select_featured(mods: &[Mod], max: usize) -> Vec<&Mod> {
    mods.iter().filter(|m| m.destaque).take(max).collect()
}

/// Display name of the category `id`, falling back to "Geral"
pub fn category_name<'a>(categories: &'a [Category], id: &LooseId) -> &'a str {
    categories
        .iter()
        .find(|c| c.id.loosely_eq(id))
        .map(|c| c.name.as_str())
        .unwrap_or(FALLBACK_CATEGORY_NAME)
}

/// Increment the download counter of the mod with exactly `mod_id`
///
/// # Returns
/// The new count, or `None` if no mod has that id (nothing is changed)
pub fn increment_downloads(mods: &mut [Mod], mod_id: i64) -> Option<u64> {
    let target = mods.iter_mut().find(|m| m.id == mod_id)?;
    target.downloads = target.downloads.saturating_add(1);
    Some(target.downloads)
}
