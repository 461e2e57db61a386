use crate::models::{Category, Mod};

/// Longest top-download title shown before truncation
pub const TOP_TITLE_MAX_CHARS: usize = 20;

/// Aggregate counters shown in the stats panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_mods: usize,
    pub featured: usize,
    pub categories: usize,
    /// Truncated title of the most downloaded mod; `None` for an empty catalog
    pub top_download: Option<String>,
}

impl CatalogStats {
    /// Compute the counters from the current collections.
    ///
    /// Ties on downloads go to the first mod in collection order.
    pub fn compute(mods: &[Mod], categories: &[Category]) -> Self {
        let top_download = mods
            .iter()
            .reduce(|best, m| if m.downloads > best.downloads { m } else { best })
            .map(|m| truncate_title(&m.titulo));

        Self {
            total_mods: mods.len(),
            featured: mods.iter().filter(|m| m.destaque).count(),
            categories: categories.len(),
            top_download,
        }
    }
}

/// Cut a title to [`TOP_TITLE_MAX_CHARS`] characters, adding "..." if anything was cut
pub fn truncate_title(title: &str) -> String {
    let mut chars = title.chars();
    let head: String = chars.by_ref().take(TOP_TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
