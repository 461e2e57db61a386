use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Background used for carousel slides whose mod has no image.
pub const FALLBACK_GRADIENT: &str = "linear-gradient(45deg, #2b1055, #7597de)";

/// Category name shown when a mod points at a category that does not exist.
pub const FALLBACK_CATEGORY_NAME: &str = "Geral";

/// Identifier that compares loosely, the way the admin page writes them.
///
/// Category ids arrive as JSON numbers from the seed file but as strings from
/// form controls (`<select>` values), so `1` and `"1"` must be treated as equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseId {
    Number(i64),
    Text(String),
}

impl LooseId {
    /// Compare two ids with numeric coercion between the number and string forms.
    ///
    /// A blank string coerces to zero, and anything that is not a number after
    /// trimming never matches a numeric id.
    pub fn loosely_eq(&self, other: &LooseId) -> bool {
        match (self, other) {
            (LooseId::Number(a), LooseId::Number(b)) => a == b,
            (LooseId::Text(a), LooseId::Text(b)) => a == b,
            (LooseId::Number(n), LooseId::Text(s)) | (LooseId::Text(s), LooseId::Number(n)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return *n == 0;
                }
                trimmed
                    .parse::<f64>()
                    .map(|value| value == *n as f64)
                    .unwrap_or(false)
            }
        }
    }
}

impl From<i64> for LooseId {
    fn from(value: i64) -> Self {
        LooseId::Number(value)
    }
}

impl From<&str> for LooseId {
    fn from(value: &str) -> Self {
        match value.parse::<LooseId>() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

impl FromStr for LooseId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(n) => LooseId::Number(n),
            Err(_) => LooseId::Text(s.to_string()),
        })
    }
}

impl fmt::Display for LooseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseId::Number(n) => write!(f, "{}", n),
            LooseId::Text(s) => f.write_str(s),
        }
    }
}

/// A catalog entry as stored under `rb_mods`.
///
/// Field names follow the stored JSON written by the admin page. Unknown
/// fields are kept in `extra` so that a download increment, which rewrites
/// the whole collection, never drops data this crate does not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub titulo: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagem: Option<String>,

    pub categoria: LooseId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub destaque: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub downloads: u64,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Mod {
    /// Build a mod with the required fields and everything else defaulted.
    pub fn new(id: i64, titulo: impl Into<String>, categoria: impl Into<LooseId>) -> Self {
        Self {
            id,
            titulo: titulo.into(),
            descricao: None,
            link: String::new(),
            imagem: None,
            categoria: categoria.into(),
            destaque: false,
            downloads: 0,
            extra: serde_json::Map::new(),
        }
    }

    /// Image URL, treating an empty string the same as no image.
    pub fn image_url(&self) -> Option<&str> {
        self.imagem.as_deref().filter(|url| !url.is_empty())
    }

    /// Description, treating an empty string the same as no description.
    pub fn description(&self) -> Option<&str> {
        self.descricao.as_deref().filter(|text| !text.is_empty())
    }
}

/// A category as stored under `rb_cats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: LooseId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
}

impl Category {
    pub fn new(id: impl Into<LooseId>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}

/// Site-wide settings edited from the admin page, stored under `rb_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub site_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub site_logo_url: String,

    #[serde(default = "default_carousel_enabled")]
    pub carousel_enabled: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub warning_message: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            site_logo_url: String::new(),
            carousel_enabled: true,
            warning_message: String::new(),
        }
    }
}

impl SiteConfig {
    /// Warning text to display, if any remains after trimming.
    pub fn active_warning(&self) -> Option<&str> {
        let trimmed = self.warning_message.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(self.warning_message.as_str())
        }
    }
}

/// Deserialize a value, reading JSON `null` the same as an absent field.
///
/// The admin page writes `null` for counters and text it never filled in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_site_name() -> String {
    "Real bypass".to_string()
}

fn default_carousel_enabled() -> bool {
    true
}

/// Colour scheme persisted under `rb_theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything other than `"light"` is dark.
    pub fn from_stored(value: &str) -> Self {
        if value == "light" { Theme::Light } else { Theme::Dark }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Static document used to seed an empty store on first start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub mods: Option<Vec<Mod>>,

    #[serde(default)]
    pub categories: Option<Vec<Category>>,

    #[serde(default)]
    pub config: Option<SiteConfig>,
}
