//! Static item catalog: categories, their sections, and the products listed
//! in each section.

mod rarity;

pub use rarity::Rarity;

use crate::markup::ColorCode;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::info;

const BUNDLED: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown rarity `{0}`")]
    UnknownRarity(String),
    #[error("duplicate product id `{0}`")]
    DuplicateProduct(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub bazaar_id: Option<String>,
    pub name: String,
    pub icon: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub enchanted: bool,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "descriptionColour", deserialize_with = "colour_code")]
    pub description_colour: ColorCode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "colour_code")]
    pub colour: ColorCode,
    #[serde(default)]
    pub sections: IndexMap<String, Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub categories: IndexMap<String, Category>,
}

/// Returned by [`Catalog::lookup`] for ids the catalog does not contain.
pub static UNKNOWN_ITEM: LazyLock<Product> = LazyLock::new(|| Product {
    id: String::new(),
    bazaar_id: None,
    name: "Unknown Item".into(),
    icon: "/assets/icons/unknown.png".into(),
    rarity: Rarity::Admin,
    enchanted: false,
    description: "This item does not exist in the bazaar data.".into(),
    description_colour: ColorCode::Red,
});

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED)
    }

    /// Loads the catalog at `path`, or the bundled one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(p) => {
                let body = std::fs::read_to_string(p).map_err(|source| CatalogError::Io {
                    path: p.to_path_buf(),
                    source,
                })?;
                Self::from_json(&body)?
            }
            None => Self::bundled()?,
        };
        info!(
            categories = catalog.categories.len(),
            products = catalog.products().count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json(body: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(body)?;
        let mut seen = HashSet::new();
        for p in catalog.products() {
            if !seen.insert(p.id.as_str()) {
                return Err(CatalogError::DuplicateProduct(p.id.clone()));
            }
        }
        Ok(catalog)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.categories
            .values()
            .flat_map(|c| c.sections.values())
            .flat_map(|s| s.products.iter())
    }

    /// First product with `id`, scanning categories and sections in order.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products().find(|p| p.id == id)
    }

    /// Like [`find`](Self::find) but never fails: stale or unknown ids
    /// resolve to the placeholder item.
    pub fn lookup(&self, id: &str) -> &Product {
        self.find(id).unwrap_or(&UNKNOWN_ITEM)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn section(&self, category: &str, section: &str) -> Option<&Section> {
        self.category(category)?.sections.get(section)
    }
}

fn colour_code<'de, D>(deserializer: D) -> Result<ColorCode, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => ColorCode::from_char(c)
            .ok_or_else(|| de::Error::custom(format!("unknown colour code `{s}`"))),
        _ => Err(de::Error::custom(format!("colour code must be one character, got `{s}`"))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SMALL: &str = r#"{
        "categories": {
            "farming": {
                "id": "farming", "name": "Farming", "colour": "e",
                "sections": {
                    "wheat": {
                        "id": "wheat", "name": "Wheat & Seeds",
                        "products": [
                            {"id": "wheat", "bazaarId": "WHEAT", "name": "Wheat",
                             "icon": "/assets/items/wheat.png", "rarity": "COMMON",
                             "description": "Grows on farmland.", "descriptionColour": "7"},
                            {"id": "enchanted_bread", "bazaarId": "ENCHANTED_BREAD",
                             "name": "Enchanted Bread", "icon": "/assets/items/enchanted_bread.png",
                             "rarity": "uncommon", "enchanted": true,
                             "description": "Crafted from wheat.", "descriptionColour": "7"}
                        ]
                    }
                }
            },
            "mining": {
                "id": "mining", "name": "Mining", "colour": "6",
                "sections": {
                    "diamond": {
                        "id": "diamond", "name": "Diamond",
                        "products": [
                            {"id": "diamond", "bazaarId": "DIAMOND", "name": "Diamond",
                             "icon": "/assets/items/diamond.png", "rarity": "COMMON",
                             "description": "Shiny.", "descriptionColour": "7"},
                            {"id": "retired_gem", "name": "Retired Gem",
                             "icon": "/assets/items/gem.png", "rarity": "Very Special",
                             "description": "No longer traded.", "descriptionColour": "8"}
                        ]
                    }
                }
            }
        }
    }"#;

    #[test]
    fn parses_and_preserves_order() {
        let c = Catalog::from_json(SMALL).unwrap();
        let ids: Vec<_> = c.categories.keys().cloned().collect();
        assert_eq!(ids, vec!["farming", "mining"]);
        assert_eq!(c.category("farming").unwrap().colour, ColorCode::Yellow);
        assert_eq!(c.products().count(), 4);
    }

    #[test]
    fn find_returns_exact_product() {
        let c = Catalog::from_json(SMALL).unwrap();
        let p = c.lookup("enchanted_bread");
        assert_eq!(p.name, "Enchanted Bread");
        assert_eq!(p.bazaar_id.as_deref(), Some("ENCHANTED_BREAD"));
        assert!(p.enchanted);
        assert_eq!(p.rarity, Rarity::Uncommon);
        assert_eq!(c.find("diamond").map(|p| p.icon.as_str()), Some("/assets/items/diamond.png"));
    }

    #[test]
    fn unknown_id_yields_placeholder() {
        let c = Catalog::from_json(SMALL).unwrap();
        assert!(c.find("nope").is_none());
        let p = c.lookup("nope");
        assert_eq!(p.name, "Unknown Item");
        assert_eq!(p.icon, "/assets/icons/unknown.png");
        assert_eq!(p.rarity, Rarity::Admin);
        assert_eq!(p.description_colour, ColorCode::Red);
        assert!(p.bazaar_id.is_none());
    }

    #[test]
    fn product_without_quote_key_is_still_listed() {
        let c = Catalog::from_json(SMALL).unwrap();
        let p = c.find("retired_gem").unwrap();
        assert!(p.bazaar_id.is_none());
        assert_eq!(p.rarity, Rarity::VerySpecial);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let body = SMALL.replace("\"id\": \"diamond\", \"bazaarId\"", "\"id\": \"wheat\", \"bazaarId\"");
        match Catalog::from_json(&body) {
            Err(CatalogError::DuplicateProduct(id)) => assert_eq!(id, "wheat"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_colour_and_rarity() {
        let bad_colour = SMALL.replace("\"colour\": \"e\"", "\"colour\": \"z\"");
        assert!(matches!(Catalog::from_json(&bad_colour), Err(CatalogError::Parse(_))));
        let bad_rarity = SMALL.replace("\"rarity\": \"uncommon\"", "\"rarity\": \"shiny\"");
        assert!(matches!(Catalog::from_json(&bad_rarity), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn bundled_catalog_is_valid() {
        let c = Catalog::bundled().unwrap();
        assert!(!c.categories.is_empty());
        assert!(c.products().all(|p| p.bazaar_id.is_some()));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Catalog::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
