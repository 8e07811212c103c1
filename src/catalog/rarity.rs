use super::CatalogError;
use crate::markup::{ColorCode, rarity_to_code};
use serde::Deserialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Divine,
    Special,
    VerySpecial,
    Ultimate,
    Admin,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Mythic => "MYTHIC",
            Rarity::Divine => "DIVINE",
            Rarity::Special => "SPECIAL",
            Rarity::VerySpecial => "VERY SPECIAL",
            Rarity::Ultimate => "ULTIMATE",
            Rarity::Admin => "ADMIN",
        }
    }

    pub fn color_code(self) -> ColorCode {
        rarity_to_code(self.label())
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rarity {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let r = match s.trim().to_lowercase().as_str() {
            "common" => Rarity::Common,
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            "mythic" => Rarity::Mythic,
            "divine" => Rarity::Divine,
            "special" => Rarity::Special,
            "very special" | "very_special" => Rarity::VerySpecial,
            "ultimate" => Rarity::Ultimate,
            "admin" => Rarity::Admin,
            _ => return Err(CatalogError::UnknownRarity(s.to_string())),
        };
        Ok(r)
    }
}

impl TryFrom<String> for Rarity {
    type Error = CatalogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
