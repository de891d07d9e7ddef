//! Article categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The aisle an article belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArticleCategory {
    Electronic,
    Extraordinary,
    Drugstore,
    Fresh,
    Bakery,
    Meat,
    Milkproducts,
    Beverage,
    Sweets,
    Can,
}

/// The wire names of every category, in declaration order. This is the
/// permitted-symbol set of the `category` filter field.
pub const CATEGORY_NAMES: &[&str] = &[
    "ELECTRONIC",
    "EXTRAORDINARY",
    "DRUGSTORE",
    "FRESH",
    "BAKERY",
    "MEAT",
    "MILKPRODUCTS",
    "BEVERAGE",
    "SWEETS",
    "CAN",
];

impl ArticleCategory {
    /// The wire name of this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Electronic => "ELECTRONIC",
            Self::Extraordinary => "EXTRAORDINARY",
            Self::Drugstore => "DRUGSTORE",
            Self::Fresh => "FRESH",
            Self::Bakery => "BAKERY",
            Self::Meat => "MEAT",
            Self::Milkproducts => "MILKPRODUCTS",
            Self::Beverage => "BEVERAGE",
            Self::Sweets => "SWEETS",
            Self::Can => "CAN",
        }
    }
}

impl fmt::Display for ArticleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names no known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown article category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for ArticleCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ELECTRONIC" => Self::Electronic,
            "EXTRAORDINARY" => Self::Extraordinary,
            "DRUGSTORE" => Self::Drugstore,
            "FRESH" => Self::Fresh,
            "BAKERY" => Self::Bakery,
            "MEAT" => Self::Meat,
            "MILKPRODUCTS" => Self::Milkproducts,
            "BEVERAGE" => Self::Beverage,
            "SWEETS" => Self::Sweets,
            "CAN" => Self::Can,
            _ => return Err(UnknownCategory(s.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for name in CATEGORY_NAMES {
            let category: ArticleCategory = name.parse().unwrap();
            assert_eq!(category.as_str(), *name);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "CHEESE".parse::<ArticleCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("CHEESE".to_string()));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ArticleCategory::Milkproducts).unwrap();
        assert_eq!(json, "\"MILKPRODUCTS\"");
        let back: ArticleCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ArticleCategory::Milkproducts);
    }
}
