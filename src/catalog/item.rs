//! Raw catalog items as delivered by the remote game-data service.
//! Loosely typed on purpose: records vary per category and the normalizer
//! applies documented defaults for anything missing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CATALOG_PATH: &str = "data/catalog/items.json";

/// One named stat on an item. Values arrive as JSON numbers or strings
/// ("25", "25%"); see [stat_value_f64].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStat {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// One stat entry inside a modifier rank tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierStat {
    pub stat: String,
    #[serde(default)]
    pub value: Value,
}

/// One rank tier of a modifier. Tiers are ordered lowest rank first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelStatTier {
    #[serde(default)]
    pub stats: Vec<TierStat>,
}

/// Ability reference: either a bare name or a record carrying one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AbilityRef {
    Name(String),
    Detailed { name: String },
}

impl AbilityRef {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed { name } => name,
        }
    }
}

/// Raw catalog record. Only the fields the normalizer reads are modeled;
/// everything else in the upstream payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub stats: Option<Vec<RawStat>>,
    #[serde(default, rename = "levelStats")]
    pub level_stats: Option<Vec<LevelStatTier>>,
    #[serde(default)]
    pub polarity: Option<String>,
    #[serde(default, rename = "baseDrain")]
    pub base_drain: Option<f64>,
    #[serde(default, rename = "fusionLimit")]
    pub fusion_limit: Option<u32>,
    #[serde(default)]
    pub abilities: Vec<AbilityRef>,
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default, rename = "productCategory")]
    pub product_category: Option<String>,
}

/// Interpret a raw stat value as f64: numbers pass through, strings parse
/// their leading float prefix ("25%" -> 25.0). Returns None on a miss so the
/// caller can apply its documented default.
pub fn stat_value_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_leading_f64(text),
        _ => None,
    }
}

fn parse_leading_f64(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    trimmed[..end].parse().ok()
}

const COSMETIC_KEYWORDS: [&str; 11] = [
    "Skin",
    "Syandana",
    "Sigil",
    "Ephemera",
    "Armor",
    "Helmet",
    "Decoration",
    "Glyph",
    "Emblem",
    "Color",
    "Palette",
];

/// Cosmetic screen used by the search-space estimator. Case-sensitive
/// substring match over name/type/productCategory/category, matching the
/// upstream keyword convention.
pub fn is_cosmetic(item: &RawItem) -> bool {
    COSMETIC_KEYWORDS.iter().any(|keyword| {
        item.name.contains(keyword)
            || item.item_type.as_deref().is_some_and(|t| t.contains(keyword))
            || item
                .product_category
                .as_deref()
                .is_some_and(|p| p.contains(keyword))
            || item.category.contains(keyword)
    })
}

/// Load a raw item dump from disk. Returns None if the file is missing or
/// not a JSON array of items.
pub fn load_items(path: impl AsRef<Path>) -> Option<Vec<RawItem>> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stat_value_parses_numbers_and_leading_floats() {
        assert_eq!(stat_value_f64(&json!(2.5)), Some(2.5));
        assert_eq!(stat_value_f64(&json!("25%")), Some(25.0));
        assert_eq!(stat_value_f64(&json!("  -1.5x")), Some(-1.5));
        assert_eq!(stat_value_f64(&json!("fast")), None);
        assert_eq!(stat_value_f64(&json!(null)), None);
    }

    #[test]
    fn cosmetic_screen_matches_any_descriptive_field() {
        let skin: RawItem = serde_json::from_value(json!({
            "category": "Misc",
            "name": "Prisma Skin"
        }))
        .unwrap();
        let weapon: RawItem = serde_json::from_value(json!({
            "category": "Primary",
            "name": "Braton"
        }))
        .unwrap();

        assert!(is_cosmetic(&skin));
        assert!(!is_cosmetic(&weapon));
    }

    #[test]
    fn abilities_accept_bare_names_and_records() {
        let item: RawItem = serde_json::from_value(json!({
            "category": "Warframes",
            "name": "Saryn",
            "abilities": ["Spores", {"name": "Miasma", "description": "aoe"}]
        }))
        .unwrap();

        let names: Vec<&str> = item.abilities.iter().map(AbilityRef::name).collect();
        assert_eq!(names, vec!["Spores", "Miasma"]);
    }
}
