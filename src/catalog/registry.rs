//! Startup-built catalog registry. Built once per catalog dump, shared via
//! Arc across the evaluator, search engine, and API handlers; refreshed by
//! rebuilding wholesale (never mutated in place).

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::item::{is_cosmetic, load_items, RawItem, DEFAULT_CATALOG_PATH};
use crate::catalog::normalize::{
    build_character_profiles, build_modifier_profiles, build_weapon_profiles,
};
use crate::catalog::profiles::{CharacterProfile, ModifierProfile, WeaponProfile};

const MOD_SLOTS_PER_LIST: i32 = 8;
const WEAPON_SLOTS: i32 = 3;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegistryCounts {
    pub characters: usize,
    pub weapons: usize,
    pub mods: usize,
}

/// The three typed registries plus sorted name lists for deterministic
/// sampling and listing.
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    characters: HashMap<String, CharacterProfile>,
    weapons: HashMap<String, WeaponProfile>,
    mods: HashMap<String, ModifierProfile>,
    character_names: Vec<String>,
    weapon_names: Vec<String>,
    mod_names: Vec<String>,
    search_space: f64,
}

impl CatalogRegistry {
    pub fn from_items(items: &[RawItem]) -> Self {
        let characters = build_character_profiles(items);
        let weapons = build_weapon_profiles(items);
        let mods = build_modifier_profiles(items);

        let mut character_names: Vec<String> = characters.keys().cloned().collect();
        let mut weapon_names: Vec<String> = weapons.keys().cloned().collect();
        let mut mod_names: Vec<String> = mods.keys().cloned().collect();
        character_names.sort();
        weapon_names.sort();
        mod_names.sort();

        CatalogRegistry {
            characters,
            weapons,
            mods,
            character_names,
            weapon_names,
            mod_names,
            search_space: search_space(items),
        }
    }

    /// Load the default on-disk catalog dump and build the registry. Missing
    /// or unreadable catalog yields an empty registry, not an error.
    pub fn load_default() -> Arc<Self> {
        Self::load(DEFAULT_CATALOG_PATH)
    }

    pub fn load(path: &str) -> Arc<Self> {
        let items = load_items(path).unwrap_or_default();
        Arc::new(Self::from_items(&items))
    }

    pub fn character(&self, name: &str) -> Option<&CharacterProfile> {
        self.characters.get(name)
    }

    pub fn weapon(&self, name: &str) -> Option<&WeaponProfile> {
        self.weapons.get(name)
    }

    pub fn modifier(&self, name: &str) -> Option<&ModifierProfile> {
        self.mods.get(name)
    }

    pub fn character_names(&self) -> &[String] {
        &self.character_names
    }

    pub fn weapon_names(&self) -> &[String] {
        &self.weapon_names
    }

    pub fn mod_names(&self) -> &[String] {
        &self.mod_names
    }

    pub fn counts(&self) -> RegistryCounts {
        RegistryCounts {
            characters: self.character_names.len(),
            weapons: self.weapon_names.len(),
            mods: self.mod_names.len(),
        }
    }

    /// Full loadout search space (characters x weapons^3 x mods^8 over
    /// non-cosmetic items), computed at build time. Display/estimation only;
    /// overflows u64 for any realistic catalog, hence f64.
    pub fn search_space(&self) -> f64 {
        self.search_space
    }
}

fn search_space(items: &[RawItem]) -> f64 {
    let characters = items
        .iter()
        .filter(|item| item.category == crate::catalog::normalize::CHARACTER_CATEGORY)
        .filter(|item| !is_cosmetic(item))
        .count() as f64;
    let weapons = items
        .iter()
        .filter(|item| matches!(item.category.as_str(), "Primary" | "Secondary" | "Melee"))
        .filter(|item| !is_cosmetic(item))
        .count() as f64;
    let mods = items
        .iter()
        .filter(|item| item.category == crate::catalog::normalize::MODIFIER_CATEGORY)
        .filter(|item| !is_cosmetic(item))
        .count() as f64;

    characters * weapons.powi(WEAPON_SLOTS) * mods.powi(MOD_SLOTS_PER_LIST)
}

/// Compact display for combination counts: K/M/B/T suffixes, then scientific
/// notation above 1e15.
pub fn format_large_number(value: f64) -> String {
    if value < 1_000.0 {
        return format!("{value}");
    }
    if value < 1_000_000.0 {
        return format!("{:.1}K", value / 1_000.0);
    }
    if value < 1_000_000_000.0 {
        return format!("{:.1}M", value / 1_000_000.0);
    }
    if value < 1_000_000_000_000.0 {
        return format!("{:.1}B", value / 1_000_000_000.0);
    }
    if value < 1_000_000_000_000_000.0 {
        return format!("{:.1}T", value / 1_000_000_000_000.0);
    }
    let exponent = value.log10().floor() as i64;
    let mantissa = value / 10f64.powi(exponent as i32);
    format!("{mantissa:.2}e{exponent}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture_items() -> Vec<RawItem> {
        serde_json::from_value(json!([
            {"category": "Warframes", "name": "Excalibur"},
            {"category": "Primary", "name": "Braton"},
            {"category": "Secondary", "name": "Lato"},
            {"category": "Melee", "name": "Skana"},
            {"category": "Mods", "name": "Serration",
             "levelStats": [{"stats": [{"stat": "Damage", "value": 165.0}]}]},
            {"category": "Misc", "name": "Prisma Skin"}
        ]))
        .unwrap()
    }

    #[test]
    fn registry_builds_all_three_registries_with_sorted_names() {
        let registry = CatalogRegistry::from_items(&fixture_items());
        let counts = registry.counts();
        assert_eq!(counts.characters, 1);
        assert_eq!(counts.weapons, 3);
        assert_eq!(counts.mods, 1);
        assert_eq!(registry.weapon_names(), ["Braton", "Lato", "Skana"]);
        assert!(registry.weapon("Braton").is_some());
        assert!(registry.weapon("Prisma Skin").is_none());
    }

    #[test]
    fn search_space_counts_non_cosmetic_items_only() {
        let registry = CatalogRegistry::from_items(&fixture_items());
        // 1 character x 3^3 weapons x 1^8 mods
        assert_eq!(registry.search_space(), 27.0);
    }

    #[test]
    fn large_numbers_format_with_suffix_then_scientific() {
        assert_eq!(format_large_number(0.0), "0");
        assert_eq!(format_large_number(42.0), "42");
        assert_eq!(format_large_number(1_500.0), "1.5K");
        assert_eq!(format_large_number(2_500_000.0), "2.5M");
        assert_eq!(format_large_number(3_000_000_000.0), "3.0B");
        assert_eq!(format_large_number(4_200_000_000_000.0), "4.2T");
        assert_eq!(format_large_number(1.23e18), "1.23e18");
    }
}
