//! Normalize raw catalog items into the three typed registries.
//! Tolerant by design: missing stats fall back to documented defaults and no
//! input ever raises an error here.

use std::collections::HashMap;

use crate::catalog::item::{stat_value_f64, AbilityRef, RawItem};
use crate::catalog::profiles::{
    CharacterProfile, DamageMap, DamageType, ModKind, ModifierProfile, WeaponCategory,
    WeaponProfile,
};

pub const CHARACTER_CATEGORY: &str = "Warframes";
pub const MODIFIER_CATEGORY: &str = "Mods";

const DEFAULT_CHARACTER_STAT: f64 = 100.0;
const DEFAULT_SPRINT_SPEED: f64 = 1.0;
const DEFAULT_CRIT_CHANCE: f64 = 0.1;
const DEFAULT_CRIT_MULTIPLIER: f64 = 2.0;
const DEFAULT_STATUS_CHANCE: f64 = 0.1;
const DEFAULT_FIRE_RATE: f64 = 1.0;
const DEFAULT_ACCURACY: f64 = 100.0;
const DEFAULT_RELOAD: f64 = 2.0;
const DEFAULT_MAGAZINE: f64 = 30.0;
const DEFAULT_TOTAL_DAMAGE: f64 = 30.0;
const FALLBACK_DAMAGE_PER_TYPE: f64 = 10.0;

/// Tolerant stat lookup: case-insensitive substring match on the stat name,
/// first match wins, default on miss or unparseable value.
pub fn extract_stat(item: &RawItem, stat_name: &str, default: f64) -> f64 {
    let Some(stats) = item.stats.as_ref() else {
        return default;
    };
    let needle = stat_name.to_lowercase();
    stats
        .iter()
        .find(|stat| stat.name.to_lowercase().contains(&needle))
        .and_then(|stat| stat_value_f64(&stat.value))
        .unwrap_or(default)
}

/// Per-type weapon damage. Items with no stat list get the flat fallback map;
/// items with stats but no physical damage get the total "damage" stat split
/// 40/30/30 across impact/puncture/slash.
fn extract_damage(item: &RawItem) -> DamageMap {
    let mut damage = DamageMap::new();
    if item.stats.is_none() {
        damage.insert(DamageType::Impact, FALLBACK_DAMAGE_PER_TYPE);
        damage.insert(DamageType::Puncture, FALLBACK_DAMAGE_PER_TYPE);
        damage.insert(DamageType::Slash, FALLBACK_DAMAGE_PER_TYPE);
        return damage;
    }

    for damage_type in DamageType::WEAPON_TYPES {
        damage.insert(damage_type, extract_stat(item, damage_type.as_str(), 0.0));
    }

    let physical = damage[&DamageType::Impact]
        + damage[&DamageType::Puncture]
        + damage[&DamageType::Slash];
    if physical == 0.0 {
        let total = extract_stat(item, "damage", DEFAULT_TOTAL_DAMAGE);
        damage.insert(DamageType::Impact, total * 0.4);
        damage.insert(DamageType::Puncture, total * 0.3);
        damage.insert(DamageType::Slash, total * 0.3);
    }

    damage
}

/// Normalize an effect name: fixed synonym table first, otherwise lowercased
/// with whitespace stripped so unrecognized effects still key consistently.
pub fn normalize_effect_name(stat_name: &str) -> String {
    let lowered = stat_name.to_lowercase();
    match lowered.as_str() {
        "damage" => "baseDamage".to_string(),
        "critical chance" => "critChance".to_string(),
        "critical damage" => "critMultiplier".to_string(),
        "status chance" => "statusChance".to_string(),
        "fire rate" => "fireRate".to_string(),
        "multishot" => "multishot".to_string(),
        "health" => "health".to_string(),
        "shield" => "shield".to_string(),
        "armor" => "armor".to_string(),
        "energy" => "energy".to_string(),
        _ => lowered.split_whitespace().collect(),
    }
}

const BASE_DAMAGE_KEYWORDS: [&str; 3] = ["serration", "hornet", "pressure"];
const MULTISHOT_KEYWORDS: [&str; 2] = ["split chamber", "barrel diffusion"];
const CRIT_CHANCE_KEYWORDS: [&str; 2] = ["point strike", "true steel"];
const CRIT_MULTIPLIER_KEYWORDS: [&str; 2] = ["vital sense", "organ shatter"];
const SURVIVABILITY_KEYWORDS: [&str; 2] = ["vitality", "redirection"];

/// Classify a modifier from name keywords. Listing/sorting aid only.
pub fn classify_modifier(name: &str) -> ModKind {
    let lowered = name.to_lowercase();
    let matches_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if matches_any(&BASE_DAMAGE_KEYWORDS) {
        ModKind::BaseDamage
    } else if matches_any(&MULTISHOT_KEYWORDS) {
        ModKind::Multishot
    } else if matches_any(&CRIT_CHANCE_KEYWORDS) {
        ModKind::CritChance
    } else if matches_any(&CRIT_MULTIPLIER_KEYWORDS) {
        ModKind::CritMultiplier
    } else if matches_any(&SURVIVABILITY_KEYWORDS) {
        ModKind::Survivability
    } else {
        ModKind::Utility
    }
}

pub fn build_character_profiles(items: &[RawItem]) -> HashMap<String, CharacterProfile> {
    items
        .iter()
        .filter(|item| item.category == CHARACTER_CATEGORY)
        .map(|item| {
            let profile = CharacterProfile {
                health: extract_stat(item, "health", DEFAULT_CHARACTER_STAT),
                shield: extract_stat(item, "shield", DEFAULT_CHARACTER_STAT),
                armor: extract_stat(item, "armor", DEFAULT_CHARACTER_STAT),
                energy: extract_stat(item, "energy", DEFAULT_CHARACTER_STAT),
                sprint_speed: extract_stat(item, "sprintSpeed", DEFAULT_SPRINT_SPEED),
                abilities: item
                    .abilities
                    .iter()
                    .map(|ability| AbilityRef::name(ability).to_string())
                    .collect(),
            };
            (item.name.clone(), profile)
        })
        .collect()
}

pub fn build_weapon_profiles(items: &[RawItem]) -> HashMap<String, WeaponProfile> {
    items
        .iter()
        .filter_map(|item| {
            let category = WeaponCategory::parse(&item.category)?;
            let profile = WeaponProfile {
                damage: extract_damage(item),
                crit_chance: extract_stat(item, "criticalChance", DEFAULT_CRIT_CHANCE),
                crit_multiplier: extract_stat(item, "criticalMultiplier", DEFAULT_CRIT_MULTIPLIER),
                status_chance: extract_stat(item, "procChance", DEFAULT_STATUS_CHANCE),
                fire_rate: extract_stat(item, "fireRate", DEFAULT_FIRE_RATE),
                accuracy: extract_stat(item, "accuracy", DEFAULT_ACCURACY),
                reload: extract_stat(item, "reloadTime", DEFAULT_RELOAD),
                magazine: extract_stat(item, "magazineSize", DEFAULT_MAGAZINE),
                category,
                weapon_type: item.item_type.clone(),
            };
            Some((item.name.clone(), profile))
        })
        .collect()
}

/// Flatten every rank tier into one effects map. Later tiers overwrite
/// earlier values per effect name: last write wins, and iteration must stay
/// tier order for score parity.
fn flatten_effects(item: &RawItem) -> HashMap<String, f64> {
    let mut effects = HashMap::new();
    let Some(tiers) = item.level_stats.as_ref() else {
        return effects;
    };
    for tier in tiers {
        for stat in &tier.stats {
            let value = stat_value_f64(&stat.value).unwrap_or(0.0);
            effects.insert(normalize_effect_name(&stat.stat), value);
        }
    }
    effects
}

pub fn build_modifier_profiles(items: &[RawItem]) -> HashMap<String, ModifierProfile> {
    items
        .iter()
        .filter(|item| item.category == MODIFIER_CATEGORY)
        .map(|item| {
            let profile = ModifierProfile {
                polarity: item.polarity.clone().unwrap_or_else(|| "None".to_string()),
                capacity: item.base_drain.unwrap_or(0.0),
                max_rank: item.fusion_limit.unwrap_or(0),
                effects: flatten_effects(item),
                kind: classify_modifier(&item.name),
            };
            (item.name.clone(), profile)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> RawItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extract_stat_matches_substring_case_insensitively_first_wins() {
        let weapon = item(json!({
            "category": "Primary",
            "name": "Braton",
            "stats": [
                {"name": "Critical Chance", "value": 0.12},
                {"name": "CriticalMultiplier", "value": 2.4}
            ]
        }));

        assert_eq!(extract_stat(&weapon, "criticalChance", 0.1), 0.12);
        assert_eq!(extract_stat(&weapon, "CRITICALMULTIPLIER", 2.0), 2.4);
        assert_eq!(extract_stat(&weapon, "fireRate", 1.0), 1.0);
    }

    #[test]
    fn damage_split_applies_when_no_physical_damage_present() {
        let weapon = item(json!({
            "category": "Primary",
            "name": "Ignis",
            "stats": [{"name": "Damage", "value": 100.0}]
        }));

        let profiles = build_weapon_profiles(&[weapon]);
        let damage = &profiles["Ignis"].damage;
        assert_eq!(damage[&DamageType::Impact], 40.0);
        assert_eq!(damage[&DamageType::Puncture], 30.0);
        assert_eq!(damage[&DamageType::Slash], 30.0);
    }

    #[test]
    fn missing_stat_list_yields_flat_fallback_damage() {
        let weapon = item(json!({"category": "Melee", "name": "Skana"}));
        let profiles = build_weapon_profiles(&[weapon]);
        let damage = &profiles["Skana"].damage;
        assert_eq!(damage[&DamageType::Impact], 10.0);
        assert_eq!(damage[&DamageType::Puncture], 10.0);
        assert_eq!(damage[&DamageType::Slash], 10.0);
        assert_eq!(damage.get(&DamageType::Heat), None);
    }

    #[test]
    fn effect_names_normalize_via_synonym_table_and_passthrough() {
        assert_eq!(normalize_effect_name("Damage"), "baseDamage");
        assert_eq!(normalize_effect_name("Critical Chance"), "critChance");
        assert_eq!(normalize_effect_name("Status Chance"), "statusChance");
        assert_eq!(normalize_effect_name("Punch Through"), "punchthrough");
    }

    #[test]
    fn later_tiers_overwrite_earlier_effect_values() {
        let serration = item(json!({
            "category": "Mods",
            "name": "Serration",
            "polarity": "Madurai",
            "baseDrain": 4.0,
            "fusionLimit": 10,
            "levelStats": [
                {"stats": [{"stat": "Damage", "value": 15.0}]},
                {"stats": [{"stat": "Damage", "value": 165.0}]}
            ]
        }));

        let profiles = build_modifier_profiles(&[serration]);
        let profile = &profiles["Serration"];
        assert_eq!(profile.effects["baseDamage"], 165.0);
        assert_eq!(profile.kind, ModKind::BaseDamage);
        assert_eq!(profile.max_rank, 10);
    }

    #[test]
    fn character_defaults_apply_for_missing_stats() {
        let frame = item(json!({
            "category": "Warframes",
            "name": "Excalibur",
            "stats": [{"name": "Health", "value": 270.0}]
        }));

        let profiles = build_character_profiles(&[frame]);
        let profile = &profiles["Excalibur"];
        assert_eq!(profile.health, 270.0);
        assert_eq!(profile.shield, 100.0);
        assert_eq!(profile.sprint_speed, 1.0);
    }

    #[test]
    fn classification_uses_name_keywords() {
        assert_eq!(classify_modifier("Serration"), ModKind::BaseDamage);
        assert_eq!(classify_modifier("Split Chamber"), ModKind::Multishot);
        assert_eq!(classify_modifier("Point Strike"), ModKind::CritChance);
        assert_eq!(classify_modifier("Organ Shatter"), ModKind::CritMultiplier);
        assert_eq!(classify_modifier("Vitality"), ModKind::Survivability);
        assert_eq!(classify_modifier("Streamline"), ModKind::Utility);
    }
}
