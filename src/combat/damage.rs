//! Weapon damage math: modifier application, critical tiers, status payoff,
//! faction weighting, and the DPS roll-up. All functions are pure; modifier
//! application clones a snapshot and never touches the registry.

use crate::catalog::profiles::{DamageMap, EffectKind, WeaponProfile};
use crate::catalog::registry::CatalogRegistry;
use crate::combat::faction::{armor_damage_reduction, Faction};

/// Weapon stat snapshot after modifier application. `multishot` starts at 1.0
/// and only modifiers raise it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModdedWeapon {
    pub damage: DamageMap,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub status_chance: f64,
    pub fire_rate: f64,
    pub multishot: f64,
}

impl ModdedWeapon {
    fn from_profile(profile: &WeaponProfile) -> Self {
        ModdedWeapon {
            damage: profile.damage.clone(),
            crit_chance: profile.crit_chance,
            crit_multiplier: profile.crit_multiplier,
            status_chance: profile.status_chance,
            fire_rate: profile.fire_rate,
            multishot: 1.0,
        }
    }
}

/// Apply a modifier list to a weapon snapshot. Unknown modifier names and
/// effect names that carry no weapon-side kind are skipped silently.
pub fn apply_mods_to_weapon(
    weapon: &WeaponProfile,
    mod_names: &[String],
    registry: &CatalogRegistry,
) -> ModdedWeapon {
    let mut modded = ModdedWeapon::from_profile(weapon);

    for mod_name in mod_names {
        let Some(modifier) = registry.modifier(mod_name) else {
            continue;
        };
        for (effect_name, pct) in &modifier.effects {
            let Some(kind) = EffectKind::from_normalized(effect_name) else {
                continue;
            };
            match kind {
                EffectKind::BaseDamage => {
                    for magnitude in modded.damage.values_mut() {
                        *magnitude *= 1.0 + pct / 100.0;
                    }
                }
                EffectKind::CritChance => modded.crit_chance += pct / 100.0,
                EffectKind::CritMultiplier => modded.crit_multiplier += pct / 100.0,
                EffectKind::StatusChance => modded.status_chance += pct / 100.0,
                EffectKind::FireRate => modded.fire_rate *= 1.0 + pct / 100.0,
                EffectKind::Multishot => modded.multishot += pct / 100.0,
                // Character-side kinds do nothing on a weapon.
                EffectKind::Health
                | EffectKind::Shield
                | EffectKind::Armor
                | EffectKind::Energy => {}
            }
        }
    }

    modded
}

pub fn base_damage_total(damage: &DamageMap) -> f64 {
    damage.values().sum()
}

/// Expected hit multiplier under tiered criticals. Chance is uncapped: the
/// portion above 100% ("orange") and above 200% ("red") each add a full
/// multiplier worth of expectation.
pub fn critical_multiplier(crit_chance: f64, crit_multiplier: f64) -> f64 {
    let clamped = crit_chance.min(1.0);
    let orange = (crit_chance - 1.0).max(0.0);
    let red = (crit_chance - 2.0).max(0.0);
    1.0 + clamped * (crit_multiplier - 1.0) + orange * crit_multiplier + red * crit_multiplier
}

/// Expected multiplier from status procs: scales the faction's average proc
/// payoff by the proc chance.
pub fn status_multiplier(status_chance: f64, faction: Faction) -> f64 {
    1.0 + status_chance * (faction.status_factor() - 1.0)
}

/// Damage-weighted average of per-type faction weights. Neutral (1.0) when
/// the map deals no damage at all.
pub fn faction_damage_multiplier(damage: &DamageMap, faction: Faction) -> f64 {
    let mut total = 0.0;
    let mut weighted = 0.0;
    for (damage_type, magnitude) in damage {
        total += magnitude;
        weighted += magnitude * faction.damage_type_weight(*damage_type);
    }
    if total > 0.0 {
        weighted / total
    } else {
        1.0
    }
}

/// Full DPS roll-up for a weapon under a modifier list and scenario, rounded
/// to the nearest integer. Unknown weapons score 0.
pub fn weapon_dps(
    weapon_name: &str,
    mod_names: &[String],
    enemy_level: u32,
    faction: Faction,
    registry: &CatalogRegistry,
) -> i64 {
    let Some(weapon) = registry.weapon(weapon_name) else {
        return 0;
    };
    let modded = apply_mods_to_weapon(weapon, mod_names, registry);

    let dps = base_damage_total(&modded.damage)
        * critical_multiplier(modded.crit_chance, modded.crit_multiplier)
        * status_multiplier(modded.status_chance, faction)
        * modded.fire_rate
        * modded.multishot
        * faction_damage_multiplier(&modded.damage, faction)
        * armor_damage_reduction(enemy_level, faction);

    dps.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::profiles::DamageType;

    #[test]
    fn no_crit_chance_means_no_crit_bonus() {
        assert_eq!(critical_multiplier(0.0, 2.0), 1.0);
        assert_eq!(critical_multiplier(0.0, 4.5), 1.0);
    }

    #[test]
    fn crit_tiers_reward_chance_beyond_100_and_200_percent() {
        // 1 + 1.0*(2-1) + 0.5*2 = 3.0
        assert!((critical_multiplier(1.5, 2.0) - 3.0).abs() < 1e-12);
        // 1 + 1.0*(2-1) + 1.5*2 + 0.5*2 = 6.0
        assert!((critical_multiplier(2.5, 2.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn zero_status_chance_is_neutral_for_every_faction() {
        for faction in [
            Faction::Grineer,
            Faction::Corpus,
            Faction::Infested,
            Faction::Sentient,
            Faction::Corrupted,
            Faction::Other,
        ] {
            assert_eq!(status_multiplier(0.0, faction), 1.0);
        }
    }

    #[test]
    fn faction_weighting_is_damage_weighted_average() {
        let mut damage = DamageMap::new();
        damage.insert(DamageType::Puncture, 30.0);
        damage.insert(DamageType::Slash, 10.0);
        // (30*1.5 + 10*0.75) / 40 = 52.5 / 40
        let expected = 52.5 / 40.0;
        assert!((faction_damage_multiplier(&damage, Faction::Grineer) - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_damage_map_is_neutral() {
        assert_eq!(faction_damage_multiplier(&DamageMap::new(), Faction::Corpus), 1.0);
    }
}
