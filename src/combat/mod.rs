pub mod damage;
pub mod evaluator;
pub mod faction;

pub use damage::{
    apply_mods_to_weapon, base_damage_total, critical_multiplier, faction_damage_multiplier,
    status_multiplier, weapon_dps, ModdedWeapon,
};
pub use evaluator::{
    apply_mods_to_character, build_score, character_ehp, content_weights, ContentType,
    ContentWeights, ModdedCharacter,
};
pub use faction::{armor_damage_reduction, Faction, ARMOR_PIVOT};
