//! Candidate loadouts and their fitness evaluation.

use serde::{Deserialize, Serialize};

use crate::catalog::registry::CatalogRegistry;
use crate::combat::damage::weapon_dps;
use crate::combat::evaluator::{build_score, character_ehp};
use crate::optimizer::rng::Rng;
use crate::optimizer::SearchScenario;

/// One candidate solution: a character, three weapons, and a modifier list
/// per slot. `score` is filled in by evaluation; candidates are immutable
/// once returned from a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub character: String,
    pub primary_weapon: String,
    pub secondary_weapon: String,
    pub melee_weapon: String,
    pub character_mods: Vec<String>,
    pub primary_mods: Vec<String>,
    pub secondary_mods: Vec<String>,
    pub melee_mods: Vec<String>,
    #[serde(default)]
    pub score: i64,
}

/// Fitness breakdown for one loadout under one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEvaluation {
    pub dps: i64,
    pub ehp: i64,
    pub score: i64,
}

/// Score a loadout: primary-weapon DPS and character EHP, blended by the
/// content-type weights. Secondary and melee weapons do not enter the score;
/// downstream consumers assume this definition (see DESIGN.md).
pub fn evaluate_loadout(
    loadout: &Loadout,
    scenario: &SearchScenario,
    registry: &CatalogRegistry,
) -> BuildEvaluation {
    let dps = weapon_dps(
        &loadout.primary_weapon,
        &loadout.primary_mods,
        scenario.enemy_level,
        scenario.target_faction,
        registry,
    );
    let ehp = character_ehp(&loadout.character, &loadout.character_mods, registry);
    BuildEvaluation {
        dps,
        ehp,
        score: build_score(dps, ehp, scenario.content_type),
    }
}

/// Draw a uniformly random loadout. Every modifier list is a sample without
/// replacement of up to `mod_slots` registry mods; an empty modifier registry
/// yields mod-free candidates. Returns None when the character or weapon
/// registry is empty (no loadout can exist at all).
pub fn random_loadout(
    registry: &CatalogRegistry,
    mod_slots: usize,
    rng: &mut Rng,
) -> Option<Loadout> {
    let character = rng.pick(registry.character_names())?.clone();
    let primary_weapon = rng.pick(registry.weapon_names())?.clone();
    let secondary_weapon = rng.pick(registry.weapon_names())?.clone();
    let melee_weapon = rng.pick(registry.weapon_names())?.clone();

    let mod_names = registry.mod_names();
    Some(Loadout {
        character,
        primary_weapon,
        secondary_weapon,
        melee_weapon,
        character_mods: rng.sample_without_replacement(mod_names, mod_slots),
        primary_mods: rng.sample_without_replacement(mod_names, mod_slots),
        secondary_mods: rng.sample_without_replacement(mod_names, mod_slots),
        melee_mods: rng.sample_without_replacement(mod_names, mod_slots),
        score: 0,
    })
}
