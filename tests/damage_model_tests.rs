use arsenal::catalog::{CatalogRegistry, RawItem};
use arsenal::combat::{
    armor_damage_reduction, critical_multiplier, faction_damage_multiplier, status_multiplier,
    weapon_dps, Faction,
};

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

const ALL_FACTIONS: [Faction; 6] = [
    Faction::Grineer,
    Faction::Corpus,
    Faction::Infested,
    Faction::Sentient,
    Faction::Corrupted,
    Faction::Other,
];

fn fixture_registry() -> CatalogRegistry {
    let items: Vec<RawItem> = serde_json::from_value(serde_json::json!([
        {
            "category": "Primary",
            "name": "Tri Rifle",
            "stats": [
                {"name": "impact", "value": 10.0},
                {"name": "puncture", "value": 10.0},
                {"name": "slash", "value": 10.0},
                {"name": "criticalChance", "value": 0.0},
                {"name": "criticalMultiplier", "value": 2.0},
                {"name": "procChance", "value": 0.0},
                {"name": "fireRate", "value": 1.0}
            ]
        },
        {
            "category": "Mods",
            "name": "Serration",
            "levelStats": [{"stats": [{"stat": "Damage", "value": 100.0}]}]
        },
        {
            "category": "Mods",
            "name": "Speed Trigger",
            "levelStats": [{"stats": [{"stat": "Fire Rate", "value": 60.0}]}]
        },
        {
            "category": "Mods",
            "name": "Split Chamber",
            "levelStats": [{"stats": [{"stat": "Multishot", "value": 90.0}]}]
        }
    ]))
    .unwrap();
    CatalogRegistry::from_items(&items)
}

#[test]
fn armor_reduction_is_monotonically_non_increasing_in_level() {
    for faction in ALL_FACTIONS {
        let mut previous = armor_damage_reduction(1, faction);
        for level in 2..=300 {
            let current = armor_damage_reduction(level, faction);
            assert!(
                current <= previous,
                "{}: level {level} reduction {current} > previous {previous}",
                faction.as_str()
            );
            previous = current;
        }
    }
}

#[test]
fn armor_reduction_bounds() {
    for faction in ALL_FACTIONS {
        for level in [1, 50, 150, 1000] {
            let reduction = armor_damage_reduction(level, faction);
            assert!((0.0..=1.0).contains(&reduction));
        }
    }
    // infested carry no base armor at all
    assert_eq!(armor_damage_reduction(1, Faction::Infested), 1.0);
}

#[test]
fn zero_crit_chance_never_adds_a_bonus() {
    for crit_multiplier_value in [1.0, 2.0, 3.5, 10.0] {
        assert_eq!(critical_multiplier(0.0, crit_multiplier_value), 1.0);
    }
}

#[test]
fn crit_tiers_match_hand_computed_values() {
    // below the first threshold: plain expectation
    approx_eq(critical_multiplier(0.25, 2.0), 1.25, 1e-12);
    // exactly 100%: full crit every shot
    approx_eq(critical_multiplier(1.0, 2.0), 2.0, 1e-12);
    // orange tier
    approx_eq(critical_multiplier(1.5, 2.0), 3.0, 1e-12);
    // red tier
    approx_eq(critical_multiplier(2.5, 2.0), 6.0, 1e-12);
}

#[test]
fn zero_status_chance_is_neutral() {
    for faction in ALL_FACTIONS {
        assert_eq!(status_multiplier(0.0, faction), 1.0);
    }
}

#[test]
fn status_factor_table_matches_design_values() {
    approx_eq(status_multiplier(1.0, Faction::Grineer), 1.3, 1e-12);
    approx_eq(status_multiplier(1.0, Faction::Corpus), 1.2, 1e-12);
    approx_eq(status_multiplier(1.0, Faction::Infested), 1.4, 1e-12);
    approx_eq(status_multiplier(1.0, Faction::Sentient), 1.1, 1e-12);
    approx_eq(status_multiplier(1.0, Faction::Corrupted), 1.25, 1e-12);
    approx_eq(status_multiplier(1.0, Faction::Other), 1.2, 1e-12);
}

#[test]
fn tri_damage_weapon_against_infested_scores_exactly_33() {
    // 30 base damage, slash weighted 1.25 for infested:
    // faction multiplier = (10 + 10 + 12.5) / 30, armor reduction = 1.0,
    // dps = 30 x 32.5/30 = 32.5 -> rounds to 33.
    let registry = fixture_registry();
    let dps = weapon_dps("Tri Rifle", &[], 1, Faction::Infested, &registry);
    assert_eq!(dps, 33);
}

#[test]
fn unknown_weapon_scores_zero() {
    let registry = fixture_registry();
    assert_eq!(weapon_dps("No Such Gun", &[], 1, Faction::Grineer, &registry), 0);
}

#[test]
fn unknown_mod_names_are_silently_ignored() {
    let registry = fixture_registry();
    let bare = weapon_dps("Tri Rifle", &[], 1, Faction::Infested, &registry);
    let with_junk = weapon_dps(
        "Tri Rifle",
        &["Totally Fake Mod".to_string()],
        1,
        Faction::Infested,
        &registry,
    );
    assert_eq!(bare, with_junk);
}

#[test]
fn base_damage_mod_doubles_dps() {
    let registry = fixture_registry();
    let bare = weapon_dps("Tri Rifle", &[], 1, Faction::Infested, &registry);
    let modded = weapon_dps(
        "Tri Rifle",
        &["Serration".to_string()],
        1,
        Faction::Infested,
        &registry,
    );
    // +100% damage on every type; faction weighting is scale-invariant.
    assert_eq!(modded, 65);
    assert!(modded >= 2 * bare - 1);
}

#[test]
fn fire_rate_and_multishot_mods_compose_multiplicatively_and_additively() {
    let registry = fixture_registry();
    let modded = weapon_dps(
        "Tri Rifle",
        &["Speed Trigger".to_string(), "Split Chamber".to_string()],
        1,
        Faction::Infested,
        &registry,
    );
    // 32.5 x 1.6 (fire rate) x 1.9 (multishot) = 98.8 -> 99
    assert_eq!(modded, 99);
}

#[test]
fn faction_weighting_uses_listed_type_weights_only() {
    let registry = fixture_registry();
    let weapon = registry.weapon("Tri Rifle").unwrap();
    // grineer: puncture 1.5, slash 0.75, impact 0.75 -> (7.5+15+7.5)/30 = 1.0
    approx_eq(
        faction_damage_multiplier(&weapon.damage, Faction::Grineer),
        1.0,
        1e-12,
    );
    // sentient has no listed weights at all
    approx_eq(
        faction_damage_multiplier(&weapon.damage, Faction::Sentient),
        1.0,
        1e-12,
    );
}
