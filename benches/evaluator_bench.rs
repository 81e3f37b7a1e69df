use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arsenal::catalog::{CatalogRegistry, RawItem};
use arsenal::optimizer::{
    evaluate_loadout, Loadout, SearchConfig, SearchEngine, SearchScenario,
};

fn bench_registry() -> Arc<CatalogRegistry> {
    let mut items = vec![serde_json::json!({
        "category": "Warframes",
        "name": "Excalibur",
        "stats": [
            {"name": "health", "value": 270.0},
            {"name": "shield", "value": 225.0},
            {"name": "armor", "value": 225.0}
        ]
    })];
    for index in 0..40 {
        items.push(serde_json::json!({
            "category": "Primary",
            "name": format!("Rifle {index}"),
            "stats": [
                {"name": "impact", "value": 10.0 + index as f64},
                {"name": "puncture", "value": 10.0},
                {"name": "slash", "value": 10.0},
                {"name": "criticalChance", "value": 0.2},
                {"name": "criticalMultiplier", "value": 2.0},
                {"name": "procChance", "value": 0.15},
                {"name": "fireRate", "value": 6.0}
            ]
        }));
    }
    for index in 0..60 {
        items.push(serde_json::json!({
            "category": "Mods",
            "name": format!("Mod {index}"),
            "levelStats": [{"stats": [{"stat": "Damage", "value": 10.0 + index as f64}]}]
        }));
    }
    let items: Vec<RawItem> = items
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap())
        .collect();
    Arc::new(CatalogRegistry::from_items(&items))
}

fn bench_loadout() -> Loadout {
    Loadout {
        character: "Excalibur".to_string(),
        primary_weapon: "Rifle 7".to_string(),
        secondary_weapon: "Rifle 8".to_string(),
        melee_weapon: "Rifle 9".to_string(),
        character_mods: (0..8).map(|i| format!("Mod {i}")).collect(),
        primary_mods: (8..16).map(|i| format!("Mod {i}")).collect(),
        secondary_mods: (16..24).map(|i| format!("Mod {i}")).collect(),
        melee_mods: (24..32).map(|i| format!("Mod {i}")).collect(),
        score: 0,
    }
}

fn evaluation_benchmark(c: &mut Criterion) {
    let registry = bench_registry();
    let scenario = SearchScenario::default();
    let loadout = bench_loadout();

    c.bench_function("evaluate_loadout", |b| {
        b.iter(|| evaluate_loadout(black_box(&loadout), &scenario, &registry))
    });
}

fn search_benchmark(c: &mut Criterion) {
    let registry = bench_registry();
    let scenario = SearchScenario {
        seed: Some(7),
        ..SearchScenario::default()
    };
    let config = SearchConfig {
        population_size: 50,
        generations: 5,
        generation_pause: Duration::ZERO,
        ..SearchConfig::default()
    };

    c.bench_function("genetic_search_5x50", |b| {
        b.iter(|| {
            let engine = SearchEngine::new(Arc::clone(&registry));
            engine
                .run_blocking(&scenario, &config, |_| {})
                .expect("runtime")
        })
    });
}

criterion_group!(benches, evaluation_benchmark, search_benchmark);
criterion_main!(benches);
