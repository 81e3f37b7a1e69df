use std::env;
use std::fs;
use std::sync::Arc;

use crate::catalog::item::DEFAULT_CATALOG_PATH;
use crate::catalog::registry::{format_large_number, CatalogRegistry};
use crate::catalog::validate::validate_catalog;
use crate::combat::evaluator::ContentType;
use crate::combat::faction::Faction;
use crate::optimizer::export_csv::write_ranked_csv_path;
use crate::optimizer::loadout::{evaluate_loadout, Loadout};
use crate::optimizer::{SearchConfig, SearchEngine, SearchScenario, GENERATION_COUNT, POPULATION_SIZE};
use crate::parallel::{batch_ranges, score_loadouts_with_pool, WorkerPool};
use crate::server;

/// Progress granularity for batch rescoring.
const RESCORE_PROGRESS_BATCHES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Evaluate,
    Optimize,
    Rescore,
    Estimate,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("evaluate") => Some(Command::Evaluate),
        Some("optimize") => Some(Command::Optimize),
        Some("rescore") => Some(Command::Rescore),
        Some("estimate") => Some(Command::Estimate),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Evaluate) => handle_evaluate(args),
        Some(Command::Optimize) => handle_optimize(args),
        Some(Command::Rescore) => handle_rescore(args),
        Some(Command::Estimate) => handle_estimate(),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: arsenal <serve|evaluate|optimize|rescore|estimate|validate>");
            2
        }
    }
}

fn catalog_path() -> String {
    env::var("ARSENAL_CATALOG").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string())
}

fn load_registry() -> Arc<CatalogRegistry> {
    CatalogRegistry::load(&catalog_path())
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("ARSENAL_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let registry = load_registry();
    let counts = registry.counts();
    println!(
        "catalog: {} characters, {} weapons, {} mods",
        counts.characters, counts.weapons, counts.mods
    );
    match server::run_server(&bind_addr, registry) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn scenario_from_args(args: &[String], first_index: usize) -> SearchScenario {
    let enemy_level = parse_u32_arg(args.get(first_index), "enemy_level", 150).max(1);
    let faction = args
        .get(first_index + 1)
        .map(|raw| Faction::parse(raw))
        .unwrap_or(Faction::Grineer);
    let content_type = args
        .get(first_index + 2)
        .map(|raw| ContentType::parse(raw))
        .unwrap_or(ContentType::General);
    SearchScenario {
        content_type,
        enemy_level,
        target_faction: faction,
        ..SearchScenario::default()
    }
}

fn handle_evaluate(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: arsenal evaluate <loadout.json> [enemy_level] [faction] [content_type]");
        return 2;
    };
    let loadout: Loadout = match fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|err| err.to_string()))
    {
        Ok(loadout) => loadout,
        Err(err) => {
            eprintln!("failed to read loadout from '{path}': {err}");
            return 1;
        }
    };

    let registry = load_registry();
    let scenario = scenario_from_args(args, 3);
    let evaluation = evaluate_loadout(&loadout, &scenario, &registry);

    match serde_json::to_string_pretty(&evaluation) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize evaluation: {err}");
            1
        }
    }
}

fn handle_optimize(args: &[String]) -> i32 {
    let mut positional: Vec<&String> = Vec::new();
    let mut csv_path: Option<&String> = None;
    let mut index = 2;
    while index < args.len() {
        if args[index] == "--csv" {
            csv_path = args.get(index + 1);
            index += 2;
        } else {
            positional.push(&args[index]);
            index += 1;
        }
    }

    let enemy_level = positional
        .first()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(150)
        .max(1);
    let faction = positional
        .get(1)
        .map(|raw| Faction::parse(raw))
        .unwrap_or(Faction::Grineer);
    let content_type = positional
        .get(2)
        .map(|raw| ContentType::parse(raw))
        .unwrap_or(ContentType::General);
    let seed = positional.get(3).and_then(|value| value.parse::<u64>().ok());

    let scenario = SearchScenario {
        content_type,
        enemy_level,
        target_faction: faction,
        seed,
        ..SearchScenario::default()
    };

    let registry = load_registry();
    let engine = SearchEngine::new(registry);
    let outcome = engine.run_blocking(&scenario, &SearchConfig::default(), |progress| {
        eprintln!(
            "generation {}/{}: best={} tested={}",
            progress.generation + 1,
            progress.total_generations,
            progress.best_score,
            progress.tested_combinations
        );
    });
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("search failed to start: {err}");
            return 1;
        }
    };

    if let Some(csv_path) = csv_path {
        if let Err(err) = write_ranked_csv_path(csv_path, &outcome.best) {
            eprintln!("failed to write csv '{csv_path}': {err}");
            return 1;
        }
        eprintln!("wrote {} builds to {csv_path}", outcome.best.len());
    }

    match serde_json::to_string_pretty(&outcome) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize outcome: {err}");
            1
        }
    }
}

fn handle_rescore(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: arsenal rescore <loadouts.json> [enemy_level] [faction] [content_type]");
        return 2;
    };
    let mut loadouts: Vec<Loadout> = match fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|err| err.to_string()))
    {
        Ok(loadouts) => loadouts,
        Err(err) => {
            eprintln!("failed to read loadouts from '{path}': {err}");
            return 1;
        }
    };

    let registry = load_registry();
    let scenario = scenario_from_args(args, 3);
    let workers = env::var("ARSENAL_WORKERS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);
    let pool = WorkerPool::with_workers(workers);

    let total = loadouts.len();
    for (start, end) in batch_ranges(total, RESCORE_PROGRESS_BATCHES) {
        score_loadouts_with_pool(&pool, &registry, &scenario, &mut loadouts[start..end]);
        eprintln!("scored {end}/{total}");
    }
    loadouts.sort_by(|a, b| b.score.cmp(&a.score));

    match serde_json::to_string_pretty(&loadouts) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize loadouts: {err}");
            1
        }
    }
}

fn handle_estimate() -> i32 {
    let registry = load_registry();
    let counts = registry.counts();
    println!(
        "catalog: {} characters, {} weapons, {} mods",
        counts.characters, counts.weapons, counts.mods
    );
    println!(
        "search space: {} ({} combinations)",
        format_large_number(registry.search_space()),
        registry.search_space()
    );
    println!(
        "one genetic run evaluates {} candidates ({} x {} generations)",
        POPULATION_SIZE * GENERATION_COUNT,
        POPULATION_SIZE,
        GENERATION_COUNT
    );
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let default_path = catalog_path();
    let path = args.get(2).map(String::as_str).unwrap_or(&default_path);

    match validate_catalog(path) {
        Ok(report) => {
            for diagnostic in &report.diagnostics {
                println!("{diagnostic}");
            }
            if report.has_errors() {
                eprintln!("validation failed: {path}");
                1
            } else {
                println!("validation passed: {path}");
                0
            }
        }
        Err(err) => {
            eprintln!("could not validate '{path}': {err}");
            1
        }
    }
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
