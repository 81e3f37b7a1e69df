//! JSON payload builders for the local API. Pure functions over the shared
//! registry so every endpoint is unit-testable without a socket.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::catalog::registry::{format_large_number, CatalogRegistry};
use crate::optimizer::loadout::{evaluate_loadout, Loadout};
use crate::optimizer::{
    SearchConfig, SearchEngine, SearchScenario, GENERATION_COUNT, POPULATION_SIZE,
};
use crate::store::builds::{create_build, list_builds, load_build};
use crate::store::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::store::StoreError;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

/// Failure modes shared by the POST endpoints.
#[derive(Debug)]
pub enum RequestError {
    Parse(serde_json::Error),
    Validation(ValidationErrorResponse),
    Store(StoreError),
    Engine(std::io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(_) => write!(f, "validation failed"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Engine(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<StoreError> for RequestError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

fn validate_scenario(scenario: &SearchScenario) -> Result<(), RequestError> {
    let mut errors = Vec::new();
    if scenario.enemy_level == 0 {
        errors.push(ValidationIssue {
            field: "enemy_level",
            messages: vec!["must be a positive integer".to_string()],
        });
    }
    if errors.is_empty() {
        return Ok(());
    }
    Err(RequestError::Validation(ValidationErrorResponse {
        status: "error",
        message: "Validation failed",
        errors,
    }))
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "arsenal-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn catalog_summary_payload(registry: &CatalogRegistry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "counts": registry.counts(),
        "search_space": registry.search_space(),
        "search_space_display": format_large_number(registry.search_space()),
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterListItem {
    pub name: String,
    pub health: f64,
    pub shield: f64,
    pub armor: f64,
    pub energy: f64,
}

pub fn characters_payload(registry: &CatalogRegistry) -> Result<String, serde_json::Error> {
    let list: Vec<CharacterListItem> = registry
        .character_names()
        .iter()
        .filter_map(|name| {
            let profile = registry.character(name)?;
            Some(CharacterListItem {
                name: name.clone(),
                health: profile.health,
                shield: profile.shield,
                armor: profile.armor,
                energy: profile.energy,
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "characters": list }))
}

#[derive(Debug, Clone, Serialize)]
pub struct WeaponListItem {
    pub name: String,
    pub category: crate::catalog::profiles::WeaponCategory,
    pub total_damage: f64,
    pub crit_chance: f64,
    pub status_chance: f64,
    pub fire_rate: f64,
}

pub fn weapons_payload(registry: &CatalogRegistry) -> Result<String, serde_json::Error> {
    let list: Vec<WeaponListItem> = registry
        .weapon_names()
        .iter()
        .filter_map(|name| {
            let profile = registry.weapon(name)?;
            Some(WeaponListItem {
                name: name.clone(),
                category: profile.category,
                total_damage: crate::combat::damage::base_damage_total(&profile.damage),
                crit_chance: profile.crit_chance,
                status_chance: profile.status_chance,
                fire_rate: profile.fire_rate,
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "weapons": list }))
}

#[derive(Debug, Clone, Serialize)]
pub struct ModListItem {
    pub name: String,
    pub polarity: String,
    pub capacity: f64,
    pub max_rank: u32,
    pub kind: crate::catalog::profiles::ModKind,
}

pub fn mods_payload(registry: &CatalogRegistry) -> Result<String, serde_json::Error> {
    let list: Vec<ModListItem> = registry
        .mod_names()
        .iter()
        .filter_map(|name| {
            let profile = registry.modifier(name)?;
            Some(ModListItem {
                name: name.clone(),
                polarity: profile.polarity.clone(),
                capacity: profile.capacity,
                max_rank: profile.max_rank,
                kind: profile.kind,
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "mods": list }))
}

#[derive(Debug, Clone, Deserialize)]
struct EvaluateRequest {
    loadout: Loadout,
    #[serde(default)]
    scenario: SearchScenario,
}

/// POST /api/evaluate: pure, synchronous scoring of one loadout.
pub fn evaluate_payload(registry: &CatalogRegistry, body: &str) -> Result<String, RequestError> {
    let request: EvaluateRequest = serde_json::from_str(body).map_err(RequestError::Parse)?;
    validate_scenario(&request.scenario)?;

    let evaluation = evaluate_loadout(&request.loadout, &request.scenario, registry);
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "evaluation": evaluation,
        "scenario": scenario_summary(&request.scenario),
    }))
    .map_err(RequestError::Parse)
}

#[derive(Debug, Clone, Serialize)]
struct ScenarioSummary {
    content_type: &'static str,
    enemy_level: u32,
    target_faction: &'static str,
}

fn scenario_summary(scenario: &SearchScenario) -> ScenarioSummary {
    ScenarioSummary {
        content_type: scenario.content_type.as_str(),
        enemy_level: scenario.enemy_level,
        target_faction: scenario.target_faction.as_str(),
    }
}

#[derive(Debug, Clone, Serialize)]
struct RankedBuild {
    rank: usize,
    loadout: Loadout,
    dps: i64,
    ehp: i64,
    score: i64,
}

/// POST /api/optimize: run a full search and return the ranked top builds.
/// Deterministic for a fixed seed; the seed used is always echoed back.
pub fn optimize_payload(registry: &Arc<CatalogRegistry>, body: &str) -> Result<String, RequestError> {
    let scenario: SearchScenario = serde_json::from_str(body).map_err(RequestError::Parse)?;
    validate_scenario(&scenario)?;

    let engine = SearchEngine::new(Arc::clone(registry));
    let started = Instant::now();
    let outcome = engine
        .run_blocking(&scenario, &SearchConfig::default(), |_| {})
        .map_err(RequestError::Engine)?;
    let duration_ms = started.elapsed().as_millis() as u64;

    let best: Vec<RankedBuild> = outcome
        .best
        .iter()
        .enumerate()
        .map(|(index, loadout)| {
            let evaluation = evaluate_loadout(loadout, &scenario, registry);
            RankedBuild {
                rank: index + 1,
                loadout: loadout.clone(),
                dps: evaluation.dps,
                ehp: evaluation.ehp,
                score: evaluation.score,
            }
        })
        .collect();

    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "engine": "genetic_v1",
        "scenario": scenario_summary(&scenario),
        "seed": outcome.seed,
        "tested_combinations": outcome.tested_combinations,
        "generations_completed": outcome.generations_completed,
        "termination": outcome.termination,
        "duration_ms": duration_ms,
        "best": best,
        "notes": [
            "Score blends primary-weapon DPS and character EHP by content-type weights.",
            "Results are deterministic for the same catalog, scenario, and seed.",
        ],
    }))
    .map_err(RequestError::Parse)
}

/// GET /api/optimize/estimate: how big the space is and what one run costs.
pub fn optimize_estimate_payload(registry: &CatalogRegistry) -> Result<String, serde_json::Error> {
    let evaluations = (POPULATION_SIZE * GENERATION_COUNT) as u64;
    serde_json::to_string_pretty(&serde_json::json!({
        "search_space": registry.search_space(),
        "search_space_display": format_large_number(registry.search_space()),
        "population_size": POPULATION_SIZE,
        "generations": GENERATION_COUNT,
        "evaluations_per_run": evaluations,
    }))
}

pub fn builds_list_payload(dir: &Path) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({ "builds": list_builds(dir) }))
}

pub fn build_get_payload(dir: &Path, id: &str) -> Result<String, RequestError> {
    let build = load_build(dir, id)?;
    serde_json::to_string_pretty(&build).map_err(RequestError::Parse)
}

#[derive(Debug, Clone, Deserialize)]
struct BuildPostRequest {
    name: Option<String>,
    loadout: Loadout,
    #[serde(default)]
    scenario: SearchScenario,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// POST /api/builds: evaluate and persist a build under a fresh id.
pub fn build_post_payload(
    registry: &CatalogRegistry,
    dir: &Path,
    body: &str,
) -> Result<String, RequestError> {
    let request: BuildPostRequest = serde_json::from_str(body).map_err(RequestError::Parse)?;
    validate_scenario(&request.scenario)?;

    let evaluation = evaluate_loadout(&request.loadout, &request.scenario, registry);
    let build = create_build(
        dir,
        request.name.as_deref().unwrap_or("Unnamed"),
        request.loadout,
        &request.scenario,
        evaluation,
        request.notes,
        request.tags,
    )?;
    serde_json::to_string_pretty(&build).map_err(RequestError::Parse)
}

const LEADERBOARD_TOP: usize = 10;

pub fn leaderboard_get_payload(path: &Path) -> Result<String, serde_json::Error> {
    let board = Leaderboard::load(path);
    serde_json::to_string_pretty(&serde_json::json!({
        "total": board.entries.len(),
        "entries": board.top(LEADERBOARD_TOP),
    }))
}

#[derive(Debug, Clone, Deserialize)]
struct LeaderboardPostRequest {
    loadout: Loadout,
    #[serde(default)]
    scenario: SearchScenario,
}

/// POST /api/leaderboard: evaluate a loadout and submit it to the local
/// board. The response carries the rank it landed at, if it made the cut.
pub fn leaderboard_post_payload(
    registry: &CatalogRegistry,
    path: &Path,
    body: &str,
) -> Result<String, RequestError> {
    let request: LeaderboardPostRequest = serde_json::from_str(body).map_err(RequestError::Parse)?;
    validate_scenario(&request.scenario)?;

    let evaluation = evaluate_loadout(&request.loadout, &request.scenario, registry);
    let entry = LeaderboardEntry::from_evaluation(request.loadout, &request.scenario, evaluation);

    let mut board = Leaderboard::load(path);
    let rank = board.submit(entry.clone());
    board.save(path)?;

    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "rank": rank,
        "entry": entry,
    }))
    .map_err(RequestError::Parse)
}
