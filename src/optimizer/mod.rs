pub mod export_csv;
pub mod genetic;
pub mod loadout;
pub mod rng;

use serde::{Deserialize, Serialize};

use crate::combat::evaluator::ContentType;
use crate::combat::faction::Faction;

pub use export_csv::{write_ranked_csv, write_ranked_csv_path};
pub use genetic::{
    ProgressUpdate, SearchConfig, SearchEngine, SearchOutcome, SearchTermination, ELITE_FRACTION,
    GENERATION_COUNT, GENERATION_PAUSE, MOD_SLOTS, MUTATION_RATE, POPULATION_SIZE, TOP_BUILDS,
    TOURNAMENT_SIZE,
};
pub use loadout::{evaluate_loadout, random_loadout, BuildEvaluation, Loadout};
pub use rng::Rng;

const DEFAULT_ENEMY_LEVEL: u32 = 150;
const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000;
const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.001;

/// Caller-supplied combat scenario for evaluation and search. Read-only to
/// the engine. `max_iterations` and `convergence_threshold` are accepted and
/// echoed for callers that track them, but the fixed generation budget
/// governs termination. `seed: None` draws fresh seed material per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchScenario {
    #[serde(default = "default_content_type")]
    pub content_type: ContentType,
    #[serde(default = "default_enemy_level")]
    pub enemy_level: u32,
    #[serde(default = "default_faction")]
    pub target_faction: Faction,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SearchScenario {
    fn default() -> Self {
        SearchScenario {
            content_type: ContentType::General,
            enemy_level: DEFAULT_ENEMY_LEVEL,
            target_faction: Faction::Grineer,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
            seed: None,
        }
    }
}

fn default_content_type() -> ContentType {
    ContentType::General
}

fn default_enemy_level() -> u32 {
    DEFAULT_ENEMY_LEVEL
}

fn default_faction() -> Faction {
    Faction::Grineer
}

fn default_max_iterations() -> u64 {
    DEFAULT_MAX_ITERATIONS
}

fn default_convergence_threshold() -> f64 {
    DEFAULT_CONVERGENCE_THRESHOLD
}
