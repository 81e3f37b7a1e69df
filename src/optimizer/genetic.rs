//! Generational genetic search over the loadout space: tournament selection,
//! slot-wise crossover, point mutation, and elitist retention. The loop is
//! single-threaded and cooperatively yields between generations; cancellation
//! is honored only at generation boundaries, so an in-flight generation
//! always completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::catalog::registry::CatalogRegistry;
use crate::optimizer::loadout::{evaluate_loadout, random_loadout, Loadout};
use crate::optimizer::rng::Rng;
use crate::optimizer::SearchScenario;

pub const POPULATION_SIZE: usize = 100;
pub const GENERATION_COUNT: usize = 50;
pub const ELITE_FRACTION: f64 = 0.2;
pub const TOURNAMENT_SIZE: usize = 5;
pub const MUTATION_RATE: f64 = 0.1;
pub const TOP_BUILDS: usize = 10;
pub const MOD_SLOTS: usize = 8;
pub const GENERATION_PAUSE: Duration = Duration::from_millis(10);

/// Search parameters. Defaults are the production values; tests shrink them.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub population_size: usize,
    pub generations: usize,
    pub elite_fraction: f64,
    pub tournament_size: usize,
    pub mutation_rate: f64,
    pub top_builds: usize,
    pub mod_slots: usize,
    /// Cooperative yield between generations. Keeps a long search from
    /// starving the host and bounds cancellation latency to one generation.
    pub generation_pause: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            generations: GENERATION_COUNT,
            elite_fraction: ELITE_FRACTION,
            tournament_size: TOURNAMENT_SIZE,
            mutation_rate: MUTATION_RATE,
            top_builds: TOP_BUILDS,
            mod_slots: MOD_SLOTS,
            generation_pause: GENERATION_PAUSE,
        }
    }
}

/// Delivered to the progress callback once per generation, synchronously on
/// the search task. The callback must not block for long; it directly delays
/// the next generation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressUpdate {
    pub generation: usize,
    pub total_generations: usize,
    pub best_score: i64,
    pub tested_combinations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTermination {
    /// The full generation budget ran.
    Completed,
    /// Cancelled at a generation boundary; results through the last completed
    /// generation are preserved.
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Top loadouts sorted descending by score. Empty when a required
    /// registry was empty or no candidate ever scored above zero.
    pub best: Vec<Loadout>,
    pub best_score: i64,
    pub tested_combinations: u64,
    pub generations_completed: usize,
    pub termination: SearchTermination,
    /// Seed actually used; rerunning with it reproduces the search exactly.
    pub seed: u64,
}

impl SearchOutcome {
    fn empty(seed: u64) -> Self {
        SearchOutcome {
            best: Vec::new(),
            best_score: 0,
            tested_combinations: 0,
            generations_completed: 0,
            termination: SearchTermination::Completed,
            seed,
        }
    }
}

/// One search engine instance per host; owns cancellation state for the run
/// in flight. Constructed explicitly and passed around, never a process-wide
/// singleton.
pub struct SearchEngine {
    registry: Arc<CatalogRegistry>,
    cancel: AtomicBool,
    running: AtomicBool,
}

impl SearchEngine {
    pub fn new(registry: Arc<CatalogRegistry>) -> Self {
        SearchEngine {
            registry,
            cancel: AtomicBool::new(false),
            running: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &CatalogRegistry {
        &self.registry
    }

    /// Request the running search stop after the current generation.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run one search. Never fails: degenerate registries produce an empty
    /// outcome. One run at a time per engine; the cancel flag resets at start.
    pub async fn run<F>(
        &self,
        scenario: &SearchScenario,
        config: &SearchConfig,
        mut on_progress: F,
    ) -> SearchOutcome
    where
        F: FnMut(ProgressUpdate),
    {
        let seed = scenario.seed.unwrap_or_else(random_seed);
        self.cancel.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);

        let outcome = self.run_inner(scenario, config, seed, &mut on_progress).await;

        self.running.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_inner<F>(
        &self,
        scenario: &SearchScenario,
        config: &SearchConfig,
        seed: u64,
        on_progress: &mut F,
    ) -> SearchOutcome
    where
        F: FnMut(ProgressUpdate),
    {
        let mut rng = Rng::new(seed);

        let mut population: Vec<Loadout> = (0..config.population_size)
            .filter_map(|_| random_loadout(&self.registry, config.mod_slots, &mut rng))
            .collect();
        if population.is_empty() {
            return SearchOutcome::empty(seed);
        }

        let mut best: Vec<Loadout> = Vec::new();
        let mut best_score = 0i64;
        let mut tested: u64 = 0;
        let mut generations_completed = 0usize;
        let mut termination = SearchTermination::Completed;

        let elite_count = (config.population_size as f64 * config.elite_fraction) as usize;

        for generation in 0..config.generations {
            if self.cancel.load(Ordering::SeqCst) {
                termination = SearchTermination::Cancelled;
                break;
            }

            for candidate in &mut population {
                candidate.score = evaluate_loadout(candidate, scenario, &self.registry).score;
            }
            tested += population.len() as u64;

            // Stable sort: equal scores keep their order, so a fixed seed
            // reproduces the exact same ranking.
            population.sort_by(|a, b| b.score.cmp(&a.score));

            if population[0].score > best_score {
                best_score = population[0].score;
                best = population.iter().take(config.top_builds).cloned().collect();
            }

            on_progress(ProgressUpdate {
                generation,
                total_generations: config.generations,
                best_score,
                tested_combinations: tested,
            });
            generations_completed = generation + 1;

            let mut next: Vec<Loadout> = population.iter().take(elite_count).cloned().collect();
            while next.len() < config.population_size {
                let parent_one = tournament_select(&population, config.tournament_size, &mut rng);
                let parent_two = tournament_select(&population, config.tournament_size, &mut rng);
                let mut child = crossover(parent_one, parent_two, &mut rng);
                mutate(&mut child, &self.registry, config.mutation_rate, &mut rng);
                next.push(child);
            }
            population = next;

            // Cooperative scheduling point; also where external cancellation
            // gets its chance to land before the next generation starts.
            tokio::time::sleep(config.generation_pause).await;
        }

        SearchOutcome {
            best,
            best_score,
            tested_combinations: tested,
            generations_completed,
            termination,
            seed,
        }
    }

    /// [run](Self::run) on a throwaway current-thread runtime, for the CLI
    /// and server paths that are not already async.
    pub fn run_blocking<F>(
        &self,
        scenario: &SearchScenario,
        config: &SearchConfig,
        on_progress: F,
    ) -> std::io::Result<SearchOutcome>
    where
        F: FnMut(ProgressUpdate),
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        Ok(runtime.block_on(self.run(scenario, config, on_progress)))
    }
}

/// Fittest of `size` uniform draws (with replacement).
fn tournament_select<'a>(population: &'a [Loadout], size: usize, rng: &mut Rng) -> &'a Loadout {
    let mut winner = &population[rng.next_below(population.len())];
    for _ in 1..size.max(1) {
        let challenger = &population[rng.next_below(population.len())];
        if challenger.score > winner.score {
            winner = challenger;
        }
    }
    winner
}

fn pick_parent_slot(first: &str, second: &str, rng: &mut Rng) -> String {
    if rng.chance(0.5) {
        first.to_string()
    } else {
        second.to_string()
    }
}

/// Position-wise modifier merge: where both parents carry a mod, pick one at
/// random; where only one does, inherit it.
fn crossover_mods(first: &[String], second: &[String], rng: &mut Rng) -> Vec<String> {
    let length = first.len().max(second.len());
    let mut merged = Vec::with_capacity(length);
    for index in 0..length {
        match (first.get(index), second.get(index)) {
            (Some(a), Some(b)) => merged.push(if rng.chance(0.5) { a.clone() } else { b.clone() }),
            (Some(a), None) => merged.push(a.clone()),
            (None, Some(b)) => merged.push(b.clone()),
            (None, None) => {}
        }
    }
    merged
}

/// Each top-level slot inherited from either parent with equal probability.
fn crossover(first: &Loadout, second: &Loadout, rng: &mut Rng) -> Loadout {
    Loadout {
        character: pick_parent_slot(&first.character, &second.character, rng),
        primary_weapon: pick_parent_slot(&first.primary_weapon, &second.primary_weapon, rng),
        secondary_weapon: pick_parent_slot(&first.secondary_weapon, &second.secondary_weapon, rng),
        melee_weapon: pick_parent_slot(&first.melee_weapon, &second.melee_weapon, rng),
        character_mods: crossover_mods(&first.character_mods, &second.character_mods, rng),
        primary_mods: crossover_mods(&first.primary_mods, &second.primary_mods, rng),
        secondary_mods: crossover_mods(&first.secondary_mods, &second.secondary_mods, rng),
        melee_mods: crossover_mods(&first.melee_mods, &second.melee_mods, rng),
        score: 0,
    }
}

/// With probability `rate`: pick one of the four modifier lists uniformly and
/// replace one random slot with a uniformly random registry mod.
fn mutate(child: &mut Loadout, registry: &CatalogRegistry, rate: f64, rng: &mut Rng) {
    if !rng.chance(rate) {
        return;
    }
    let list = match rng.next_below(4) {
        0 => &mut child.character_mods,
        1 => &mut child.primary_mods,
        2 => &mut child.secondary_mods,
        _ => &mut child.melee_mods,
    };
    if list.is_empty() {
        return;
    }
    let Some(replacement) = rng.pick(registry.mod_names()) else {
        return;
    };
    let index = rng.next_below(list.len());
    list[index] = replacement.clone();
}

const FALLBACK_SEED: u64 = 0x9e3779b97f4a7c15;

fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    if getrandom::getrandom(&mut bytes).is_err() {
        return FALLBACK_SEED;
    }
    u64::from_le_bytes(bytes)
}
