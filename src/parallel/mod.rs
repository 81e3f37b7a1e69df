//! Parallel batch re-scoring of loadout lists (leaderboard recompute, CLI
//! rescoring). The genetic loop itself stays sequential and cooperative;
//! rayon is only used here, where there is exactly one mutator per loadout.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::catalog::registry::CatalogRegistry;
use crate::optimizer::loadout::{evaluate_loadout, Loadout};
use crate::optimizer::SearchScenario;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for index in 0..num_batches {
        let size = base + usize::from(index < remainder);
        ranges.push((start, start + size));
        start += size;
    }
    ranges
}

/// Worker thread count for batch scoring. 0 means the global rayon pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }

    /// Run a closure on this pool; falls back to the caller's pool when the
    /// requested pool cannot be built (never panics on degenerate input).
    pub fn run<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(_) => f(),
        }
    }
}

/// Re-score every loadout in place under one scenario, distributing across
/// the current rayon pool. Scores of unknown references degrade to 0 exactly
/// as in sequential evaluation.
pub fn score_loadouts(
    registry: &CatalogRegistry,
    scenario: &SearchScenario,
    loadouts: &mut [Loadout],
) {
    loadouts.par_iter_mut().for_each(|loadout| {
        loadout.score = evaluate_loadout(loadout, scenario, registry).score;
    });
}

/// [score_loadouts] on an explicit worker pool.
pub fn score_loadouts_with_pool(
    pool: &WorkerPool,
    registry: &CatalogRegistry,
    scenario: &SearchScenario,
    loadouts: &mut [Loadout],
) {
    pool.run(|| score_loadouts(registry, scenario, loadouts));
}
