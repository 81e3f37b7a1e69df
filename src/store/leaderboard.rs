//! Local leaderboard: a single JSON file of the best submitted builds, kept
//! sorted descending by score and capped. "Similar" lookups match content
//! type and faction with an enemy-level window, for seeding new searches
//! from previously good builds.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::evaluator::ContentType;
use crate::combat::faction::Faction;
use crate::optimizer::loadout::{BuildEvaluation, Loadout};
use crate::optimizer::SearchScenario;
use crate::store::StoreError;

pub const DEFAULT_LEADERBOARD_PATH: &str = "data/leaderboard.json";
pub const LEADERBOARD_CAP: usize = 100;
const SIMILAR_LEVEL_WINDOW: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub loadout: Loadout,
    pub score: i64,
    pub dps: i64,
    pub ehp: i64,
    pub content_type: ContentType,
    pub target_faction: Faction,
    pub enemy_level: u32,
    pub submitted_at: String,
}

impl LeaderboardEntry {
    pub fn from_evaluation(
        loadout: Loadout,
        scenario: &SearchScenario,
        evaluation: BuildEvaluation,
    ) -> Self {
        LeaderboardEntry {
            id: uuid::Uuid::new_v4().to_string(),
            loadout,
            score: evaluation.score,
            dps: evaluation.dps,
            ehp: evaluation.ehp,
            content_type: scenario.content_type,
            target_faction: scenario.target_faction,
            enemy_level: scenario.enemy_level,
            submitted_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Load from disk; missing or unreadable file yields an empty board.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Leaderboard::default();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Insert an entry, keep the board sorted descending by score (dps as
    /// tie-break) and capped. Returns the entry's rank (1-based), or None if
    /// it fell off the end.
    pub fn submit(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let id = entry.id.clone();
        self.entries.push(entry);
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.dps.cmp(&a.dps)));
        self.entries.truncate(LEADERBOARD_CAP);
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| index + 1)
    }

    pub fn top(&self, count: usize) -> &[LeaderboardEntry] {
        &self.entries[..count.min(self.entries.len())]
    }

    /// Entries for the same content type and faction within the enemy-level
    /// window.
    pub fn similar(
        &self,
        content_type: ContentType,
        faction: Faction,
        enemy_level: u32,
    ) -> Vec<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|entry| {
                entry.content_type == content_type
                    && entry.target_faction == faction
                    && entry.enemy_level.abs_diff(enemy_level) <= SIMILAR_LEVEL_WINDOW
            })
            .collect()
    }
}
