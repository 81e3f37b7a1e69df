//! Saved builds: one JSON file per build under `data/builds/`, keyed by a
//! sanitized id. Unreadable files are skipped when listing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::combat::evaluator::ContentType;
use crate::combat::faction::Faction;
use crate::optimizer::loadout::{BuildEvaluation, Loadout};
use crate::optimizer::SearchScenario;
use crate::store::StoreError;

pub const DEFAULT_BUILDS_DIR: &str = "data/builds";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedBuild {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub loadout: Loadout,
    pub content_type: ContentType,
    pub target_faction: Faction,
    pub enemy_level: u32,
    pub dps: i64,
    pub ehp: i64,
    pub score: i64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub id: String,
    pub name: String,
    pub character: String,
    pub score: i64,
    pub created_at: String,
}

fn sanitize_id(id: &str) -> String {
    let cleaned: String = id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

fn build_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_id(id)))
}

/// Evaluate and persist a new build. Fresh uuid id and RFC3339 timestamp.
pub fn create_build(
    dir: &Path,
    name: &str,
    loadout: Loadout,
    scenario: &SearchScenario,
    evaluation: BuildEvaluation,
    notes: String,
    tags: Vec<String>,
) -> Result<SavedBuild, StoreError> {
    let build = SavedBuild {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        loadout,
        content_type: scenario.content_type,
        target_faction: scenario.target_faction,
        enemy_level: scenario.enemy_level,
        dps: evaluation.dps,
        ehp: evaluation.ehp,
        score: evaluation.score,
        notes,
        tags,
    };
    save_build(dir, &build)?;
    Ok(build)
}

pub fn save_build(dir: &Path, build: &SavedBuild) -> Result<(), StoreError> {
    fs::create_dir_all(dir)?;
    let raw = serde_json::to_string_pretty(build)?;
    fs::write(build_path(dir, &build.id), raw)?;
    Ok(())
}

pub fn load_build(dir: &Path, id: &str) -> Result<SavedBuild, StoreError> {
    let path = build_path(dir, id);
    if !path.exists() {
        return Err(StoreError::NotFound);
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// All readable builds in the directory, sorted by descending score then
/// name. Missing directory means no builds, not an error.
pub fn list_builds(dir: &Path) -> Vec<BuildSummary> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut summaries: Vec<BuildSummary> = entries
        .flatten()
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|entry| {
            let raw = fs::read_to_string(entry.path()).ok()?;
            let build: SavedBuild = serde_json::from_str(&raw).ok()?;
            Some(BuildSummary {
                id: build.id,
                name: build.name,
                character: build.loadout.character,
                score: build.score,
                created_at: build.created_at,
            })
        })
        .collect();
    summaries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("arsenal_builds_{}_{tag}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn sample_loadout() -> Loadout {
        Loadout {
            character: "Saryn".to_string(),
            primary_weapon: "Braton".to_string(),
            secondary_weapon: "Lato".to_string(),
            melee_weapon: "Skana".to_string(),
            character_mods: vec!["Vitality".to_string()],
            primary_mods: vec!["Serration".to_string()],
            secondary_mods: vec![],
            melee_mods: vec![],
            score: 500,
        }
    }

    #[test]
    fn create_then_load_round_trips() {
        let dir = temp_dir("roundtrip");
        let build = create_build(
            &dir,
            "Spore farm",
            sample_loadout(),
            &SearchScenario::default(),
            BuildEvaluation {
                dps: 900,
                ehp: 300,
                score: 750,
            },
            String::new(),
            vec!["farm".to_string()],
        )
        .unwrap();

        let loaded = load_build(&dir, &build.id).unwrap();
        assert_eq!(loaded.name, "Spore farm");
        assert_eq!(loaded.score, 750);
        assert_eq!(loaded.loadout.character, "Saryn");

        let listed = list_builds(&dir);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, build.id);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn loading_missing_build_is_not_found() {
        let dir = temp_dir("missing");
        assert!(matches!(
            load_build(&dir, "nope"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn ids_are_sanitized_for_the_filesystem() {
        assert_eq!(sanitize_id("a/b\\c:d"), "abcd");
        assert_eq!(sanitize_id("../../etc"), "etc");
        assert_eq!(sanitize_id("##"), "unknown");
    }
}
