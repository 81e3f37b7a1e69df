//! Local persistence: saved builds (one JSON file each) and the leaderboard
//! (single JSON file). Read paths degrade to empty/default on any failure;
//! only writes surface errors.

pub mod builds;
pub mod leaderboard;

use std::fmt;
use std::io;

pub use builds::{
    create_build, list_builds, load_build, save_build, BuildSummary, SavedBuild,
    DEFAULT_BUILDS_DIR,
};
pub use leaderboard::{Leaderboard, LeaderboardEntry, DEFAULT_LEADERBOARD_PATH, LEADERBOARD_CAP};

#[derive(Debug)]
pub enum StoreError {
    NotFound,
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "record not found"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}
