//! Character survivability and the content-weighted build score.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::profiles::{CharacterProfile, EffectKind};
use crate::catalog::registry::CatalogRegistry;
use crate::combat::faction::ARMOR_PIVOT;

/// Character stat snapshot after modifier application.
#[derive(Debug, Clone, PartialEq)]
pub struct ModdedCharacter {
    pub health: f64,
    pub shield: f64,
    pub armor: f64,
    pub energy: f64,
}

/// Apply a modifier list to a character snapshot. Only health/shield/armor/
/// energy effects apply; everything else (and unknown modifiers) is ignored.
pub fn apply_mods_to_character(
    character: &CharacterProfile,
    mod_names: &[String],
    registry: &CatalogRegistry,
) -> ModdedCharacter {
    let mut modded = ModdedCharacter {
        health: character.health,
        shield: character.shield,
        armor: character.armor,
        energy: character.energy,
    };

    for mod_name in mod_names {
        let Some(modifier) = registry.modifier(mod_name) else {
            continue;
        };
        for (effect_name, pct) in &modifier.effects {
            match EffectKind::from_normalized(effect_name) {
                Some(EffectKind::Health) => modded.health *= 1.0 + pct / 100.0,
                Some(EffectKind::Shield) => modded.shield *= 1.0 + pct / 100.0,
                Some(EffectKind::Armor) => modded.armor *= 1.0 + pct / 100.0,
                Some(EffectKind::Energy) => modded.energy *= 1.0 + pct / 100.0,
                _ => {}
            }
        }
    }

    modded
}

/// Effective health: (health + shield) x (1 + armor/300), rounded. Unknown
/// characters score 0.
pub fn character_ehp(character_name: &str, mod_names: &[String], registry: &CatalogRegistry) -> i64 {
    let Some(character) = registry.character(character_name) else {
        return 0;
    };
    let modded = apply_mods_to_character(character, mod_names, registry);
    let ehp = (modded.health + modded.shield) * (1.0 + modded.armor / ARMOR_PIVOT);
    ehp.round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    SteelPath,
    Eso,
    Arbitration,
    ArchonHunt,
    General,
}

impl ContentType {
    /// Kebab-case parse; anything unrecognized falls back to General.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "steel-path" => Self::SteelPath,
            "eso" => Self::Eso,
            "arbitration" => Self::Arbitration,
            "archon-hunt" => Self::ArchonHunt,
            _ => Self::General,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SteelPath => "steel-path",
            Self::Eso => "eso",
            Self::Arbitration => "arbitration",
            Self::ArchonHunt => "archon-hunt",
            Self::General => "general",
        }
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Tolerant on the wire: unknown content types deserialize to General.
impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ContentType::parse(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentWeights {
    pub dps: f64,
    pub survivability: f64,
}

pub const fn content_weights(content_type: ContentType) -> ContentWeights {
    let (dps, survivability) = match content_type {
        ContentType::SteelPath => (0.7, 0.3),
        ContentType::Eso => (0.9, 0.1),
        ContentType::Arbitration => (0.6, 0.4),
        ContentType::ArchonHunt => (0.8, 0.2),
        ContentType::General => (0.75, 0.25),
    };
    ContentWeights { dps, survivability }
}

/// Weighted build score from the two fitness components, rounded.
pub fn build_score(dps: i64, ehp: i64, content_type: ContentType) -> i64 {
    let weights = content_weights(content_type);
    let score = (dps as f64 * weights.dps + ehp as f64 * weights.survivability)
        / (weights.dps + weights.survivability);
    score.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_parse_defaults_to_general() {
        assert_eq!(ContentType::parse("steel-path"), ContentType::SteelPath);
        assert_eq!(ContentType::parse("ESO"), ContentType::Eso);
        assert_eq!(ContentType::parse("railjack"), ContentType::General);
    }

    #[test]
    fn weights_sum_to_one_for_every_content_type() {
        for content_type in [
            ContentType::SteelPath,
            ContentType::Eso,
            ContentType::Arbitration,
            ContentType::ArchonHunt,
            ContentType::General,
        ] {
            let weights = content_weights(content_type);
            assert!((weights.dps + weights.survivability - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn score_is_weighted_average_of_components() {
        // general: (1000*0.75 + 200*0.25) / 1.0 = 800
        assert_eq!(build_score(1000, 200, ContentType::General), 800);
        // eso leans almost entirely on dps
        assert_eq!(build_score(1000, 0, ContentType::Eso), 900);
    }
}
