//! Faction tables: status-effect factors, damage-type weighting, and the
//! armor level curve. Unknown factions carry the documented defaults
//! (status factor 1.2, base armor 100, all weights 1.0).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::profiles::DamageType;

pub const ARMOR_PIVOT: f64 = 300.0;
const ARMOR_LEVEL_EXPONENT: f64 = 1.75;
const ARMOR_LEVEL_SCALE: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Grineer,
    Corpus,
    Infested,
    Sentient,
    Corrupted,
    Other,
}

impl Faction {
    /// Case-insensitive parse; anything unrecognized maps to [Faction::Other].
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "grineer" => Self::Grineer,
            "corpus" => Self::Corpus,
            "infested" => Self::Infested,
            "sentient" => Self::Sentient,
            "corrupted" => Self::Corrupted,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grineer => "grineer",
            Self::Corpus => "corpus",
            Self::Infested => "infested",
            Self::Sentient => "sentient",
            Self::Corrupted => "corrupted",
            Self::Other => "other",
        }
    }

    /// Average payoff of a status proc against this faction, as a multiplier.
    pub const fn status_factor(self) -> f64 {
        match self {
            Self::Grineer => 1.3,
            Self::Corpus => 1.2,
            Self::Infested => 1.4,
            Self::Sentient => 1.1,
            Self::Corrupted => 1.25,
            Self::Other => 1.2,
        }
    }

    pub const fn base_armor(self) -> f64 {
        match self {
            Self::Grineer => 500.0,
            Self::Corpus => 50.0,
            Self::Infested => 0.0,
            Self::Corrupted => 400.0,
            Self::Sentient => 200.0,
            Self::Other => 100.0,
        }
    }

    /// Weight for one damage type against this faction. Unlisted pairs are
    /// neutral (1.0).
    pub const fn damage_type_weight(self, damage_type: DamageType) -> f64 {
        match (self, damage_type) {
            (Self::Grineer, DamageType::Puncture) => 1.5,
            (Self::Grineer, DamageType::Slash) => 0.75,
            (Self::Grineer, DamageType::Impact) => 0.75,
            (Self::Grineer, DamageType::Corrosive) => 1.75,
            (Self::Corpus, DamageType::Impact) => 1.5,
            (Self::Corpus, DamageType::Puncture) => 0.5,
            (Self::Corpus, DamageType::Magnetic) => 1.75,
            (Self::Corpus, DamageType::Toxin) => 1.5,
            (Self::Infested, DamageType::Slash) => 1.25,
            (Self::Infested, DamageType::Heat) => 1.25,
            (Self::Infested, DamageType::Gas) => 1.75,
            _ => 1.0,
        }
    }
}

impl Serialize for Faction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Tolerant on the wire: any unknown faction string deserializes to Other
// instead of failing the whole payload.
impl<'de> Deserialize<'de> for Faction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Faction::parse(&raw))
    }
}

/// Surviving damage fraction against this faction's armor at the given enemy
/// level: 300 / (300 + base_armor * (1 + (level - 1)^1.75 * 0.005)).
/// Multiplied into DPS; monotonically non-increasing in level.
pub fn armor_damage_reduction(enemy_level: u32, faction: Faction) -> f64 {
    let level_term = ((enemy_level.max(1) - 1) as f64).powf(ARMOR_LEVEL_EXPONENT);
    let leveled_armor = faction.base_armor() * (1.0 + level_term * ARMOR_LEVEL_SCALE);
    ARMOR_PIVOT / (ARMOR_PIVOT + leveled_armor)
}
