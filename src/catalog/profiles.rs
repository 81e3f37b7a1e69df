//! Typed profiles produced by the normalizer. Registries hand out references;
//! scoring always clones a snapshot before mutating (never the registry).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Damage channel. Corrosive/Magnetic/Gas appear only in faction weighting
/// tables; weapon damage maps carry the first seven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Impact,
    Puncture,
    Slash,
    Heat,
    Cold,
    Electric,
    Toxin,
    Corrosive,
    Magnetic,
    Gas,
}

impl DamageType {
    /// The seven channels a weapon damage map always carries.
    pub const WEAPON_TYPES: [DamageType; 7] = [
        Self::Impact,
        Self::Puncture,
        Self::Slash,
        Self::Heat,
        Self::Cold,
        Self::Electric,
        Self::Toxin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Impact => "impact",
            Self::Puncture => "puncture",
            Self::Slash => "slash",
            Self::Heat => "heat",
            Self::Cold => "cold",
            Self::Electric => "electric",
            Self::Toxin => "toxin",
            Self::Corrosive => "corrosive",
            Self::Magnetic => "magnetic",
            Self::Gas => "gas",
        }
    }
}

/// Damage-type -> magnitude.
pub type DamageMap = HashMap<DamageType, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponCategory {
    Primary,
    Secondary,
    Melee,
}

impl WeaponCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Primary" => Some(Self::Primary),
            "Secondary" => Some(Self::Secondary),
            "Melee" => Some(Self::Melee),
            _ => None,
        }
    }
}

/// Character base stats. Unresolved stats fall back to 100 (sprint speed 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub health: f64,
    pub shield: f64,
    pub armor: f64,
    pub energy: f64,
    pub sprint_speed: f64,
    pub abilities: Vec<String>,
}

/// Weapon base stats. Chances are fractions (0.25 = 25%), uncapped above 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub damage: DamageMap,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub status_chance: f64,
    pub fire_rate: f64,
    pub accuracy: f64,
    pub reload: f64,
    pub magazine: f64,
    pub category: WeaponCategory,
    pub weapon_type: Option<String>,
}

/// Effect kinds the scoring model knows how to apply. Effect names that parse
/// to no kind stay in the effects map but are ignored at application time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    BaseDamage,
    CritChance,
    CritMultiplier,
    StatusChance,
    FireRate,
    Multishot,
    Health,
    Shield,
    Armor,
    Energy,
}

impl EffectKind {
    /// Parse a normalized effect name (see
    /// [normalize_effect_name](crate::catalog::normalize_effect_name)).
    pub fn from_normalized(name: &str) -> Option<Self> {
        match name {
            "baseDamage" => Some(Self::BaseDamage),
            "critChance" => Some(Self::CritChance),
            "critMultiplier" => Some(Self::CritMultiplier),
            "statusChance" => Some(Self::StatusChance),
            "fireRate" => Some(Self::FireRate),
            "multishot" => Some(Self::Multishot),
            "health" => Some(Self::Health),
            "shield" => Some(Self::Shield),
            "armor" => Some(Self::Armor),
            "energy" => Some(Self::Energy),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BaseDamage => "baseDamage",
            Self::CritChance => "critChance",
            Self::CritMultiplier => "critMultiplier",
            Self::StatusChance => "statusChance",
            Self::FireRate => "fireRate",
            Self::Multishot => "multishot",
            Self::Health => "health",
            Self::Shield => "shield",
            Self::Armor => "armor",
            Self::Energy => "energy",
        }
    }
}

/// Coarse modifier classification inferred from the name. Sorting aid for
/// listings only; never consulted by the scoring model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModKind {
    BaseDamage,
    Multishot,
    CritChance,
    CritMultiplier,
    Survivability,
    Utility,
}

/// Modifier effects, keyed by normalized effect name, values in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierProfile {
    pub polarity: String,
    pub capacity: f64,
    pub max_rank: u32,
    pub effects: HashMap<String, f64>,
    pub kind: ModKind,
}
