pub mod item;
pub mod normalize;
pub mod profiles;
pub mod registry;
pub mod validate;

pub use item::{
    is_cosmetic, load_items, stat_value_f64, AbilityRef, LevelStatTier, RawItem, RawStat,
    TierStat, DEFAULT_CATALOG_PATH,
};
pub use normalize::{
    build_character_profiles, build_modifier_profiles, build_weapon_profiles, classify_modifier,
    extract_stat, normalize_effect_name, CHARACTER_CATEGORY, MODIFIER_CATEGORY,
};
pub use profiles::{
    CharacterProfile, DamageMap, DamageType, EffectKind, ModKind, ModifierProfile,
    WeaponCategory, WeaponProfile,
};
pub use registry::{format_large_number, CatalogRegistry, RegistryCounts};
pub use validate::{
    validate_catalog, validate_items, ValidationDiagnostic, ValidationReport, ValidationSeverity,
};
