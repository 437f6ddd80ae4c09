//! Loadout rules and the build optimizer.
//!
//! `loadout-core` holds the pure domain: roster values, the skill catalog,
//! the equip checker, effect aggregation, scoring, and the greedy per-costume
//! optimizer. Nothing here performs I/O or keeps global state; catalogs are
//! built once by the caller and passed in by reference.
pub mod config;
pub mod effects;
pub mod equip;
pub mod error;
pub mod optimizer;
pub mod roster;
pub mod scoring;
pub mod skills;

pub use config::{OptimizerConfig, ScoringPolicy};
pub use effects::{
    AggregatedEffects, EffectLevel, SkillEffect, aggregate, aggregate_with, equipped_assignment,
    format_heuristic, format_value,
};
pub use equip::{
    Assignment, EquipError, EquipViolations, can_equip, can_slot_hold, check_equip,
    validate_assignment, violations,
};
pub use error::{CoreError, ErrorSeverity};
pub use optimizer::{
    CostumeResult, FilterMode, OptimizeError, OptimizeRequest, OptimizerEnv, SlotSummary,
    SpecialPins, eligible_costumes, optimize, optimize_costume, rank,
};
pub use roster::{
    BaseStats, Character, CharacterClass, CharacterId, Costume, CostumeId, LevelError, Memory,
    MemoryCatalog, MemoryId, Rarity, Role, Roster, RosterError, Slot, SlotId, SlotType, base_name,
    sort_by_series,
};
pub use scoring::score;
pub use skills::{
    CatalogError, Direction, LevelTable, SkillCatalog, SkillDefinition, SkillKind,
    SpecialKind, SpecialSkillDefinition,
};
