//! Data-driven loadout content and loaders.
//!
//! This crate turns data files into loadout-core values:
//! - Normal and Special skill tables (TOML)
//! - Characters with their costume sheets (RON)
//! - The memory catalog (RON)
//!
//! The `rules` module holds the sheet conventions (slot notation, slot ids,
//! level caps) and is available without the `loaders` feature.

pub mod rules;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use rules::{SlotSpec, normal_max_level, slot_id, special_max_level};

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterSheet, Content, ContentFactory, CostumeSheet, LoadResult, MemoryLoader, MemorySpec,
    RosterLoader, SkillLoader,
};
