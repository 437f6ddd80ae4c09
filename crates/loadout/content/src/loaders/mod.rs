//! Content loaders for reading loadout data from files.
//!
//! Skill tables are TOML, the roster and memory catalog are RON. Every loader
//! converts its file format into loadout-core values and reports failures with
//! the offending path.

pub mod factory;
pub mod memories;
pub mod roster;
pub mod skills;

pub use factory::{Content, ContentFactory};
pub use memories::{MemoryLoader, MemorySpec};
pub use roster::{CharacterSheet, CostumeSheet, RosterLoader};
pub use skills::{LevelsSpec, SkillLoader, SkillSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
