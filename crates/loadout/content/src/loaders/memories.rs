//! Memory catalog loader.
//!
//! ```ron
//! #![enable(implicit_some)]
//! (
//!     memories: [
//!         (id: 1, character_id: 2, role: "Strike", class: "HERO", tuning_skill: "走り速度＋、最大HP＋"),
//!         (id: 2, character_id: 3, role: "Rapid", special_tuning_skill: "フィクサー"),
//!     ],
//! )
//! ```

use std::path::Path;

use loadout_core::{
    CharacterClass, CharacterId, Memory, MemoryCatalog, MemoryId, Role, Roster, RosterError,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One memory entry. The source character's name comes from the roster.
#[derive(Debug, Clone, Deserialize)]
pub struct MemorySpec {
    pub id: u32,
    pub character_id: u32,
    pub role: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub tuning_skill: Option<String>,
    #[serde(default)]
    pub special_tuning_skill: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MemoryFile {
    memories: Vec<MemorySpec>,
}

impl MemorySpec {
    pub fn build(&self, roster: &Roster) -> LoadResult<Memory> {
        let id = MemoryId(self.id);
        let character_id = CharacterId(self.character_id);
        let source = roster.character(character_id).ok_or_else(|| {
            anyhow::Error::new(RosterError::UnknownSourceCharacter {
                memory: id,
                character: character_id,
            })
        })?;

        let class = self
            .class
            .as_deref()
            .filter(|class| !class.trim().is_empty())
            .map(|class| {
                class.trim().parse::<CharacterClass>().map_err(|_| {
                    anyhow::anyhow!("Memory {}: unknown class '{}'", self.id, class)
                })
            })
            .transpose()?;

        let mut memory = Memory::new(id, character_id, &source.name, Role::new(&self.role), class);
        if let Some(skills) = self.tuning_skill.as_deref() {
            memory = memory.with_tuning_skill(skills);
        }
        if let Some(skill) = self.special_tuning_skill.as_deref() {
            memory = memory.with_special_skill(skill);
        }
        Ok(memory)
    }
}

/// Loader for the memory catalog from RON files.
pub struct MemoryLoader;

impl MemoryLoader {
    /// Load memories from a RON file, resolving source characters in `roster`.
    pub fn load(path: &Path, roster: &Roster) -> LoadResult<MemoryCatalog> {
        let content = read_file(path)?;
        Self::parse(&content, roster)
            .map_err(|e| anyhow::anyhow!("Failed to load memories from {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, roster: &Roster) -> LoadResult<MemoryCatalog> {
        let file: MemoryFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse memory RON: {}", e))?;

        let memories = file
            .memories
            .iter()
            .map(|spec| spec.build(roster))
            .collect::<LoadResult<Vec<_>>>()?;

        MemoryCatalog::new(memories).map_err(anyhow::Error::new)
    }
}
