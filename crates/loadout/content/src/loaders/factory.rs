//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use loadout_core::{MemoryCatalog, Roster, SkillCatalog};
use tracing::info;

use crate::loaders::{LoadResult, MemoryLoader, RosterLoader, SkillLoader};

/// Everything the optimizer service needs, loaded and cross-checked.
#[derive(Debug, Clone)]
pub struct Content {
    pub skills: SkillCatalog,
    pub roster: Roster,
    pub memories: MemoryCatalog,
}

/// Content factory that loads all loadout content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── skills.toml
/// ├── special_skills.toml
/// ├── roster.ron
/// └── memories.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load both skill tables from `skills.toml` and `special_skills.toml`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        let normal = SkillLoader::load_normal(&self.data_dir.join("skills.toml"))?;
        let special = SkillLoader::load_special(&self.data_dir.join("special_skills.toml"))?;
        SkillCatalog::new(normal, special).map_err(anyhow::Error::new)
    }

    /// Load characters and costumes from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Load the memory catalog from `memories.ron`.
    ///
    /// # Arguments
    ///
    /// * `roster` - Roster used to resolve each memory's source character
    pub fn load_memories(&self, roster: &Roster) -> LoadResult<MemoryCatalog> {
        MemoryLoader::load(&self.data_dir.join("memories.ron"), roster)
    }

    /// Load every file and check that equipped memories exist.
    pub fn load_all(&self) -> LoadResult<Content> {
        let skills = self.load_skills()?;
        let roster = self.load_roster()?;
        let memories = self.load_memories(&roster)?;

        let dangling = roster
            .characters()
            .iter()
            .flat_map(|character| &character.costumes)
            .flat_map(|costume| costume.slots().iter().map(move |slot| (costume, slot)))
            .find_map(|(costume, slot)| {
                slot.equipped
                    .filter(|memory| memories.get(*memory).is_none())
                    .map(|memory| (costume.id, slot.number, memory))
            });
        if let Some((costume, number, memory)) = dangling {
            return Err(anyhow::anyhow!(
                "Costume {} slot {} equips unknown memory {}",
                costume.0,
                number,
                memory.0
            ));
        }

        info!(
            data_dir = %self.data_dir.display(),
            normal_skills = skills.normal_len(),
            special_skills = skills.special_len(),
            characters = roster.characters().len(),
            memories = memories.len(),
            "content loaded"
        );

        Ok(Content {
            skills,
            roster,
            memories,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
