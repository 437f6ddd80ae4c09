//! In-memory LoadoutRepository implementation for tests and local runs.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use loadout_content::Content;
use loadout_core::{Assignment, Character, CharacterId, CostumeId, MemoryCatalog, Roster, SlotId};
use tracing::debug;

use super::{LoadoutRepository, RepositoryError, Result};

/// Holds the loaded roster behind a lock; saved configurations live only as
/// long as the repository.
pub struct InMemoryRepository {
    roster: RwLock<Roster>,
    memories: Arc<MemoryCatalog>,
}

impl InMemoryRepository {
    pub fn new(roster: Roster, memories: impl Into<Arc<MemoryCatalog>>) -> Self {
        Self {
            roster: RwLock::new(roster),
            memories: memories.into(),
        }
    }

    /// Builds the repository from loaded content; the skill catalog is left
    /// to the caller.
    pub fn from_content(content: Content) -> Self {
        Self::new(content.roster, content.memories)
    }
}

#[async_trait]
impl LoadoutRepository for InMemoryRepository {
    async fn character(&self, id: CharacterId) -> Result<Option<Character>> {
        let roster = self
            .roster
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(roster.character(id).cloned())
    }

    async fn characters(&self) -> Result<Vec<Character>> {
        let roster = self
            .roster
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(roster.characters().to_vec())
    }

    async fn memories(&self) -> Result<Arc<MemoryCatalog>> {
        Ok(Arc::clone(&self.memories))
    }

    async fn save_assignment(&self, costume: CostumeId, assignment: &Assignment) -> Result<()> {
        let mut roster = self
            .roster
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let stored = roster
            .costume_mut(costume)
            .ok_or(RepositoryError::UnknownCostume(costume))?;
        stored.replace_equipped(assignment);
        debug!(%costume, slots = assignment.len(), "assignment saved");
        Ok(())
    }

    async fn save_level(&self, costume: CostumeId, slot: SlotId, level: u8) -> Result<()> {
        let mut roster = self
            .roster
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let stored = roster
            .costume_mut(costume)
            .ok_or(RepositoryError::UnknownCostume(costume))?;
        if !stored.set_current_level(slot, level) {
            return Err(RepositoryError::UnknownSlot { costume, slot });
        }
        debug!(%costume, %slot, level, "slot level saved");
        Ok(())
    }
}
