//! Repository contract for roster reads and loadout persistence.
//!
//! Static reference data (roster, memories) is read through the repository
//! so a backing store can be swapped in; the only writes are a costume's
//! equipped configuration and the reached level of its slots.

mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use loadout_core::{
    Assignment, Character, CharacterId, Costume, CostumeId, MemoryCatalog, SlotId,
};
use thiserror::Error;

pub use memory::InMemoryRepository;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("roster lock was poisoned")]
    LockPoisoned,

    #[error("costume {0} is not stored")]
    UnknownCostume(CostumeId),

    #[error("slot {slot} is not part of costume {costume}")]
    UnknownSlot { costume: CostumeId, slot: SlotId },

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Source of roster data and sink for saved configurations.
#[async_trait]
pub trait LoadoutRepository: Send + Sync {
    /// Load one character with its costumes.
    async fn character(&self, id: CharacterId) -> Result<Option<Character>>;

    /// Load every character, in roster order.
    async fn characters(&self) -> Result<Vec<Character>>;

    /// The memory catalog shared by all characters.
    async fn memories(&self) -> Result<Arc<MemoryCatalog>>;

    /// Replace the equipped memories of a costume with `assignment`.
    async fn save_assignment(&self, costume: CostumeId, assignment: &Assignment) -> Result<()>;

    /// Store the reached level of one slot.
    async fn save_level(&self, costume: CostumeId, slot: SlotId, level: u8) -> Result<()>;

    /// Find a costume together with its owner.
    async fn costume(&self, id: CostumeId) -> Result<Option<(Character, Costume)>> {
        let found = self.characters().await?.into_iter().find_map(|character| {
            let costume = character.costume(id).cloned()?;
            Some((character, costume))
        });
        Ok(found)
    }
}
