//! Reference data the optimizer reads: characters, costumes, slots, memories.
//!
//! The roster is a snapshot owned by the surrounding service. The optimizer
//! only reads it; speculative loadouts live in [`crate::equip::Assignment`]
//! values, and only a persisted configuration replaces a costume's equipped
//! memories.

mod character;
mod costume;
mod ids;
mod memory;
mod slot;

pub use character::{BaseStats, Character, CharacterClass, Role, VARIANT_OPEN, base_name};
pub use costume::{Costume, Rarity, UNKNOWN_SERIES_ORDER, sort_by_series};
pub use ids::{CharacterId, CostumeId, MemoryId, SlotId};
pub use memory::{Memory, MemoryCatalog};
pub use slot::{LevelError, Slot, SlotType};

use crate::error::{CoreError, ErrorSeverity};

/// Errors raised while assembling roster values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("costume {costume}: slot number {number} is outside 1..=12")]
    InvalidSlotNumber { costume: CostumeId, number: u8 },

    #[error("costume {costume}: slot number {number} declared as {slot_type}")]
    SlotTypeMismatch {
        costume: CostumeId,
        number: u8,
        slot_type: SlotType,
    },

    #[error("costume {costume}: slot number {number} appears twice")]
    DuplicateSlotNumber { costume: CostumeId, number: u8 },

    #[error("memory {0} appears twice in the catalog")]
    DuplicateMemoryId(MemoryId),

    #[error("memory {memory} references unknown character {character}")]
    UnknownSourceCharacter {
        memory: MemoryId,
        character: CharacterId,
    },
}

impl CoreError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use RosterError::*;
        match self {
            InvalidSlotNumber { .. } => "ROSTER_INVALID_SLOT_NUMBER",
            SlotTypeMismatch { .. } => "ROSTER_SLOT_TYPE_MISMATCH",
            DuplicateSlotNumber { .. } => "ROSTER_DUPLICATE_SLOT_NUMBER",
            DuplicateMemoryId(_) => "ROSTER_DUPLICATE_MEMORY_ID",
            UnknownSourceCharacter { .. } => "ROSTER_UNKNOWN_SOURCE_CHARACTER",
        }
    }
}

/// All characters known to the service.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    pub fn character_by_name(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|character| character.name == name)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|character| character.id == id)
    }

    /// Finds a costume and its owner.
    pub fn costume(&self, id: CostumeId) -> Option<(&Character, &Costume)> {
        self.characters.iter().find_map(|character| {
            character
                .costume(id)
                .map(|costume| (character, costume))
        })
    }

    pub fn costume_mut(&mut self, id: CostumeId) -> Option<&mut Costume> {
        self.characters
            .iter_mut()
            .find_map(|character| character.costume_mut(id))
    }

    /// Every character sharing `character`'s base name, itself included, in roster order.
    pub fn variants_of<'a>(&'a self, character: &Character) -> Vec<&'a Character> {
        let base = character.base_name();
        self.characters
            .iter()
            .filter(|candidate| candidate.base_name() == base)
            .collect()
    }
}
