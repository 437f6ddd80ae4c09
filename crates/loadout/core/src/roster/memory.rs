//! Memories (equippable items) and the catalog they are proposed from.

use std::collections::{BTreeSet, HashMap};

use super::{CharacterClass, CharacterId, MemoryId, Role, RosterError, base_name};

/// Separators accepted between tuning skill names (`走り速度＋、HP＋` or `a, b`).
const SKILL_SEPARATORS: [char; 2] = ['、', ','];

/// An equippable memory sourced from one character.
///
/// The source's base name is computed once in [`Memory::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Memory {
    pub id: MemoryId,
    pub character_id: CharacterId,
    /// Display name of the source character.
    pub character_name: String,
    pub role: Role,
    pub class: Option<CharacterClass>,
    /// Delimiter-separated tuning skills, applied in Normal slots.
    pub tuning_skill: Option<String>,
    /// Single special tuning skill, applied in Special slots.
    pub special_tuning_skill: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    source_base: String,
}

impl Memory {
    pub fn new(
        id: MemoryId,
        character_id: CharacterId,
        character_name: impl Into<String>,
        role: Role,
        class: Option<CharacterClass>,
    ) -> Self {
        let character_name = character_name.into();
        Self {
            id,
            character_id,
            source_base: base_name(&character_name).to_owned(),
            character_name,
            role,
            class,
            tuning_skill: None,
            special_tuning_skill: None,
        }
    }

    /// Sets the tuning skill text (builder pattern).
    pub fn with_tuning_skill(mut self, skills: impl Into<String>) -> Self {
        self.tuning_skill = Some(skills.into());
        self
    }

    /// Sets the special tuning skill (builder pattern).
    pub fn with_special_skill(mut self, skill: impl Into<String>) -> Self {
        self.special_tuning_skill = Some(skill.into());
        self
    }

    /// Individual tuning skill names, trimmed, empty pieces dropped.
    pub fn tuning_skills(&self) -> impl Iterator<Item = &str> {
        self.tuning_skill
            .as_deref()
            .unwrap_or_default()
            .split(SKILL_SEPARATORS)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Special tuning skill, treating blank text as absent.
    pub fn special_skill(&self) -> Option<&str> {
        self.special_tuning_skill
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Base name of the source character, for the self-equip check.
    pub fn source_base_name(&self) -> &str {
        &self.source_base
    }
}

/// All memories available for proposal, in catalog order.
///
/// Catalog order matters: the optimizer's seed and fill steps pick the first
/// legal memory they meet.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    memories: Vec<Memory>,
    index: HashMap<MemoryId, usize>,
}

impl MemoryCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(memories: Vec<Memory>) -> Result<Self, RosterError> {
        let mut index = HashMap::with_capacity(memories.len());
        for (position, memory) in memories.iter().enumerate() {
            if index.insert(memory.id, position).is_some() {
                return Err(RosterError::DuplicateMemoryId(memory.id));
            }
        }
        Ok(Self { memories, index })
    }

    pub fn get(&self, id: MemoryId) -> Option<&Memory> {
        self.index.get(&id).map(|&position| &self.memories[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Memory> {
        self.memories.iter()
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// Memories whose special tuning skill is `skill`, in catalog order.
    pub fn carriers_of<'a>(&'a self, skill: &'a str) -> impl Iterator<Item = &'a Memory> + 'a {
        self.memories
            .iter()
            .filter(move |memory| memory.special_skill() == Some(skill))
    }

    /// Distinct special tuning skill names, sorted.
    pub fn special_skill_names(&self) -> Vec<&str> {
        self.memories
            .iter()
            .filter_map(Memory::special_skill)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a MemoryCatalog {
    type Item = &'a Memory;
    type IntoIter = std::slice::Iter<'a, Memory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
