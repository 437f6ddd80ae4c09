//! Roster loader: characters and their costume sheets.
//!
//! ```ron
//! #![enable(implicit_some)]
//! (
//!     characters: [
//!         (
//!             id: 1,
//!             name: "緑谷出久",
//!             role: "Strike",
//!             class: "HERO",
//!             stats: (hp: 650, alpha_damage: 60, beta_damage: 75, gamma_damage: 100),
//!             costumes: [
//!                 (
//!                     id: 1,
//!                     name: "ヒーローコスチューム",
//!                     rarity: "SR",
//!                     normal: ["Strike", "Strike(H)", "", "Rapid"],
//!                     special: ["Strike", "Rapid(V)"],
//!                     equipped: {1: 3},
//!                     levels: {1: 2},
//!                 ),
//!             ],
//!         ),
//!     ],
//! )
//! ```
//!
//! Normal cells map to slots 1..=10 and special cells to slots 11..=12 in
//! order. `equipped` and `levels` are keyed by slot number.

use std::collections::BTreeMap;
use std::path::Path;

use loadout_core::{
    BaseStats, Character, CharacterClass, CharacterId, Costume, CostumeId, MemoryId,
    OptimizerConfig, Rarity, Role, Roster, Slot,
};
use serde::Deserialize;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};
use crate::rules::{SlotSpec, normal_max_level, slot_id, special_max_level};

/// One costume row of a character sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct CostumeSheet {
    pub id: u32,
    pub name: String,
    pub rarity: String,
    #[serde(default)]
    pub normal: Vec<String>,
    #[serde(default)]
    pub special: Vec<String>,
    #[serde(default)]
    pub equipped: BTreeMap<u8, u32>,
    #[serde(default)]
    pub levels: BTreeMap<u8, u8>,
}

/// One character with its costume sheets.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterSheet {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub class: String,
    #[serde(default)]
    pub stats: BaseStats,
    #[serde(default)]
    pub costumes: Vec<CostumeSheet>,
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    characters: Vec<CharacterSheet>,
}

impl CostumeSheet {
    /// Expands the sheet into a costume owned by `owner`.
    pub fn build(&self, owner: &Character) -> LoadResult<Costume> {
        let id = CostumeId(self.id);
        let rarity: Rarity = self
            .rarity
            .parse()
            .map_err(|_| anyhow::anyhow!("Costume {}: unknown rarity '{}'", self.id, self.rarity))?;

        let max_normal = usize::from(OptimizerConfig::MAX_NORMAL_SLOT);
        if self.normal.len() > max_normal || self.special.len() > 2 {
            return Err(anyhow::anyhow!(
                "Costume {}: at most {} normal and 2 special cells, got {} and {}",
                self.id,
                max_normal,
                self.normal.len(),
                self.special.len()
            ));
        }

        let cells = self
            .normal
            .iter()
            .zip(1u8..)
            .chain(self.special.iter().zip(OptimizerConfig::SPECIAL_SLOT_1..));

        let mut slots = Vec::new();
        for (cell, number) in cells {
            let Some(spec) = SlotSpec::parse(cell)
                .map_err(|e| anyhow::anyhow!("Costume {} slot {}: {}", self.id, number, e))?
            else {
                continue;
            };

            let max_level = if number <= OptimizerConfig::MAX_NORMAL_SLOT {
                normal_max_level(spec.class)
            } else {
                special_max_level(rarity, number)
            };
            let derived = slot_id(id, number)
                .ok_or_else(|| anyhow::anyhow!("Costume {}: id is too large to derive slot ids", self.id))?;
            let mut slot = Slot::new(derived, number, spec.role, max_level);
            if let Some(class) = spec.class {
                slot = slot.with_class(class);
            }
            if let Some(&level) = self.levels.get(&number) {
                slot = slot.with_current_level(level);
            }
            if let Some(&memory) = self.equipped.get(&number) {
                slot = slot.with_equipped(MemoryId(memory));
            }
            slots.push(slot);
        }

        for number in self.equipped.keys().chain(self.levels.keys()) {
            if !slots.iter().any(|slot| slot.number == *number) {
                return Err(anyhow::anyhow!(
                    "Costume {}: slot {} is referenced but not defined",
                    self.id,
                    number
                ));
            }
        }

        Costume::new(id, &self.name, rarity, owner.id, &owner.name, slots)
            .map_err(|e| anyhow::anyhow!("Costume {}: {}", self.id, e))
    }
}

impl CharacterSheet {
    pub fn build(&self) -> LoadResult<Character> {
        let class: CharacterClass = self.class.parse().map_err(|_| {
            anyhow::anyhow!("Character {}: unknown class '{}'", self.id, self.class)
        })?;
        let character = Character::new(
            CharacterId(self.id),
            &self.name,
            Role::new(&self.role),
            class,
            self.stats,
        );

        let costumes = self
            .costumes
            .iter()
            .map(|sheet| sheet.build(&character))
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(character.with_costumes(costumes))
    }
}

/// Loader for the roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the roster from a RON file of character sheets.
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load roster from {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let file: RosterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut characters = Vec::with_capacity(file.characters.len());
        for sheet in &file.characters {
            if characters.iter().any(|c: &Character| c.id.0 == sheet.id) {
                return Err(anyhow::anyhow!("Character {} is defined twice", sheet.id));
            }
            let character = sheet.build()?;
            debug!(character = %character.name, costumes = character.costumes.len(), "character loaded");
            characters.push(character);
        }

        let mut costume_ids: Vec<u32> = characters
            .iter()
            .flat_map(|c| c.costumes.iter().map(|costume| costume.id.0))
            .collect();
        costume_ids.sort_unstable();
        if let Some(pair) = costume_ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(anyhow::anyhow!("Costume {} is defined twice", pair[0]));
        }

        Ok(Roster::new(characters))
    }
}
