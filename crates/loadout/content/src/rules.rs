//! Costume sheet rules: slot notation, slot ids, and level caps.
//!
//! Sheets describe slots compactly as `"Strike"`, `"Strike(H)"` (Hero only)
//! or `"Strike(V)"` (Villain only). An empty cell means the costume has no
//! slot at that position.

use loadout_core::{CharacterClass, CostumeId, OptimizerConfig, Rarity, Role, SlotId};

const HERO_SUFFIX: &str = "(H)";
const VILLAIN_SUFFIX: &str = "(V)";

/// Role and optional class constraint parsed from a sheet cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotSpec {
    pub role: Role,
    pub class: Option<CharacterClass>,
}

impl SlotSpec {
    /// Parses one sheet cell. Blank cells yield `Ok(None)`.
    pub fn parse(cell: &str) -> Result<Option<Self>, String> {
        let cell = cell.trim();
        if cell.is_empty() {
            return Ok(None);
        }

        let (role, class) = if let Some(role) = cell.strip_suffix(HERO_SUFFIX) {
            (role, Some(CharacterClass::Hero))
        } else if let Some(role) = cell.strip_suffix(VILLAIN_SUFFIX) {
            (role, Some(CharacterClass::Villain))
        } else {
            (cell, None)
        };

        let role = role.trim();
        if role.is_empty() || role.contains(['(', ')']) {
            return Err(format!("invalid slot cell '{cell}', expected 'Role', 'Role(H)' or 'Role(V)'"));
        }

        Ok(Some(Self {
            role: Role::from(role),
            class,
        }))
    }
}

/// Slot id derived from the costume id and slot number, `None` when the
/// costume id is too large to embed.
pub fn slot_id(costume: CostumeId, number: u8) -> Option<SlotId> {
    costume
        .0
        .checked_mul(100)
        .and_then(|base| base.checked_add(u32::from(number)))
        .map(SlotId)
}

/// Max level of a Normal slot: 3, or 4 when the slot is class-restricted.
pub const fn normal_max_level(class: Option<CharacterClass>) -> u8 {
    if class.is_some() { 4 } else { 3 }
}

/// Max level of a Special slot by costume rarity and slot number.
pub const fn special_max_level(rarity: Rarity, number: u8) -> u8 {
    let second = number == OptimizerConfig::SPECIAL_SLOT_2;
    match rarity {
        Rarity::Common | Rarity::Rare => {
            if second { 4 } else { 3 }
        }
        Rarity::SuperRare => {
            if second { 5 } else { 4 }
        }
        Rarity::PremiumUltraRare => {
            if second { 11 } else { 10 }
        }
    }
}
