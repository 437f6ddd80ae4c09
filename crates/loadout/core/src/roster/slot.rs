//! Costume slots.

use std::ops::RangeInclusive;

use super::{CharacterClass, MemoryId, Role, SlotId};
use crate::config::OptimizerConfig;
use crate::error::{CoreError, ErrorSeverity};

/// Slot category. Normal slots apply a memory's tuning skills, Special slots
/// apply its special tuning skill.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum SlotType {
    Normal,
    Special,
}

impl SlotType {
    /// Slot type implied by a slot number, or `None` when out of range.
    pub const fn for_number(number: u8) -> Option<Self> {
        match number {
            1..=OptimizerConfig::MAX_NORMAL_SLOT => Some(Self::Normal),
            OptimizerConfig::SPECIAL_SLOT_1 | OptimizerConfig::SPECIAL_SLOT_2 => {
                Some(Self::Special)
            }
            _ => None,
        }
    }
}

/// Level changes a slot refuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("slot {slot} is already at its max level {max}")]
    AtMax { slot: SlotId, max: u8 },

    #[error("slot {slot} is already at level 1")]
    AtMin { slot: SlotId },

    #[error("level {level} is outside 1..={max} for slot {slot}")]
    OutOfRange { slot: SlotId, level: u8, max: u8 },
}

impl CoreError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AtMax { .. } => "SLOT_LEVEL_AT_MAX",
            Self::AtMin { .. } => "SLOT_LEVEL_AT_MIN",
            Self::OutOfRange { .. } => "SLOT_LEVEL_OUT_OF_RANGE",
        }
    }
}

/// One equipment slot of a costume.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub id: SlotId,
    pub number: u8,
    pub slot_type: SlotType,
    pub role: Role,
    pub class: Option<CharacterClass>,
    /// Level used when aggregating effects for optimization.
    pub max_level: u8,
    /// Level the player has actually reached; only the equipped-loadout view reads it.
    pub current_level: u8,
    pub equipped: Option<MemoryId>,
}

impl Slot {
    /// Creates an empty slot at level 1. The slot type follows the number.
    pub fn new(id: SlotId, number: u8, role: Role, max_level: u8) -> Self {
        Self {
            id,
            number,
            slot_type: SlotType::for_number(number).unwrap_or(SlotType::Normal),
            role,
            class: None,
            max_level,
            current_level: 1,
            equipped: None,
        }
    }

    /// Restricts the slot to one class (builder pattern).
    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Sets the reached level (builder pattern), clamped to `1..=max_level`.
    pub fn with_current_level(mut self, level: u8) -> Self {
        self.current_level = level.clamp(1, self.max_level.max(1));
        self
    }

    /// Marks a memory as equipped (builder pattern).
    pub fn with_equipped(mut self, memory: MemoryId) -> Self {
        self.equipped = Some(memory);
        self
    }

    /// Raises the reached level by one and returns it.
    pub fn level_up(&mut self) -> Result<u8, LevelError> {
        if self.current_level >= self.max_level {
            return Err(LevelError::AtMax {
                slot: self.id,
                max: self.max_level,
            });
        }
        self.current_level += 1;
        Ok(self.current_level)
    }

    /// Lowers the reached level by one and returns it.
    pub fn level_down(&mut self) -> Result<u8, LevelError> {
        if self.current_level <= 1 {
            return Err(LevelError::AtMin { slot: self.id });
        }
        self.current_level -= 1;
        Ok(self.current_level)
    }

    /// Sets the reached level; it must lie in `1..=max_level`.
    pub fn set_level(&mut self, level: u8) -> Result<u8, LevelError> {
        if !(1..=self.max_level).contains(&level) {
            return Err(LevelError::OutOfRange {
                slot: self.id,
                level,
                max: self.max_level,
            });
        }
        self.current_level = level;
        Ok(level)
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.slot_type == SlotType::Special
    }

    #[inline]
    pub fn is_normal(&self) -> bool {
        self.slot_type == SlotType::Normal
    }

    /// Normal slot numbers whose effects a Fixer in this slot multiplies.
    ///
    /// Special slot 11 feeds Normal slots 1–5, Special slot 12 feeds 6–10.
    pub fn fed_normal_slots(&self) -> Option<RangeInclusive<u8>> {
        match (self.slot_type, self.number) {
            (SlotType::Special, OptimizerConfig::SPECIAL_SLOT_1) => Some(1..=5),
            (SlotType::Special, OptimizerConfig::SPECIAL_SLOT_2) => Some(6..=10),
            _ => None,
        }
    }
}
