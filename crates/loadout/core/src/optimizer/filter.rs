//! Special-skill pins and the costume pre-filter they drive.

use crate::config::OptimizerConfig;
use crate::equip::can_slot_hold;
use crate::roster::{Costume, MemoryCatalog};

/// Special skills the caller wants placed in Special slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialPins {
    /// Pinned to Special slot 11.
    pub slot_1: Option<String>,
    /// Pinned to Special slot 12.
    pub slot_2: Option<String>,
    /// Pinned to whichever Special slot can take it, 11 first.
    pub either: Option<String>,
}

impl SpecialPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot_1(mut self, skill: impl Into<String>) -> Self {
        self.slot_1 = Some(skill.into());
        self
    }

    pub fn with_slot_2(mut self, skill: impl Into<String>) -> Self {
        self.slot_2 = Some(skill.into());
        self
    }

    pub fn with_either(mut self, skill: impl Into<String>) -> Self {
        self.either = Some(skill.into());
        self
    }

    /// Slot-11 pin, treating blank text as absent.
    pub fn slot_1(&self) -> Option<&str> {
        present(self.slot_1.as_deref())
    }

    /// Slot-12 pin, treating blank text as absent.
    pub fn slot_2(&self) -> Option<&str> {
        present(self.slot_2.as_deref())
    }

    pub fn either(&self) -> Option<&str> {
        present(self.either.as_deref())
    }

    /// Pin for a Special slot number in the fixed-slot modes.
    pub fn for_slot(&self, number: u8) -> Option<&str> {
        match number {
            OptimizerConfig::SPECIAL_SLOT_1 => self.slot_1(),
            OptimizerConfig::SPECIAL_SLOT_2 => self.slot_2(),
            _ => None,
        }
    }

    /// All present pins, for diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.slot_1(), self.slot_2(), self.either()].into_iter().flatten()
    }
}

fn present(pin: Option<&str>) -> Option<&str> {
    pin.map(str::trim).filter(|pin| !pin.is_empty())
}

/// How pins constrain which costumes are searched.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FilterMode {
    #[default]
    None,
    #[strum(serialize = "special_1")]
    #[cfg_attr(feature = "serde", serde(rename = "special_1"))]
    Special1,
    #[strum(serialize = "special_2")]
    #[cfg_attr(feature = "serde", serde(rename = "special_2"))]
    Special2,
    Both,
    Either,
}

impl FilterMode {
    /// Mode implied by the pins present.
    pub fn from_pins(pins: &SpecialPins) -> Self {
        if pins.either().is_some() {
            return Self::Either;
        }
        match (pins.slot_1().is_some(), pins.slot_2().is_some()) {
            (true, true) => Self::Both,
            (true, false) => Self::Special1,
            (false, true) => Self::Special2,
            (false, false) => Self::None,
        }
    }
}

/// Can Special slot `number` of `costume` hold the first carrier of `skill`?
///
/// Only the loadout-independent rules apply here; the search still checks
/// duplicates.
fn slot_accepts(costume: &Costume, number: u8, skill: &str, memories: &MemoryCatalog) -> bool {
    let Some(slot) = costume.slot_by_number(number) else {
        return false;
    };
    memories
        .carriers_of(skill)
        .next()
        .is_some_and(|memory| can_slot_hold(slot, memory, costume))
}

/// Does `costume` satisfy the pins `mode` requires?
fn accepts(costume: &Costume, pins: &SpecialPins, mode: FilterMode, memories: &MemoryCatalog) -> bool {
    const S1: u8 = OptimizerConfig::SPECIAL_SLOT_1;
    const S2: u8 = OptimizerConfig::SPECIAL_SLOT_2;

    let holds = |number: u8, pin: Option<&str>| {
        pin.is_some_and(|skill| slot_accepts(costume, number, skill, memories))
    };
    match mode {
        FilterMode::None => true,
        FilterMode::Special1 => holds(S1, pins.slot_1()),
        FilterMode::Special2 => holds(S2, pins.slot_2()),
        FilterMode::Both => holds(S1, pins.slot_1()) && holds(S2, pins.slot_2()),
        FilterMode::Either => holds(S1, pins.either()) || holds(S2, pins.either()),
    }
}

/// Costumes worth searching under `mode`, in input order.
///
/// A pin the mode requires that is absent leaves nothing eligible, as does a
/// pin no memory carries.
pub fn eligible_costumes<'c>(
    costumes: &'c [Costume],
    pins: &SpecialPins,
    mode: FilterMode,
    memories: &MemoryCatalog,
) -> Vec<&'c Costume> {
    costumes
        .iter()
        .filter(|costume| accepts(costume, pins, mode, memories))
        .collect()
}
