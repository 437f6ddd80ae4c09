//! Costumes, their slot layout, and series display ordering.

use arrayvec::ArrayVec;

use super::{CharacterId, CostumeId, RosterError, Slot, SlotId, SlotType, base_name};
use crate::config::OptimizerConfig;
use crate::equip::Assignment;

/// Opening and closing markers of a costume series, e.g. `ボランティア活動〈ネイビー〉`.
const SERIES_OPEN: char = '〈';
const SERIES_CLOSE: char = '〉';

/// Sort key for series that no ordering table knows.
pub const UNKNOWN_SERIES_ORDER: u32 = 999;

/// Costume rarity tier.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    #[strum(serialize = "C")]
    #[cfg_attr(feature = "serde", serde(rename = "C"))]
    Common,
    #[strum(serialize = "R")]
    #[cfg_attr(feature = "serde", serde(rename = "R"))]
    Rare,
    #[strum(serialize = "SR")]
    #[cfg_attr(feature = "serde", serde(rename = "SR"))]
    SuperRare,
    #[strum(serialize = "PUR")]
    #[cfg_attr(feature = "serde", serde(rename = "PUR"))]
    PremiumUltraRare,
}

impl Rarity {
    /// Star level shown next to the costume (C = 0 … PUR = 3).
    pub const fn star_level(self) -> u8 {
        match self {
            Self::Common => 0,
            Self::Rare => 1,
            Self::SuperRare => 2,
            Self::PremiumUltraRare => 3,
        }
    }
}

/// A costume owned by one character.
///
/// Slots are kept sorted by slot number and are unique per number; both are
/// enforced by [`Costume::new`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Costume {
    pub id: CostumeId,
    pub name: String,
    pub rarity: Rarity,
    pub character_id: CharacterId,
    /// Display name of the owning character.
    pub character_name: String,
    slots: ArrayVec<Slot, { OptimizerConfig::MAX_SLOTS }>,
    #[cfg_attr(feature = "serde", serde(skip))]
    owner_base: String,
}

impl Costume {
    /// Builds a costume, validating the slot layout.
    ///
    /// # Errors
    ///
    /// - [`RosterError::InvalidSlotNumber`] for numbers outside 1..=12
    /// - [`RosterError::SlotTypeMismatch`] when a slot's type disagrees with its number
    /// - [`RosterError::DuplicateSlotNumber`] when two slots share a number
    pub fn new(
        id: CostumeId,
        name: impl Into<String>,
        rarity: Rarity,
        character_id: CharacterId,
        character_name: impl Into<String>,
        mut slots: Vec<Slot>,
    ) -> Result<Self, RosterError> {
        slots.sort_by_key(|slot| slot.number);

        let mut layout: ArrayVec<Slot, { OptimizerConfig::MAX_SLOTS }> = ArrayVec::new();
        for slot in slots {
            let expected = SlotType::for_number(slot.number).ok_or(RosterError::InvalidSlotNumber {
                costume: id,
                number: slot.number,
            })?;
            if expected != slot.slot_type {
                return Err(RosterError::SlotTypeMismatch {
                    costume: id,
                    number: slot.number,
                    slot_type: slot.slot_type,
                });
            }
            if layout.last().is_some_and(|prev| prev.number == slot.number) {
                return Err(RosterError::DuplicateSlotNumber {
                    costume: id,
                    number: slot.number,
                });
            }
            // Numbers are unique and within 1..=12, so capacity cannot overflow.
            layout.push(slot);
        }

        let character_name = character_name.into();
        Ok(Self {
            id,
            name: name.into(),
            rarity,
            character_id,
            owner_base: base_name(&character_name).to_owned(),
            character_name,
            slots: layout,
        })
    }

    /// Slots in slot-number order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn slot_by_number(&self, number: u8) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.number == number)
    }

    pub fn special_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.is_special())
    }

    pub fn normal_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.is_normal())
    }

    /// Replaces the equipped memories with `assignment`; slots it leaves out
    /// are emptied.
    pub fn replace_equipped(&mut self, assignment: &Assignment) {
        for slot in &mut self.slots {
            slot.equipped = assignment.get(slot.id);
        }
    }

    /// Stores the reached level of one slot, clamped to `1..=max_level`.
    /// Returns `false` when the slot is not part of this costume.
    pub fn set_current_level(&mut self, slot: SlotId, level: u8) -> bool {
        let Some(stored) = self.slots.iter_mut().find(|candidate| candidate.id == slot) else {
            return false;
        };
        stored.current_level = level.clamp(1, stored.max_level.max(1));
        true
    }

    /// Base name of the owning character, precomputed for the self-equip check.
    pub fn owner_base_name(&self) -> &str {
        &self.owner_base
    }

    pub fn star_level(&self) -> u8 {
        self.rarity.star_level()
    }

    /// Costume name without the series suffix.
    pub fn base_name(&self) -> &str {
        self.name.split(SERIES_OPEN).next().unwrap_or(&self.name)
    }

    /// Series name between `〈` and `〉`, if any.
    pub fn series(&self) -> Option<&str> {
        let start = self.name.find(SERIES_OPEN)? + SERIES_OPEN.len_utf8();
        let len = self.name[start..].find(SERIES_CLOSE)?;
        (len > 0).then(|| &self.name[start..start + len])
    }

    /// Display order of this costume's series among its siblings.
    ///
    /// Costumes without a series come first. Unknown series sort last.
    pub fn series_order(&self) -> u32 {
        SeriesTable::for_costume(self.base_name())
            .order_of(self.series())
            .unwrap_or(UNKNOWN_SERIES_ORDER)
    }
}

/// Sorts costumes by `(series_order, id)` for display.
pub fn sort_by_series(costumes: &mut [Costume]) {
    costumes.sort_by_key(|costume| (costume.series_order(), costume.id));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SeriesTable {
    Standard,
    Idol,
    Volunteer,
}

impl SeriesTable {
    fn for_costume(base_name: &str) -> Self {
        match base_name {
            "スーパースター・アイドル" => Self::Idol,
            "ボランティア活動" => Self::Volunteer,
            _ => Self::Standard,
        }
    }

    fn order_of(self, series: Option<&str>) -> Option<u32> {
        let Some(series) = series else {
            return Some(0);
        };
        let order = match self {
            // The "-like" series borrow the opposite alignment's look; both
            // sit right after the default costume.
            Self::Standard => match series {
                "ヴィランライク" | "ヒーローライク" => 1,
                "ヒート" => 2,
                "コンバット" => 3,
                "ファンシー" => 4,
                "デンジャラス" => 5,
                _ => return None,
            },
            Self::Idol => match series {
                "ビオラ" => 1,
                "スカーレット" => 2,
                "アプリコット" => 3,
                "ミモザ" => 4,
                "ラナンキュラス" => 5,
                _ => return None,
            },
            Self::Volunteer => match series {
                "ネイビー" => 1,
                "オレンジ" => 2,
                "ブラック" => 3,
                "ピンク" => 4,
                "スカイブルー" => 5,
                _ => return None,
            },
        };
        Some(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{MemoryId, Role};

    fn costume(id: u32, name: &str) -> Costume {
        Costume::new(
            CostumeId(id),
            name,
            Rarity::SuperRare,
            CharacterId(1),
            "緑谷出久（オリジナル）",
            Vec::new(),
        )
        .unwrap()
    }

    fn slot(number: u8) -> Slot {
        Slot::new(SlotId(u32::from(number)), number, Role::from("Strike"), 3)
    }

    #[test]
    fn slots_are_sorted_and_owner_base_precomputed() {
        let built = Costume::new(
            CostumeId(1),
            "ヒーローコスチューム",
            Rarity::Rare,
            CharacterId(1),
            "緑谷出久（オリジナル）",
            vec![slot(12), slot(2), slot(1)],
        )
        .unwrap();

        let numbers: Vec<u8> = built.slots().iter().map(|slot| slot.number).collect();
        assert_eq!(numbers, vec![1, 2, 12]);
        assert_eq!(built.owner_base_name(), "緑谷出久");
        assert_eq!(built.star_level(), 1);
    }

    #[test]
    fn replace_equipped_clears_unlisted_slots() {
        let mut built = Costume::new(
            CostumeId(1),
            "ヒーローコスチューム",
            Rarity::Rare,
            CharacterId(1),
            "緑谷出久",
            vec![slot(1).with_equipped(MemoryId(4)), slot(2)],
        )
        .unwrap();

        built.replace_equipped(&Assignment::new().with(SlotId(2), MemoryId(9)));

        assert_eq!(built.slot_by_number(1).unwrap().equipped, None);
        assert_eq!(built.slot_by_number(2).unwrap().equipped, Some(MemoryId(9)));
    }

    #[test]
    fn stored_levels_stay_within_the_slot() {
        let mut built = Costume::new(CostumeId(1), "x", Rarity::Rare, CharacterId(1), "緑谷出久", vec![slot(1)]).unwrap();

        assert!(built.set_current_level(SlotId(1), 2));
        assert_eq!(built.slot(SlotId(1)).unwrap().current_level, 2);
        assert!(built.set_current_level(SlotId(1), 9));
        assert_eq!(built.slot(SlotId(1)).unwrap().current_level, 3);
        assert!(!built.set_current_level(SlotId(5), 1));
    }

    #[test]
    fn duplicate_slot_numbers_are_rejected() {
        let err = Costume::new(
            CostumeId(7),
            "x",
            Rarity::Common,
            CharacterId(1),
            "a",
            vec![slot(3), slot(3)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            RosterError::DuplicateSlotNumber {
                costume: CostumeId(7),
                number: 3
            }
        );
    }

    #[test]
    fn out_of_range_and_mistyped_slots_are_rejected() {
        let err = Costume::new(CostumeId(1), "x", Rarity::Common, CharacterId(1), "a", vec![slot(13)])
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidSlotNumber { number: 13, .. }));

        let mut mistyped = slot(11);
        mistyped.slot_type = SlotType::Normal;
        let err = Costume::new(CostumeId(1), "x", Rarity::Common, CharacterId(1), "a", vec![mistyped])
            .unwrap_err();
        assert!(matches!(err, RosterError::SlotTypeMismatch { number: 11, .. }));
    }

    #[test]
    fn series_is_extracted_from_brackets() {
        assert_eq!(costume(1, "ボランティア活動〈ネイビー〉").series(), Some("ネイビー"));
        assert_eq!(costume(1, "ボランティア活動〈ネイビー〉").base_name(), "ボランティア活動");
        assert_eq!(costume(1, "ヒーローコスチューム").series(), None);
        assert_eq!(costume(1, "壊れた〈〉").series(), None);
    }

    #[test]
    fn series_order_uses_the_matching_table() {
        assert_eq!(costume(1, "ヒーローコスチューム").series_order(), 0);
        assert_eq!(costume(1, "ヒーローコスチューム〈ヒート〉").series_order(), 2);
        assert_eq!(costume(1, "スーパースター・アイドル〈ミモザ〉").series_order(), 4);
        assert_eq!(costume(1, "ボランティア活動〈スカイブルー〉").series_order(), 5);
        assert_eq!(costume(1, "ヒーローコスチューム〈謎〉").series_order(), UNKNOWN_SERIES_ORDER);
        // Idol colours mean nothing outside the idol table.
        assert_eq!(costume(1, "ヒーローコスチューム〈ミモザ〉").series_order(), UNKNOWN_SERIES_ORDER);
    }

    #[test]
    fn like_series_sort_right_after_default() {
        assert_eq!(costume(1, "ヒーローコスチューム〈ヴィランライク〉").series_order(), 1);
        assert_eq!(costume(1, "ヴィランコスチューム〈ヒーローライク〉").series_order(), 1);
    }

    #[test]
    fn sort_by_series_breaks_ties_by_id() {
        let mut costumes = vec![
            costume(3, "ヒーローコスチューム〈コンバット〉"),
            costume(2, "ヒーローコスチューム"),
            costume(1, "ヒーローコスチューム〈ヒート〉"),
            costume(4, "別コスチューム"),
        ];
        sort_by_series(&mut costumes);

        let ids: Vec<u32> = costumes.iter().map(|costume| costume.id.0).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }
}
