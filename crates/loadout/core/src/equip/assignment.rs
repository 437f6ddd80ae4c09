use arrayvec::ArrayVec;

use crate::config::OptimizerConfig;
use crate::roster::{Costume, MemoryId, SlotId};

/// Speculative loadout for one costume: slot → memory.
///
/// Assignments are values. [`Assignment::with`] and [`Assignment::without`]
/// return a new snapshot and leave the receiver untouched, so candidate
/// loadouts can be evaluated independently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    entries: ArrayVec<(SlotId, MemoryId), { OptimizerConfig::MAX_SLOTS }>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assignment of the memories currently equipped on the costume.
    pub fn equipped(costume: &Costume) -> Self {
        costume
            .slots()
            .iter()
            .filter_map(|slot| slot.equipped.map(|memory| (slot.id, memory)))
            .collect()
    }

    /// Memory assigned to `slot`.
    #[inline]
    pub fn get(&self, slot: SlotId) -> Option<MemoryId> {
        self.entries
            .iter()
            .find(|(assigned, _)| *assigned == slot)
            .map(|&(_, memory)| memory)
    }

    #[inline]
    pub fn is_assigned(&self, slot: SlotId) -> bool {
        self.get(slot).is_some()
    }

    /// True when `memory` occupies any slot other than `except`.
    #[inline]
    pub fn holds_elsewhere(&self, memory: MemoryId, except: SlotId) -> bool {
        self.entries
            .iter()
            .any(|&(slot, assigned)| assigned == memory && slot != except)
    }

    /// New snapshot with `slot` set to `memory`.
    ///
    /// # Panics
    ///
    /// Panics when more than [`OptimizerConfig::MAX_SLOTS`] distinct slots are
    /// assigned, which a valid costume cannot produce.
    #[must_use]
    pub fn with(&self, slot: SlotId, memory: MemoryId) -> Self {
        let mut next = self.clone();
        match next.entries.iter_mut().find(|(assigned, _)| *assigned == slot) {
            Some(entry) => entry.1 = memory,
            None => next.entries.push((slot, memory)),
        }
        next
    }

    /// New snapshot with `slot` cleared.
    #[must_use]
    pub fn without(&self, slot: SlotId) -> Self {
        self.entries
            .iter()
            .copied()
            .filter(|(assigned, _)| *assigned != slot)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, MemoryId)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(SlotId, MemoryId)> for Assignment {
    /// Later entries for the same slot replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (SlotId, MemoryId)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |acc, (slot, memory)| acc.with(slot, memory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_returns_new_snapshot() {
        let base = Assignment::new().with(SlotId(1), MemoryId(10));
        let trial = base.with(SlotId(1), MemoryId(11)).with(SlotId(2), MemoryId(12));

        assert_eq!(base.get(SlotId(1)), Some(MemoryId(10)));
        assert_eq!(base.len(), 1);
        assert_eq!(trial.get(SlotId(1)), Some(MemoryId(11)));
        assert_eq!(trial.get(SlotId(2)), Some(MemoryId(12)));
    }

    #[test]
    fn holds_elsewhere_ignores_the_slot_itself() {
        let assignment = Assignment::new().with(SlotId(1), MemoryId(10));

        assert!(!assignment.holds_elsewhere(MemoryId(10), SlotId(1)));
        assert!(assignment.holds_elsewhere(MemoryId(10), SlotId(2)));
        assert!(!assignment.holds_elsewhere(MemoryId(11), SlotId(2)));
    }

    #[test]
    fn without_clears_one_slot() {
        let assignment: Assignment = [(SlotId(1), MemoryId(10)), (SlotId(2), MemoryId(11))]
            .into_iter()
            .collect();
        let cleared = assignment.without(SlotId(1));

        assert!(!cleared.is_assigned(SlotId(1)));
        assert_eq!(cleared.get(SlotId(2)), Some(MemoryId(11)));
        assert_eq!(assignment.len(), 2);
    }
}
