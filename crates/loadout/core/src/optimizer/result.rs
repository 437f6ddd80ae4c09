use crate::effects::AggregatedEffects;
use crate::equip::Assignment;
use crate::roster::{Costume, CostumeId, MemoryCatalog, MemoryId, Rarity, Role, SlotId, SlotType};

/// One occupied slot of an optimized loadout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSummary {
    pub slot_id: SlotId,
    pub slot_number: u8,
    pub slot_type: SlotType,
    pub memory_id: MemoryId,
    /// Source character of the memory.
    pub memory_name: String,
    /// Tuning skill text for Normal slots, special tuning skill for Special slots.
    pub skill: Option<String>,
    pub role: Role,
}

/// Best loadout found for one costume.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostumeResult {
    pub costume_id: CostumeId,
    pub costume_name: String,
    pub rarity: Rarity,
    pub star_level: u8,
    pub character_name: String,
    pub score: f64,
    pub assignment: Assignment,
    /// Occupied slots in slot-number order.
    pub configuration: Vec<SlotSummary>,
    pub effects: AggregatedEffects,
}

impl CostumeResult {
    pub(super) fn new(
        costume: &Costume,
        assignment: Assignment,
        memories: &MemoryCatalog,
        score: f64,
        effects: AggregatedEffects,
    ) -> Self {
        let configuration = costume
            .slots()
            .iter()
            .filter_map(|slot| {
                let memory = memories.get(assignment.get(slot.id)?)?;
                let skill = match slot.slot_type {
                    SlotType::Normal => memory.tuning_skill.clone(),
                    SlotType::Special => memory.special_tuning_skill.clone(),
                };
                Some(SlotSummary {
                    slot_id: slot.id,
                    slot_number: slot.number,
                    slot_type: slot.slot_type,
                    memory_id: memory.id,
                    memory_name: memory.character_name.clone(),
                    skill,
                    role: memory.role.clone(),
                })
            })
            .collect();

        Self {
            costume_id: costume.id,
            costume_name: costume.name.clone(),
            rarity: costume.rarity,
            star_level: costume.star_level(),
            character_name: costume.character_name.clone(),
            score,
            assignment,
            configuration,
            effects,
        }
    }
}

/// Orders results by score, highest first, keeping input order among ties,
/// and keeps the first `top_n`.
pub fn rank(mut results: Vec<CostumeResult>, top_n: usize) -> Vec<CostumeResult> {
    // `sort_by` is stable.
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_n);
    results
}
