//! Effect aggregation: the compounded bonuses of one costume loadout.
//!
//! Aggregation runs in two passes. Special slots go first and record the
//! Fixer multiplier for the Normal slots they feed; Normal slots then apply
//! that multiplier to each skill value before folding it into the costume
//! total. The first pass always completes before the second starts.

mod format;

pub use format::{format_heuristic, format_value};

use crate::config::OptimizerConfig;
use crate::equip::Assignment;
use crate::roster::{Costume, MemoryCatalog, Slot};
use crate::skills::{SkillCatalog, SkillKind, SpecialKind};

/// Which slot level the aggregator reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectLevel {
    /// Every slot at its max level. The optimizer always uses this.
    #[default]
    Max,
    /// Normal slots at the level the player has reached. A Fixer still reads
    /// its Special slot's max level, and is listed among the special skills.
    Current,
}

impl EffectLevel {
    #[inline]
    fn of(self, slot: &Slot) -> u8 {
        match self {
            Self::Max => slot.max_level,
            Self::Current => slot.current_level,
        }
    }
}

/// Combined value of one skill across the costume.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffect {
    pub name: String,
    pub description: String,
    pub kind: SkillKind,
    pub value: f64,
}

impl SkillEffect {
    /// Display form of the value, e.g. `+5.00%` or `+20`.
    pub fn formatted(&self) -> String {
        format_value(self.kind, self.value)
    }
}

/// Skill totals in first-occurrence order plus the non-Fixer special skills.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedEffects {
    effects: Vec<SkillEffect>,
    special_skills: Vec<String>,
}

impl AggregatedEffects {
    pub fn get(&self, name: &str) -> Option<&SkillEffect> {
        self.effects.iter().find(|effect| effect.name == name)
    }

    #[inline]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).map(|effect| effect.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkillEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Special skills of non-Fixer memories in Special slots, in slot order.
    pub fn special_skills(&self) -> &[String] {
        &self.special_skills
    }

    fn fold(&mut self, name: &str, description: &str, kind: SkillKind, value: f64) {
        match self.effects.iter_mut().find(|effect| effect.name == name) {
            Some(effect) => effect.value = kind.fold(effect.value, value),
            None => self.effects.push(SkillEffect {
                name: name.to_owned(),
                description: description.to_owned(),
                kind,
                value,
            }),
        }
    }
}

/// Effects of `assignment` with every slot at its max level.
pub fn aggregate(
    costume: &Costume,
    assignment: &Assignment,
    memories: &MemoryCatalog,
    catalog: &SkillCatalog,
) -> AggregatedEffects {
    aggregate_with(costume, assignment, memories, catalog, EffectLevel::Max)
}

/// Effects of `assignment` at the requested slot level.
///
/// Memories missing from the catalog and skill names missing from the skill
/// catalog are skipped. So are levels a skill's table does not define.
pub fn aggregate_with(
    costume: &Costume,
    assignment: &Assignment,
    memories: &MemoryCatalog,
    catalog: &SkillCatalog,
    level: EffectLevel,
) -> AggregatedEffects {
    let mut effects = AggregatedEffects::default();

    // Indexed by Normal slot number; index 0 is unused.
    let mut multipliers = [None::<f64>; OptimizerConfig::MAX_NORMAL_SLOT as usize + 1];

    for slot in costume.special_slots() {
        let Some(memory) = assignment.get(slot.id).and_then(|id| memories.get(id)) else {
            continue;
        };
        let Some(name) = memory.special_skill() else {
            continue;
        };

        match catalog.special(name) {
            Some(special) if special.kind == SpecialKind::Fixer => {
                if level == EffectLevel::Current {
                    effects.special_skills.push(name.to_owned());
                }
                let (Some(multiplier), Some(fed)) =
                    (special.levels.at(slot.max_level), slot.fed_normal_slots())
                else {
                    continue;
                };
                for number in fed {
                    multipliers[usize::from(number)] = Some(multiplier);
                }
            }
            _ => effects.special_skills.push(name.to_owned()),
        }
    }

    for slot in costume.normal_slots() {
        let Some(memory) = assignment.get(slot.id).and_then(|id| memories.get(id)) else {
            continue;
        };
        let slot_level = level.of(slot);
        let multiplier = multipliers
            .get(usize::from(slot.number))
            .copied()
            .flatten();

        for name in memory.tuning_skills() {
            let Some(skill) = catalog.normal(name) else {
                continue;
            };
            let Some(mut value) = skill.levels.at(slot_level) else {
                continue;
            };
            if let Some(multiplier) = multiplier {
                value = skill.kind.amplify(value, multiplier);
            }
            effects.fold(name, &skill.description, skill.kind, value);
        }
    }

    effects
}

/// Assignment of the memories currently equipped on `costume`.
pub fn equipped_assignment(costume: &Costume) -> Assignment {
    Assignment::equipped(costume)
}
