//! Greedy per-costume search.
//!
//! Special slots are settled first (pins, then Fixer, then any legal memory)
//! because the Fixer changes what every Normal slot is worth. Normal slots
//! are then seeded with the first legal memory and improved one at a time in
//! slot order. Each slot is visited once; there is no backtracking.

use tracing::debug;

use super::{CostumeResult, FilterMode, OptimizerEnv, SpecialPins};
use crate::config::{OptimizerConfig, ScoringPolicy};
use crate::effects::aggregate;
use crate::equip::{Assignment, can_equip};
use crate::roster::{Costume, Memory, MemoryId, Slot};
use crate::scoring::score;

/// First candidate that may occupy `slot` under `assignment`.
fn first_legal<'m>(
    slot: &Slot,
    costume: &Costume,
    assignment: &Assignment,
    mut candidates: impl Iterator<Item = &'m Memory>,
) -> Option<&'m Memory> {
    candidates.find(|memory| can_equip(slot, memory, costume, assignment))
}

/// Step A: place pinned special skills.
///
/// Each pin resolves to the first memory in the catalog carrying the skill;
/// only that memory is tried, never a later carrier.
fn place_pins(
    costume: &Costume,
    pins: &SpecialPins,
    mode: FilterMode,
    env: OptimizerEnv<'_>,
    mut assignment: Assignment,
) -> Assignment {
    if mode == FilterMode::Either {
        let Some(skill) = pins.either() else {
            return assignment;
        };
        let Some(carrier) = env.memories().carriers_of(skill).next() else {
            debug!(costume = %costume.id, skill, "pinned skill has no carrier");
            return assignment;
        };
        let placed = [OptimizerConfig::SPECIAL_SLOT_1, OptimizerConfig::SPECIAL_SLOT_2]
            .into_iter()
            .filter_map(|number| costume.slot_by_number(number))
            .find(|slot| can_equip(slot, carrier, costume, &assignment));
        match placed {
            Some(slot) => {
                debug!(costume = %costume.id, slot = slot.number, memory = %carrier.id, skill, "pinned special skill");
                assignment = assignment.with(slot.id, carrier.id);
            }
            None => debug!(costume = %costume.id, skill, "no special slot accepts pinned skill"),
        }
        return assignment;
    }

    for slot in costume.special_slots() {
        let Some(skill) = pins.for_slot(slot.number) else {
            continue;
        };
        match env.memories().carriers_of(skill).next() {
            Some(carrier) if can_equip(slot, carrier, costume, &assignment) => {
                debug!(costume = %costume.id, slot = slot.number, memory = %carrier.id, skill, "pinned special skill");
                assignment = assignment.with(slot.id, carrier.id);
            }
            _ => debug!(costume = %costume.id, slot = slot.number, skill, "pinned skill has no legal carrier"),
        }
    }
    assignment
}

/// Step B: the catalog's first Fixer for each open Special slot that is not
/// reserved by a pin. A second Fixer is never considered.
fn place_fixers(
    costume: &Costume,
    pins: &SpecialPins,
    mode: FilterMode,
    env: OptimizerEnv<'_>,
    mut assignment: Assignment,
) -> Assignment {
    let Some(fixer) = env.memories().iter().find(|memory| {
        memory
            .special_skill()
            .is_some_and(|skill| env.skills().is_fixer(skill))
    }) else {
        return assignment;
    };

    for slot in costume.special_slots() {
        if assignment.is_assigned(slot.id) {
            continue;
        }
        if mode != FilterMode::Either && pins.for_slot(slot.number).is_some() {
            continue;
        }
        if can_equip(slot, fixer, costume, &assignment) {
            debug!(costume = %costume.id, slot = slot.number, memory = %fixer.id, "equipped fixer");
            assignment = assignment.with(slot.id, fixer.id);
        }
    }
    assignment
}

/// Steps C and D: the first legal memory for every still-empty slot of one kind.
fn seed<'s>(
    costume: &Costume,
    slots: impl Iterator<Item = &'s Slot>,
    env: OptimizerEnv<'_>,
    mut assignment: Assignment,
) -> Assignment {
    for slot in slots {
        if assignment.is_assigned(slot.id) {
            continue;
        }
        if let Some(memory) = first_legal(slot, costume, &assignment, env.memories().iter()) {
            assignment = assignment.with(slot.id, memory.id);
        }
    }
    assignment
}

/// Step E: one improving pass over the Normal slots.
///
/// Under [`ScoringPolicy::Distance`] a candidate must score above zero to
/// win. Directional scores may be negative, so there the best candidate
/// always wins, even when it only scores less badly than the seed.
fn improve<S: AsRef<str>>(
    costume: &Costume,
    targets: &[S],
    env: OptimizerEnv<'_>,
    mut assignment: Assignment,
) -> Assignment {
    let floor = match env.config().scoring {
        ScoringPolicy::Distance => 0.0,
        ScoringPolicy::Directional => f64::NEG_INFINITY,
    };
    for slot in costume.normal_slots() {
        let current = assignment.get(slot.id);
        let candidates = env
            .memories()
            .iter()
            .filter(|memory| Some(memory.id) != current)
            .filter(|memory| can_equip(slot, memory, costume, &assignment))
            .chain(current.and_then(|id| env.memories().get(id)));

        let mut best: Option<(MemoryId, f64)> = None;
        for memory in candidates {
            let trial = assignment.with(slot.id, memory.id);
            let effects = aggregate(costume, &trial, env.memories(), env.skills());
            let trial_score = score(&effects, targets, env.skills(), env.config());
            if trial_score > best.map_or(floor, |(_, best_score)| best_score) {
                best = Some((memory.id, trial_score));
            }
        }

        if let Some((memory, best_score)) = best {
            if Some(memory) != current {
                debug!(costume = %costume.id, slot = slot.number, %memory, score = best_score, "slot improved");
            }
            assignment = assignment.with(slot.id, memory);
        }
    }
    assignment
}

/// Searches the best legal loadout for one costume.
///
/// Returns `None` only for a costume without slots. `mode` should be
/// [`FilterMode::from_pins`] of `pins`; in [`FilterMode::Either`] only the
/// `either` pin is placed.
pub fn optimize_costume<S: AsRef<str>>(
    costume: &Costume,
    targets: &[S],
    pins: &SpecialPins,
    mode: FilterMode,
    env: OptimizerEnv<'_>,
) -> Option<CostumeResult> {
    if costume.slots().is_empty() {
        return None;
    }

    let assignment = place_pins(costume, pins, mode, env, Assignment::new());
    let assignment = place_fixers(costume, pins, mode, env, assignment);
    let assignment = seed(costume, costume.special_slots(), env, assignment);
    let assignment = seed(costume, costume.normal_slots(), env, assignment);
    let assignment = improve(costume, targets, env, assignment);

    let effects = aggregate(costume, &assignment, env.memories(), env.skills());
    let total = score(&effects, targets, env.skills(), env.config());
    debug!(costume = %costume.id, score = total, slots = assignment.len(), "costume optimized");

    Some(CostumeResult::new(costume, assignment, env.memories(), total, effects))
}
