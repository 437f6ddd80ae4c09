//! Compatibility checker: may a memory occupy a slot?
//!
//! The optimizer calls [`can_equip`] for every candidate it considers, so the
//! predicate only compares precomputed fields. [`check_equip`] evaluates the
//! same rules but reports every rule that failed, for the service boundary.

mod assignment;

use bitflags::bitflags;

pub use assignment::Assignment;

use crate::error::{CoreError, ErrorSeverity};
use crate::roster::{Costume, MemoryCatalog, MemoryId, Memory, Slot, SlotId};

bitflags! {
    /// Equip rules a memory failed for a slot.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EquipViolations: u8 {
        /// Slot role differs from the memory's role.
        const ROLE_MISMATCH  = 1 << 0;
        /// Slot requires a class the memory does not have.
        const CLASS_MISMATCH = 1 << 1;
        /// Memory comes from the costume owner's own character family.
        const SELF_EQUIP     = 1 << 2;
        /// Memory already sits in another slot of the costume.
        const DUPLICATE      = 1 << 3;
    }
}

impl EquipViolations {
    /// Short labels for each violated rule, in rule order.
    pub fn labels(self) -> Vec<&'static str> {
        self.iter()
            .map(|flag| match flag {
                Self::ROLE_MISMATCH => "role mismatch",
                Self::CLASS_MISMATCH => "class mismatch",
                Self::SELF_EQUIP => "self-equip",
                _ => "duplicate in costume",
            })
            .collect()
    }
}

/// Errors reported when a requested loadout breaks the equip rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("memory {memory} cannot be equipped in slot {slot}: {}", .violations.labels().join(", "))]
    Incompatible {
        slot: SlotId,
        memory: MemoryId,
        violations: EquipViolations,
    },

    #[error("slot {0} does not belong to the costume")]
    UnknownSlot(SlotId),

    #[error("memory {0} is not in the catalog")]
    UnknownMemory(MemoryId),
}

impl CoreError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Incompatible { .. } => "EQUIP_INCOMPATIBLE",
            Self::UnknownSlot(_) => "EQUIP_UNKNOWN_SLOT",
            Self::UnknownMemory(_) => "EQUIP_UNKNOWN_MEMORY",
        }
    }
}

/// Role, class, and self-equip rules; the parts that do not depend on the
/// rest of the loadout.
#[inline]
fn static_violations(slot: &Slot, memory: &Memory, costume: &Costume) -> EquipViolations {
    let mut violations = EquipViolations::empty();
    if slot.role != memory.role {
        violations |= EquipViolations::ROLE_MISMATCH;
    }
    if let Some(required) = slot.class
        && memory.class != Some(required)
    {
        violations |= EquipViolations::CLASS_MISMATCH;
    }
    if costume.owner_base_name() == memory.source_base_name() {
        violations |= EquipViolations::SELF_EQUIP;
    }
    violations
}

/// Every rule `memory` breaks for `slot` under `assignment`.
pub fn violations(
    slot: &Slot,
    memory: &Memory,
    costume: &Costume,
    assignment: &Assignment,
) -> EquipViolations {
    let mut violations = static_violations(slot, memory, costume);
    if assignment.holds_elsewhere(memory.id, slot.id) {
        violations |= EquipViolations::DUPLICATE;
    }
    violations
}

/// May `memory` occupy `slot` given the rest of `assignment`?
#[inline]
pub fn can_equip(slot: &Slot, memory: &Memory, costume: &Costume, assignment: &Assignment) -> bool {
    violations(slot, memory, costume, assignment).is_empty()
}

/// Could `slot` ever hold `memory`, ignoring the rest of the loadout?
///
/// Used to pre-filter costumes before any search runs.
#[inline]
pub fn can_slot_hold(slot: &Slot, memory: &Memory, costume: &Costume) -> bool {
    static_violations(slot, memory, costume).is_empty()
}

/// [`can_equip`] as a `Result` naming the violated rules.
pub fn check_equip(
    slot: &Slot,
    memory: &Memory,
    costume: &Costume,
    assignment: &Assignment,
) -> Result<(), EquipError> {
    let violations = violations(slot, memory, costume, assignment);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(EquipError::Incompatible {
            slot: slot.id,
            memory: memory.id,
            violations,
        })
    }
}

/// Validates a full requested configuration for a costume.
///
/// Every slot must belong to the costume, every memory must exist, and every
/// pair must pass the equip rules against the whole configuration. Entries
/// are checked in the order given; the first failure is returned.
pub fn validate_assignment(
    costume: &Costume,
    entries: &[(SlotId, MemoryId)],
    memories: &MemoryCatalog,
) -> Result<Assignment, EquipError> {
    for &(slot_id, _) in entries {
        if costume.slot(slot_id).is_none() {
            return Err(EquipError::UnknownSlot(slot_id));
        }
    }

    // Every slot is known, so at most one entry per costume slot survives.
    let assignment: Assignment = entries.iter().copied().collect();

    for (slot_id, memory_id) in assignment.iter() {
        let slot = costume
            .slot(slot_id)
            .ok_or(EquipError::UnknownSlot(slot_id))?;
        let memory = memories
            .get(memory_id)
            .ok_or(EquipError::UnknownMemory(memory_id))?;
        check_equip(slot, memory, costume, &assignment)?;
    }

    Ok(assignment)
}
