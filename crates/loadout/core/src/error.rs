//! Common error infrastructure for loadout-core.
//!
//! This module provides shared types and traits used across all error types in loadout-core.
//! Domain-specific errors (e.g., `EquipError`, `OptimizeError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each layer has its own error type with specific variants
//! - **Rich Context**: Errors carry the slot, memory, or skill they refer to
//! - **Severity Classification**: Errors are categorized for the boundary layer

/// Severity level of an error, used for categorization at the service boundary.
///
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Inconsistent reference data that requires investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: empty target skill list, incompatible equip request
    Validation,

    /// Internal error - reference data inconsistency.
    ///
    /// Examples: duplicated slot numbers, a skill listed in both catalogs
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates broken reference data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all loadout-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who has to fix it (caller vs. data owner)
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
