//! Skill catalog: per-level effects and metadata for Normal and Special skills.
//!
//! The catalog is an immutable value built once at startup and handed to every
//! component by reference. Normal and Special names are disjoint.

mod kind;
mod level;

use std::collections::HashMap;

pub use kind::{Direction, FIXER_NAMES, MULTIPLICATIVE_SKILLS, SkillKind, SpecialKind};
pub use level::LevelTable;

use crate::error::{CoreError, ErrorSeverity};

/// Errors raised while building a skill catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("skill '{0}' is defined as both a normal and a special skill")]
    OverlappingSkill(String),

    #[error("skill '{0}' is defined twice")]
    DuplicateSkill(String),

    #[error("skill '{0}' has no level values")]
    EmptyLevels(String),

    #[error("invalid level entry '{0}', expected 'levelN:value'")]
    InvalidLevelEncoding(String),

    #[error("{0} level values given, at most 255 are supported")]
    TooManyLevels(usize),
}

impl CoreError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            OverlappingSkill(_) => "CATALOG_OVERLAPPING_SKILL",
            DuplicateSkill(_) => "CATALOG_DUPLICATE_SKILL",
            EmptyLevels(_) => "CATALOG_EMPTY_LEVELS",
            InvalidLevelEncoding(_) => "CATALOG_INVALID_LEVEL_ENCODING",
            TooManyLevels(_) => "CATALOG_TOO_MANY_LEVELS",
        }
    }
}

/// A tuning skill applied from Normal slots.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub name: String,
    pub description: String,
    pub kind: SkillKind,
    pub levels: LevelTable,
}

impl SkillDefinition {
    /// Creates a definition whose kind is inferred from the name.
    pub fn new(name: impl Into<String>, description: impl Into<String>, levels: LevelTable) -> Self {
        let name = name.into();
        Self {
            kind: SkillKind::infer(&name),
            name,
            description: description.into(),
            levels,
        }
    }

    /// Overrides the inferred kind (builder pattern).
    pub fn with_kind(mut self, kind: SkillKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A special tuning skill applied from Special slots.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialSkillDefinition {
    pub name: String,
    pub description: String,
    pub kind: SpecialKind,
    pub levels: LevelTable,
}

impl SpecialSkillDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, levels: LevelTable) -> Self {
        let name = name.into();
        Self {
            kind: SpecialKind::infer(&name),
            name,
            description: description.into(),
            levels,
        }
    }

    pub fn with_kind(mut self, kind: SpecialKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn is_fixer(&self) -> bool {
        self.kind == SpecialKind::Fixer
    }
}

/// Both skill tables, keyed by skill name.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog {
    normal: HashMap<String, SkillDefinition>,
    special: HashMap<String, SpecialSkillDefinition>,
}

impl SkillCatalog {
    /// Builds the catalog.
    ///
    /// # Errors
    ///
    /// Fails when a name repeats within a table, appears in both tables, or
    /// has an empty level table.
    pub fn new(
        normal: impl IntoIterator<Item = SkillDefinition>,
        special: impl IntoIterator<Item = SpecialSkillDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut normal_table = HashMap::new();
        for skill in normal {
            if skill.levels.is_empty() {
                return Err(CatalogError::EmptyLevels(skill.name));
            }
            if normal_table.contains_key(&skill.name) {
                return Err(CatalogError::DuplicateSkill(skill.name));
            }
            normal_table.insert(skill.name.clone(), skill);
        }

        let mut special_table = HashMap::new();
        for skill in special {
            if skill.levels.is_empty() {
                return Err(CatalogError::EmptyLevels(skill.name));
            }
            if normal_table.contains_key(&skill.name) {
                return Err(CatalogError::OverlappingSkill(skill.name));
            }
            if special_table.contains_key(&skill.name) {
                return Err(CatalogError::DuplicateSkill(skill.name));
            }
            special_table.insert(skill.name.clone(), skill);
        }

        Ok(Self {
            normal: normal_table,
            special: special_table,
        })
    }

    pub fn normal(&self, name: &str) -> Option<&SkillDefinition> {
        self.normal.get(name)
    }

    pub fn special(&self, name: &str) -> Option<&SpecialSkillDefinition> {
        self.special.get(name)
    }

    /// True for Normal skills that stack multiplicatively.
    pub fn is_multiplicative(&self, name: &str) -> bool {
        self.normal(name)
            .is_some_and(|skill| skill.kind.is_multiplicative())
    }

    pub fn is_fixer(&self, name: &str) -> bool {
        self.special(name).is_some_and(SpecialSkillDefinition::is_fixer)
    }

    /// True when the name is known to either table.
    pub fn contains(&self, name: &str) -> bool {
        self.normal.contains_key(name) || self.special.contains_key(name)
    }

    pub fn normal_len(&self) -> usize {
        self.normal.len()
    }

    pub fn special_len(&self) -> usize {
        self.special.len()
    }
}
