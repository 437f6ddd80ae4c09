//! Characters and the attributes shared with slots and memories.

use std::fmt;

use super::{CharacterId, Costume};

/// Marker that opens a variant suffix in a character name, e.g. `緑谷出久（OFA）`.
pub const VARIANT_OPEN: char = '（';

/// Strips the variant suffix from a character name.
///
/// Everything from the first full-width open parenthesis onward is removed, so
/// `緑谷出久（オリジナル）` and `緑谷出久` share the base name `緑谷出久`.
pub fn base_name(name: &str) -> &str {
    match name.find(VARIANT_OPEN) {
        Some(index) => &name[..index],
        None => name,
    }
}

/// Combat role. Slots require one, memories provide one.
///
/// Roles are open-ended content data ("Strike", "Assault", ...), so they are
/// kept as text and compared exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Role(String);

impl Role {
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Character alignment, used as the optional class constraint of a slot.
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
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum CharacterClass {
    Hero,
    Villain,
}

/// Base combat stats. Informational only; the optimizer never reads them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u32,
    pub alpha_damage: u32,
    pub beta_damage: u32,
    pub gamma_damage: u32,
}

/// A playable character together with its costumes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub role: Role,
    pub class: CharacterClass,
    pub stats: BaseStats,
    pub costumes: Vec<Costume>,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        role: Role,
        class: CharacterClass,
        stats: BaseStats,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            class,
            stats,
            costumes: Vec::new(),
        }
    }

    /// Name without the variant suffix.
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }

    /// Attaches costumes (builder pattern).
    pub fn with_costumes(mut self, costumes: Vec<Costume>) -> Self {
        self.costumes = costumes;
        self
    }

    pub fn costume(&self, id: super::CostumeId) -> Option<&Costume> {
        self.costumes.iter().find(|costume| costume.id == id)
    }

    pub fn costume_mut(&mut self, id: super::CostumeId) -> Option<&mut Costume> {
        self.costumes.iter_mut().find(|costume| costume.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_variant_suffix() {
        assert_eq!(base_name("緑谷出久（オリジナル）"), "緑谷出久");
        assert_eq!(base_name("緑谷出久"), "緑谷出久");
        assert_eq!(base_name("（無名）"), "");
    }

    #[test]
    fn half_width_parenthesis_is_not_a_variant_marker() {
        assert_eq!(base_name("Deku (OFA)"), "Deku (OFA)");
    }

    #[test]
    fn class_parses_case_insensitively() {
        assert_eq!("HERO".parse::<CharacterClass>(), Ok(CharacterClass::Hero));
        assert_eq!("villain".parse::<CharacterClass>(), Ok(CharacterClass::Villain));
        assert_eq!(CharacterClass::Hero.to_string(), "HERO");
    }
}
