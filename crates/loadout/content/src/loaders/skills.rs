//! Skill table loader.
//!
//! ```toml
//! [[skill]]
//! name = "走り速度＋"
//! description = "走り速度が上がる"
//! levels = "level1:1.01,level2:1.02,level3:1.05,level4:1.06"
//!
//! [[skill]]
//! name = "最大HP＋"
//! levels = [3, 6, 10, 12]
//! kind = "additive"
//! ```
//!
//! `kind` is optional. Normal skills accept `additive`, `higher_is_better` or
//! `lower_is_better`; special skills accept `fixer` or `passive`. When it is
//! omitted the kind is inferred from the skill name.

use std::path::Path;

use loadout_core::{
    Direction, LevelTable, SkillDefinition, SkillKind, SpecialKind, SpecialSkillDefinition,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Level values as written in a skill file: a list starting at level 1, or
/// the encoded `"level1:..,level2:.."` form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LevelsSpec {
    List(Vec<f64>),
    Encoded(String),
}

impl LevelsSpec {
    fn to_table(&self, skill: &str) -> LoadResult<LevelTable> {
        let table = match self {
            Self::List(values) => LevelTable::try_from_values(values),
            Self::Encoded(encoded) => encoded.parse::<LevelTable>(),
        };
        table.map_err(|e| anyhow::anyhow!("Skill '{}': {}", skill, e))
    }
}

/// One skill entry of a skill file.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub levels: LevelsSpec,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SkillFile {
    #[serde(default)]
    skill: Vec<SkillSpec>,
}

#[derive(Debug, Deserialize)]
struct SpecialSkillFile {
    #[serde(default)]
    special: Vec<SkillSpec>,
}

fn parse_kind(skill: &str, kind: &str) -> LoadResult<SkillKind> {
    if kind.eq_ignore_ascii_case("additive") {
        return Ok(SkillKind::Additive);
    }
    kind.parse::<Direction>()
        .map(SkillKind::Multiplicative)
        .map_err(|_| anyhow::anyhow!("Skill '{}': unknown kind '{}'", skill, kind))
}

/// Loader for Normal and Special skill tables from TOML files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load Normal skills from a TOML file of `[[skill]]` entries.
    pub fn load_normal(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse_normal(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load skills from {}: {}", path.display(), e))
    }

    /// Load Special skills from a TOML file of `[[special]]` entries.
    pub fn load_special(path: &Path) -> LoadResult<Vec<SpecialSkillDefinition>> {
        let content = read_file(path)?;
        Self::parse_special(&content).map_err(|e| {
            anyhow::anyhow!("Failed to load special skills from {}: {}", path.display(), e)
        })
    }

    pub fn parse_normal(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let file: SkillFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill TOML: {}", e))?;

        file.skill
            .into_iter()
            .map(|spec| -> LoadResult<SkillDefinition> {
                let levels = spec.levels.to_table(&spec.name)?;
                let kind = spec
                    .kind
                    .as_deref()
                    .map(|kind| parse_kind(&spec.name, kind))
                    .transpose()?;
                let definition = SkillDefinition::new(spec.name, spec.description, levels);
                Ok(match kind {
                    Some(kind) => definition.with_kind(kind),
                    None => definition,
                })
            })
            .collect()
    }

    pub fn parse_special(content: &str) -> LoadResult<Vec<SpecialSkillDefinition>> {
        let file: SpecialSkillFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse special skill TOML: {}", e))?;

        file.special
            .into_iter()
            .map(|spec| -> LoadResult<SpecialSkillDefinition> {
                let levels = spec.levels.to_table(&spec.name)?;
                let kind = spec
                    .kind
                    .as_deref()
                    .map(|kind| {
                        kind.parse::<SpecialKind>().map_err(|_| {
                            anyhow::anyhow!("Special skill '{}': unknown kind '{}'", spec.name, kind)
                        })
                    })
                    .transpose()?;
                let definition = SpecialSkillDefinition::new(spec.name, spec.description, levels);
                Ok(match kind {
                    Some(kind) => definition.with_kind(kind),
                    None => definition,
                })
            })
            .collect()
    }
}
