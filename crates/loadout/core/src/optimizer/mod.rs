//! Build optimizer: best loadouts across a character's costumes.
//!
//! [`optimize`] pre-filters costumes by the special-skill pins, searches each
//! eligible costume with [`optimize_costume`], and ranks the results. Callers
//! that parallelize the per-costume search reuse [`eligible_costumes`],
//! [`optimize_costume`] and [`rank`] directly.

mod filter;
mod result;
mod search;

pub use filter::{FilterMode, SpecialPins, eligible_costumes};
pub use result::{CostumeResult, SlotSummary, rank};
pub use search::optimize_costume;

use tracing::debug;

use crate::config::OptimizerConfig;
use crate::error::{CoreError, ErrorSeverity};
use crate::roster::{Character, MemoryCatalog};
use crate::skills::SkillCatalog;

/// Errors returned by [`optimize`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptimizeError {
    #[error("invalid optimize request: {0}")]
    InvalidInput(&'static str),
}

impl CoreError for OptimizeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "OPTIMIZE_INVALID_INPUT",
        }
    }
}

/// Read-only collaborators of a search.
#[derive(Clone, Copy, Debug)]
pub struct OptimizerEnv<'a> {
    skills: &'a SkillCatalog,
    memories: &'a MemoryCatalog,
    config: &'a OptimizerConfig,
}

impl<'a> OptimizerEnv<'a> {
    pub fn new(
        skills: &'a SkillCatalog,
        memories: &'a MemoryCatalog,
        config: &'a OptimizerConfig,
    ) -> Self {
        Self {
            skills,
            memories,
            config,
        }
    }

    pub fn skills(&self) -> &'a SkillCatalog {
        self.skills
    }

    pub fn memories(&self) -> &'a MemoryCatalog {
        self.memories
    }

    pub fn config(&self) -> &'a OptimizerConfig {
        self.config
    }
}

/// Target skills plus optional special-skill pins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeRequest {
    pub targets: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pins: SpecialPins,
}

impl OptimizeRequest {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            pins: SpecialPins::default(),
        }
    }

    pub fn with_pins(mut self, pins: SpecialPins) -> Self {
        self.pins = pins;
        self
    }

    #[inline]
    pub fn mode(&self) -> FilterMode {
        FilterMode::from_pins(&self.pins)
    }

    /// Target names, trimmed, blanks dropped.
    pub fn target_names(&self) -> Vec<&str> {
        self.targets
            .iter()
            .map(|target| target.trim())
            .filter(|target| !target.is_empty())
            .collect()
    }

    /// Target names after rejecting an empty list.
    ///
    /// # Errors
    ///
    /// [`OptimizeError::InvalidInput`] when no non-blank target remains.
    pub fn validated_targets(&self) -> Result<Vec<&str>, OptimizeError> {
        let targets = self.target_names();
        if targets.is_empty() {
            return Err(OptimizeError::InvalidInput("target skills must not be empty"));
        }
        Ok(targets)
    }
}

/// Best loadouts for `character`, highest score first.
///
/// # Errors
///
/// [`OptimizeError::InvalidInput`] when the request has no target skills;
/// the check runs before any search.
pub fn optimize(
    character: &Character,
    request: &OptimizeRequest,
    env: OptimizerEnv<'_>,
) -> Result<Vec<CostumeResult>, OptimizeError> {
    let targets = request.validated_targets()?;
    let mode = request.mode();

    let costumes = eligible_costumes(&character.costumes, &request.pins, mode, env.memories());
    debug!(
        character = %character.id,
        %mode,
        eligible = costumes.len(),
        total = character.costumes.len(),
        "costumes filtered"
    );

    let results = costumes
        .into_iter()
        .filter_map(|costume| optimize_costume(costume, &targets, &request.pins, mode, env))
        .collect();

    Ok(rank(results, env.config().top_n))
}
