//! Optimizer service: the async face of loadout-core.
//!
//! Per-costume searches are CPU-bound, so each runs on a blocking worker.
//! A semaphore sized by [`RuntimeConfig::workers`] caps how many run at once,
//! and results are merged back in costume order before ranking so the output
//! matches the sequential optimizer exactly.
use std::sync::Arc;

use loadout_core::{
    Assignment, Character, CharacterId, Costume, CostumeId, CostumeResult, EffectLevel,
    EquipError, FilterMode, LevelError, MemoryCatalog, MemoryId, OptimizeRequest,
    OptimizerConfig, OptimizerEnv, SkillCatalog, Slot, SlotId, SpecialPins, aggregate_with, check_equip,
    eligible_costumes, equipped_assignment, optimize_costume, rank, validate_assignment,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::LoadoutRepository;

/// One line of a costume's effect report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectLine {
    pub name: String,
    pub description: String,
    /// Display form, e.g. `+5.00%` or `+20`.
    pub value: String,
}

/// Effects of the memories currently equipped on one costume, at the levels
/// the player has reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectReport {
    pub costume_id: CostumeId,
    pub costume_name: String,
    pub character_name: String,
    pub effects: Vec<EffectLine>,
    pub special_skills: Vec<String>,
}

/// Runs optimizations and loadout edits against a repository.
pub struct OptimizerService<R> {
    repository: Arc<R>,
    skills: Arc<SkillCatalog>,
    optimizer: Arc<OptimizerConfig>,
    config: RuntimeConfig,
    permits: Arc<Semaphore>,
}

impl<R> OptimizerService<R>
where
    R: LoadoutRepository + 'static,
{
    pub fn new(repository: Arc<R>, skills: Arc<SkillCatalog>, config: RuntimeConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.workers.max(1)));
        Self {
            repository,
            skills,
            optimizer: Arc::new(config.optimizer.clone()),
            config,
            permits,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Best loadouts for a character's costumes, ranked by score.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::Optimize`] when the request has no target skills
    /// - [`RuntimeError::CharacterNotFound`] for an unknown character
    /// - [`RuntimeError::Timeout`] when the configured timeout elapses
    pub async fn optimize(
        &self,
        character: CharacterId,
        request: &OptimizeRequest,
    ) -> Result<Vec<CostumeResult>> {
        let targets: Vec<String> = request
            .validated_targets()?
            .into_iter()
            .map(str::to_owned)
            .collect();
        let character = self
            .repository
            .character(character)
            .await?
            .ok_or(RuntimeError::CharacterNotFound(character))?;
        let memories = self.repository.memories().await?;

        self.warn_unknown_names(&targets, &request.pins);
        info!(
            character = %character.name,
            targets = ?targets,
            mode = %request.mode(),
            costumes = character.costumes.len(),
            "optimize started"
        );

        let search = self.search(&character, targets, request.pins.clone(), memories);
        let results = match self.config.optimize_timeout {
            Some(limit) => tokio::time::timeout(limit, search)
                .await
                .map_err(|_| RuntimeError::Timeout(limit))??,
            None => search.await?,
        };

        info!(
            character = %character.name,
            results = results.len(),
            best = results.first().map(|result| result.score),
            "optimize finished"
        );
        Ok(results)
    }

    async fn search(
        &self,
        character: &Character,
        targets: Vec<String>,
        pins: SpecialPins,
        memories: Arc<MemoryCatalog>,
    ) -> Result<Vec<CostumeResult>> {
        let mode = FilterMode::from_pins(&pins);
        let eligible: Vec<Costume> = eligible_costumes(&character.costumes, &pins, mode, &memories)
            .into_iter()
            .cloned()
            .collect();
        debug!(
            %mode,
            eligible = eligible.len(),
            total = character.costumes.len(),
            "costumes filtered"
        );

        let targets = Arc::new(targets);
        let pins = Arc::new(pins);
        let mut jobs = JoinSet::new();

        for (index, costume) in eligible.into_iter().enumerate() {
            let permit = Arc::clone(&self.permits)
                .acquire_owned()
                .await
                .map_err(|_| RuntimeError::WorkerPoolClosed)?;
            let skills = Arc::clone(&self.skills);
            let memories = Arc::clone(&memories);
            let config = Arc::clone(&self.optimizer);
            let targets = Arc::clone(&targets);
            let pins = Arc::clone(&pins);

            jobs.spawn_blocking(move || {
                let _permit = permit;
                let env = OptimizerEnv::new(&skills, &memories, &config);
                (index, optimize_costume(&costume, targets.as_slice(), &pins, mode, env))
            });
        }

        let mut found = Vec::new();
        while let Some(joined) = jobs.join_next().await {
            let (index, result) = joined.map_err(RuntimeError::WorkerJoin)?;
            if let Some(result) = result {
                found.push((index, result));
            }
        }

        // Completion order is arbitrary; ranking must see costume order.
        found.sort_by_key(|(index, _)| *index);
        let results = found.into_iter().map(|(_, result)| result).collect();
        Ok(rank(results, self.optimizer.top_n))
    }

    fn warn_unknown_names(&self, targets: &[String], pins: &SpecialPins) {
        let unknown: Vec<&str> = targets
            .iter()
            .map(String::as_str)
            .filter(|name| !self.skills.contains(name))
            .collect();
        if !unknown.is_empty() {
            warn!(skills = ?unknown, "target skills not in any catalog are ignored");
        }

        let unknown_pins: Vec<&str> = pins
            .iter()
            .filter(|name| self.skills.special(name).is_none())
            .collect();
        if !unknown_pins.is_empty() {
            warn!(pins = ?unknown_pins, "pinned skills are not special skills");
        }
    }

    /// Effect report for the memories equipped on a costume.
    pub async fn costume_effects(&self, costume: CostumeId) -> Result<EffectReport> {
        let (owner, costume) = self.find_costume(costume).await?;
        let memories = self.repository.memories().await?;

        let assignment = equipped_assignment(&costume);
        let effects = aggregate_with(
            &costume,
            &assignment,
            &memories,
            &self.skills,
            EffectLevel::Current,
        );

        Ok(EffectReport {
            costume_id: costume.id,
            costume_name: costume.name.clone(),
            character_name: owner.name,
            effects: effects
                .iter()
                .map(|effect| EffectLine {
                    name: effect.name.clone(),
                    description: effect.description.clone(),
                    value: effect.formatted(),
                })
                .collect(),
            special_skills: effects.special_skills().to_vec(),
        })
    }

    /// Validates a full configuration and persists it as the costume's loadout.
    ///
    /// Slots missing from `entries` end up empty.
    pub async fn apply_configuration(
        &self,
        costume: CostumeId,
        entries: &[(SlotId, MemoryId)],
    ) -> Result<Assignment> {
        let (_, stored) = self.find_costume(costume).await?;
        let memories = self.repository.memories().await?;

        let assignment = validate_assignment(&stored, entries, &memories)?;
        self.repository.save_assignment(costume, &assignment).await?;

        info!(%costume, slots = assignment.len(), "configuration applied");
        Ok(assignment)
    }

    /// Equips one memory into one slot, keeping the rest of the loadout.
    pub async fn equip(
        &self,
        costume: CostumeId,
        slot: SlotId,
        memory: MemoryId,
    ) -> Result<Assignment> {
        let (_, stored) = self.find_costume(costume).await?;
        let memories = self.repository.memories().await?;

        let target = stored.slot(slot).ok_or(EquipError::UnknownSlot(slot))?;
        let item = memories.get(memory).ok_or(EquipError::UnknownMemory(memory))?;
        let current = equipped_assignment(&stored);
        check_equip(target, item, &stored, &current)?;

        let assignment = current.with(slot, memory);
        self.repository.save_assignment(costume, &assignment).await?;

        info!(%costume, %slot, %memory, "memory equipped");
        Ok(assignment)
    }

    /// Empties one slot, keeping the rest of the loadout.
    pub async fn unequip(&self, costume: CostumeId, slot: SlotId) -> Result<Assignment> {
        let (_, stored) = self.find_costume(costume).await?;
        stored.slot(slot).ok_or(EquipError::UnknownSlot(slot))?;

        let assignment = equipped_assignment(&stored).without(slot);
        self.repository.save_assignment(costume, &assignment).await?;

        info!(%costume, %slot, "memory unequipped");
        Ok(assignment)
    }

    /// Empties every slot of a costume.
    pub async fn unequip_all(&self, costume: CostumeId) -> Result<()> {
        self.find_costume(costume).await?;
        self.repository
            .save_assignment(costume, &Assignment::new())
            .await?;

        info!(%costume, "all memories unequipped");
        Ok(())
    }

    /// Raises a slot's reached level by one; fails at its max level.
    pub async fn level_up(&self, costume: CostumeId, slot: SlotId) -> Result<u8> {
        self.change_level(costume, slot, Slot::level_up).await
    }

    /// Lowers a slot's reached level by one; fails at level 1.
    pub async fn level_down(&self, costume: CostumeId, slot: SlotId) -> Result<u8> {
        self.change_level(costume, slot, Slot::level_down).await
    }

    /// Sets a slot's reached level, which must lie in `1..=max_level`.
    pub async fn set_level(&self, costume: CostumeId, slot: SlotId, level: u8) -> Result<u8> {
        self.change_level(costume, slot, |target| target.set_level(level))
            .await
    }

    async fn change_level(
        &self,
        costume: CostumeId,
        slot: SlotId,
        change: impl FnOnce(&mut Slot) -> std::result::Result<u8, LevelError> + Send,
    ) -> Result<u8> {
        let (_, stored) = self.find_costume(costume).await?;
        let mut target = stored
            .slot(slot)
            .cloned()
            .ok_or(EquipError::UnknownSlot(slot))?;

        let level = change(&mut target)?;
        self.repository.save_level(costume, slot, level).await?;

        info!(%costume, %slot, level, "slot level changed");
        Ok(level)
    }

    /// Distinct special skills carried by any memory, sorted.
    pub async fn special_skills(&self) -> Result<Vec<String>> {
        let memories = self.repository.memories().await?;
        Ok(memories
            .special_skill_names()
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    /// Every character sharing the base name of `character`, itself included.
    pub async fn variants(&self, character: CharacterId) -> Result<Vec<Character>> {
        let characters = self.repository.characters().await?;
        let base = characters
            .iter()
            .find(|candidate| candidate.id == character)
            .map(|found| found.base_name().to_owned())
            .ok_or(RuntimeError::CharacterNotFound(character))?;

        Ok(characters
            .into_iter()
            .filter(|candidate| candidate.base_name() == base)
            .collect())
    }

    async fn find_costume(&self, costume: CostumeId) -> Result<(Character, Costume)> {
        self.repository
            .costume(costume)
            .await?
            .ok_or(RuntimeError::CostumeNotFound(costume))
    }
}
