//! Fitness of an aggregated loadout against a list of target skills.

use crate::config::{OptimizerConfig, ScoringPolicy};
use crate::effects::AggregatedEffects;
use crate::skills::{Direction, SkillCatalog, SkillKind};

/// Sums the contribution of every target skill present in `effects`.
///
/// Flat bonuses contribute their raw value. Ratios contribute their deviation
/// from 1.0 scaled by [`OptimizerConfig::ratio_scale`], interpreted according
/// to the configured [`ScoringPolicy`]. Targets missing from `effects`
/// contribute nothing.
pub fn score<S: AsRef<str>>(
    effects: &AggregatedEffects,
    targets: &[S],
    catalog: &SkillCatalog,
    config: &OptimizerConfig,
) -> f64 {
    targets
        .iter()
        .filter_map(|target| {
            let name = target.as_ref();
            let effect = effects.get(name)?;
            // The catalog is authoritative; fall back to the kind captured at
            // aggregation for skills it no longer knows.
            let kind = catalog.normal(name).map_or(effect.kind, |skill| skill.kind);
            Some(contribution(kind, effect.value, config))
        })
        .sum()
}

#[inline]
fn contribution(kind: SkillKind, value: f64, config: &OptimizerConfig) -> f64 {
    let scale = config.ratio_scale;
    match (kind, config.scoring) {
        (SkillKind::Additive, _) => value,
        (SkillKind::Multiplicative(_), ScoringPolicy::Distance) => (1.0 - value).abs() * scale,
        (SkillKind::Multiplicative(Direction::HigherIsBetter), ScoringPolicy::Directional) => {
            (value - 1.0) * scale
        }
        (SkillKind::Multiplicative(Direction::LowerIsBetter), ScoringPolicy::Directional) => {
            (1.0 - value) * scale
        }
    }
}
