/// How target skills are turned into a scalar fitness value.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ScoringPolicy {
    /// Multiplicative skills score their distance from the neutral ratio,
    /// whichever side of 1.0 they fall on.
    #[default]
    Distance,

    /// Multiplicative skills score signed progress in their preferred
    /// direction; moving the wrong way scores negative.
    Directional,
}

/// Optimizer constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Number of ranked costumes returned by `optimize`.
    pub top_n: usize,

    /// Scale applied to a multiplicative ratio delta so that a 5% bonus lands
    /// in the same range as flat bonuses (0.05 × 1000 = 50).
    pub ratio_scale: f64,

    pub scoring: ScoringPolicy,
}

impl OptimizerConfig {
    // ===== compile-time constants =====
    /// Slot numbers 1..=10 are Normal, 11..=12 are Special.
    pub const MAX_SLOTS: usize = 12;
    pub const MAX_NORMAL_SLOT: u8 = 10;
    pub const SPECIAL_SLOT_1: u8 = 11;
    pub const SPECIAL_SLOT_2: u8 = 12;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TOP_N: usize = 5;
    pub const DEFAULT_RATIO_SCALE: f64 = 1000.0;

    pub fn new() -> Self {
        Self {
            top_n: Self::DEFAULT_TOP_N,
            ratio_scale: Self::DEFAULT_RATIO_SCALE,
            scoring: ScoringPolicy::default(),
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new()
    }
}
