//! Per-skill metadata resolved once when a catalog is loaded.

/// Skills whose effect is a ratio around 1.0 and which stack by multiplication.
///
/// Catalog files may state a kind explicitly; this list is the fallback.
pub const MULTIPLICATIVE_SKILLS: [&str; 20] = [
    "対HP攻撃力＋",
    "対GP攻撃力＋",
    "\"個性\"技α攻撃力＋",
    "\"個性\"技β攻撃力＋",
    "\"個性\"技γ攻撃力＋",
    "格闘攻撃力＋",
    "HP防御力＋",
    "対\"個性\"技α防御力＋",
    "対\"個性\"技β防御力＋",
    "対\"個性\"技γ防御力＋",
    "対格闘攻撃防御力＋",
    "走り速度＋",
    "ダッシュ速度＋",
    "壁移動速度＋",
    "瀕死移動速度＋",
    "\"個性\"技αリロード＋",
    "\"個性\"技βリロード＋",
    "\"個性\"技γリロード＋",
    "特殊アクションリロード＋",
    "PU/PCリロード＋",
];

/// Name fragments marking ratios where a smaller value is the stronger bonus
/// (damage taken, reload time).
const LOWER_IS_BETTER_MARKERS: [&str; 2] = ["防御力", "リロード"];

/// Special skill names that act as a Fixer.
pub const FIXER_NAMES: [&str; 2] = ["フィクサー", "Fixer"];

/// Which side of 1.0 a multiplicative skill improves towards.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// How a Normal-slot skill's values combine across slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Flat bonus (HP, GP, ...): values add.
    Additive,
    /// Ratio around 1.0: values multiply.
    Multiplicative(Direction),
}

impl SkillKind {
    /// Resolves the kind of a skill from its name.
    pub fn infer(name: &str) -> Self {
        if !MULTIPLICATIVE_SKILLS.contains(&name) {
            return Self::Additive;
        }
        if LOWER_IS_BETTER_MARKERS
            .iter()
            .any(|marker| name.contains(marker))
        {
            Self::Multiplicative(Direction::LowerIsBetter)
        } else {
            Self::Multiplicative(Direction::HigherIsBetter)
        }
    }

    #[inline]
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, Self::Multiplicative(_))
    }

    /// Applies a Fixer multiplier to one slot's value.
    ///
    /// Ratios scale their deviation from 1.0; flat bonuses scale directly.
    #[inline]
    pub fn amplify(self, value: f64, multiplier: f64) -> f64 {
        match self {
            Self::Additive => value * multiplier,
            Self::Multiplicative(_) => 1.0 + (value - 1.0) * multiplier,
        }
    }

    /// Folds one slot's value into the costume total.
    #[inline]
    pub fn fold(self, total: f64, value: f64) -> f64 {
        match self {
            Self::Additive => total + value,
            Self::Multiplicative(_) => total * value,
        }
    }
}

/// Role of a special skill in effect aggregation.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpecialKind {
    /// Multiplies the Normal-slot effects of its slot group.
    Fixer,
    /// Listed in the loadout summary only.
    Passive,
}

impl SpecialKind {
    pub fn infer(name: &str) -> Self {
        if FIXER_NAMES.contains(&name) {
            Self::Fixer
        } else {
            Self::Passive
        }
    }
}
