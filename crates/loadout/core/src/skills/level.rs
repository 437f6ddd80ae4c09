//! Level → effect tables.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::CatalogError;

/// Effect value per level.
///
/// Levels start at 1. Two textual forms are accepted:
/// - a list where index 0 is level 1
/// - the encoded form `"level1:1.01,level2:1.02,..."`
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelTable {
    values: BTreeMap<u8, f64>,
}

impl LevelTable {
    /// Builds a table from values for levels 1, 2, 3, ...
    ///
    /// Values past level 255 are dropped; use [`LevelTable::try_from_values`]
    /// to reject them instead.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: (1..=u8::MAX).zip(values).collect(),
        }
    }

    /// Like [`LevelTable::from_values`], but more than 255 values is an error.
    pub fn try_from_values(values: &[f64]) -> Result<Self, CatalogError> {
        if values.len() > usize::from(u8::MAX) {
            return Err(CatalogError::TooManyLevels(values.len()));
        }
        Ok(Self::from_values(values.iter().copied()))
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, f64)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Effect at `level`, if the table defines it.
    #[inline]
    pub fn at(&self, level: u8) -> Option<f64> {
        self.values.get(&level).copied()
    }

    pub fn max_level(&self) -> Option<u8> {
        self.values.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.values.iter().map(|(&level, &value)| (level, value))
    }
}

impl FromStr for LevelTable {
    type Err = CatalogError;

    /// Parses `"level1:1,level2:2"`. The `level` prefix is optional.
    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let mut values = BTreeMap::new();
        for pair in encoded.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
            let invalid = || CatalogError::InvalidLevelEncoding(pair.to_owned());

            let (level, value) = pair.split_once(':').ok_or_else(invalid)?;
            let level = level
                .trim()
                .trim_start_matches("level")
                .parse::<u8>()
                .map_err(|_| invalid())?;
            let value = value.trim().parse::<f64>().map_err(|_| invalid())?;

            values.insert(level, value);
        }
        Ok(Self { values })
    }
}
