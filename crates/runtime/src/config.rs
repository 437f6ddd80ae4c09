//! Runtime configuration for the optimizer service.
use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use loadout_core::{OptimizerConfig, ScoringPolicy};

/// Settings for [`crate::OptimizerService`].
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Optimizer parameters handed to every per-costume search.
    pub optimizer: OptimizerConfig,
    /// Maximum number of costume searches running at once.
    pub workers: usize,
    /// Abandon an `optimize` call after this long.
    pub optimize_timeout: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            optimizer: OptimizerConfig::default(),
            workers: default_workers(),
            optimize_timeout: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LOADOUT_WORKERS` - Concurrent costume searches (default: available parallelism)
    /// - `LOADOUT_TOP_N` - Number of ranked costumes returned (default: 5)
    /// - `LOADOUT_SCORING` - `distance` or `directional` (default: distance)
    /// - `LOADOUT_TIMEOUT_MS` - Timeout for one optimize call (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(workers) = read_env::<usize>("LOADOUT_WORKERS") {
            config.workers = workers.max(1);
        }

        if let Some(top_n) = read_env::<usize>("LOADOUT_TOP_N") {
            config.optimizer.top_n = top_n.max(1);
        }

        if let Some(scoring) = read_env::<ScoringPolicy>("LOADOUT_SCORING") {
            config.optimizer.scoring = scoring;
        }

        if let Some(millis) = read_env::<u64>("LOADOUT_TIMEOUT_MS").filter(|millis| *millis > 0) {
            config.optimize_timeout = Some(Duration::from_millis(millis));
        }

        config
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.optimize_timeout = Some(timeout);
        self
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RuntimeConfig::default();
        assert!(config.workers >= 1);
        assert_eq!(config.optimizer.top_n, OptimizerConfig::DEFAULT_TOP_N);
        assert_eq!(config.optimizer.scoring, ScoringPolicy::Distance);
        assert_eq!(config.optimize_timeout, None);
    }

    #[test]
    fn builders_clamp_workers() {
        let config = RuntimeConfig::default()
            .with_workers(0)
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.workers, 1);
        assert_eq!(config.optimize_timeout, Some(Duration::from_millis(250)));
    }
}
