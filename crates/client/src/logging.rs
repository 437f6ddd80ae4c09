//! Logging setup: stderr plus a daily rolling file.
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "loadout.log";

/// Platform-specific log directory for the client.
///
/// - macOS: `~/Library/Caches/loadout/logs`
/// - Linux: `~/.cache/loadout/logs` (or `$XDG_CACHE_HOME/loadout/logs`)
/// - Windows: `%LOCALAPPDATA%\loadout\cache\logs`
/// - Fallback: `/tmp/loadout/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "loadout")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/loadout"))
        .join("logs")
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`.
///
/// Keep the returned guard alive for the whole run; dropping it flushes and
/// stops the file writer.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let log_dir = log_dir.map_or_else(default_log_dir, Path::to_path_buf);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!("Log directory: {}", log_dir.display());
    Ok(guard)
}
