//! Loadout optimizer client binary.
//!
//! Composition root: loads `.env`, reads configuration from the environment,
//! installs logging, loads content, and runs one command against an
//! [`OptimizerService`] backed by the in-memory repository.
//!
//! ```bash
//! LOADOUT_CHARACTER=緑谷出久 LOADOUT_TARGET_SKILLS="走り速度＋、最大HP＋" cargo run -p loadout-client
//! LOADOUT_COSTUME=2 LOADOUT_OUTPUT=json cargo run -p loadout-client
//! ```
mod config;
mod logging;
mod report;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use loadout_content::{Content, ContentFactory};
use loadout_core::{CharacterId, OptimizeRequest, Roster};
use loadout_runtime::{InMemoryRepository, OptimizerService, RuntimeConfig};

use crate::config::{ClientConfig, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let client_config = ClientConfig::from_env();
    let runtime_config = RuntimeConfig::from_env();

    let _guard = logging::setup_logging(client_config.log_dir.as_deref())?;

    tracing::info!("Starting loadout client");
    tracing::info!("Data directory: {}", client_config.data_dir.display());
    tracing::info!(
        "Workers: {}, top {}, scoring {}",
        runtime_config.workers,
        runtime_config.optimizer.top_n,
        runtime_config.optimizer.scoring
    );

    let Content {
        skills,
        roster,
        memories,
    } = ContentFactory::new(&client_config.data_dir)
        .load_all()
        .context("failed to load content")?;

    let character = match &client_config.command {
        Command::Optimize => Some(resolve_character(&roster, &client_config)?),
        Command::Effects(_) => None,
    };

    let repository = Arc::new(InMemoryRepository::new(roster, memories));
    let service = OptimizerService::new(repository, Arc::new(skills), runtime_config);

    let output = match client_config.command {
        Command::Optimize => {
            let (id, name) = character.ok_or_else(|| anyhow!("no character selected"))?;
            let request = OptimizeRequest::new(client_config.target_skills.iter().cloned())
                .with_pins(client_config.pins.clone());
            let results = service.optimize(id, &request).await?;
            report::render_results(&name, &client_config.target_skills, &results, client_config.output)?
        }
        Command::Effects(costume) => {
            let effects = service.costume_effects(costume).await?;
            report::render_effects(&effects, client_config.output)?
        }
    };

    print!("{output}");
    tracing::info!("Client finished");
    Ok(())
}

/// Looks up `LOADOUT_CHARACTER` as an id first, then as an exact name.
fn resolve_character(roster: &Roster, config: &ClientConfig) -> Result<(CharacterId, String)> {
    let key = config
        .character
        .as_deref()
        .ok_or_else(|| anyhow!("LOADOUT_CHARACTER is not set"))?;

    let found = key
        .parse::<u32>()
        .ok()
        .and_then(|id| roster.character(CharacterId(id)))
        .or_else(|| roster.character_by_name(key))
        .ok_or_else(|| anyhow!("unknown character '{}'", key))?;

    Ok((found.id, found.name.clone()))
}
