//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use loadout_core::{CostumeId, SpecialPins};

const DEFAULT_DATA_DIR: &str = "data";

/// How reports are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// What the client does on this run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rank a character's costumes for the target skills.
    Optimize,
    /// Report the effects of the loadout equipped on one costume.
    Effects(CostumeId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    /// Character id or exact name.
    pub character: Option<String>,
    pub target_skills: Vec<String>,
    pub pins: SpecialPins,
    pub output: OutputFormat,
    pub command: Command,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            character: None,
            target_skills: Vec::new(),
            pins: SpecialPins::default(),
            output: OutputFormat::default(),
            command: Command::Optimize,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LOADOUT_DATA_DIR` - Content directory (default: `data`)
    /// - `LOADOUT_CHARACTER` - Character id or name to optimize
    /// - `LOADOUT_TARGET_SKILLS` - Target skills separated by `、` or `,`
    /// - `LOADOUT_SPECIAL_1`, `LOADOUT_SPECIAL_2`, `LOADOUT_SPECIAL_EITHER` - Special skill pins
    /// - `LOADOUT_OUTPUT` - `text` or `json` (default: text)
    /// - `LOADOUT_COSTUME` - Costume id; switches to the effects report
    /// - `LOADOUT_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source(read: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| read(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = read("LOADOUT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config.character = read("LOADOUT_CHARACTER").map(|value| value.trim().to_owned());

        if let Some(targets) = read("LOADOUT_TARGET_SKILLS") {
            config.target_skills = split_skills(&targets);
        }

        if let Some(skill) = read("LOADOUT_SPECIAL_1") {
            config.pins = config.pins.with_slot_1(skill.trim());
        }
        if let Some(skill) = read("LOADOUT_SPECIAL_2") {
            config.pins = config.pins.with_slot_2(skill.trim());
        }
        if let Some(skill) = read("LOADOUT_SPECIAL_EITHER") {
            config.pins = config.pins.with_either(skill.trim());
        }

        if let Some(output) = read("LOADOUT_OUTPUT").and_then(|value| value.trim().parse().ok()) {
            config.output = output;
        }

        if let Some(costume) = read("LOADOUT_COSTUME").and_then(|value| value.trim().parse().ok()) {
            config.command = Command::Effects(CostumeId(costume));
        }

        config.log_dir = read("LOADOUT_LOG_DIR").map(PathBuf::from);

        config
    }
}

/// Splits a target list on full-width `、` and ASCII `,`.
pub fn split_skills(list: &str) -> Vec<String> {
    list.split(['、', ','])
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_owned)
        .collect()
}
