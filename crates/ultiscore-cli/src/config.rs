// Configuration loading and parsing (config/ultiscore.toml).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use ultiscore_core::pricing::DegeneratePolicy;
use ultiscore_core::squad::SquadPlan;
use ultiscore_core::tournament::{
    AllTournaments, MatchingTournaments, NamedTournaments, TournamentSelector,
};

pub const CONFIG_FILE: &str = "ultiscore.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// ultiscore.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub teams: Vec<TeamConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub degenerate: DegeneratePolicy,
}

/// One team's game log and how to select and trim it.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub game_log: String,
    #[serde(default)]
    pub tournaments: Vec<String>,
    #[serde(default)]
    pub tournament_search: Option<String>,
    #[serde(default)]
    pub keep: Vec<String>,
    #[serde(default)]
    pub add: Vec<String>,
    #[serde(default)]
    pub questionable: Vec<String>,
    #[serde(default)]
    pub drop_inactive: bool,
}

impl TeamConfig {
    pub fn selector(&self) -> Box<dyn TournamentSelector> {
        match &self.tournament_search {
            Some(needle) => Box::new(MatchingTournaments::new(needle.trim())),
            None if self.tournaments.is_empty() => Box::new(AllTournaments),
            None => Box::new(NamedTournaments(self.tournaments.clone())),
        }
    }

    pub fn squad_plan(&self) -> SquadPlan {
        SquadPlan {
            keep: self.keep.clone(),
            add: self.add.clone(),
            questionable: self.questionable.clone(),
            drop_inactive: self.drop_inactive,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/ultiscore.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config = parse_config(&text).map_err(|source| ConfigError::ParseError {
        path: path.clone(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Parse config text without validating it.
pub fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

/// Copy `defaults/ultiscore.toml` into `config/` unless it is already there.
/// Returns the copied path, if any.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let defaults = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !defaults.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the project root",
                target.display(),
                defaults.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&defaults, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", defaults.display()),
    })?;
    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures the default config file is copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.teams.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "teams".into(),
            message: "at least one team is required".into(),
        });
    }

    let mut seen = HashSet::new();
    for (i, team) in config.teams.iter().enumerate() {
        let name = team.name.trim();
        if name.is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("teams[{i}].name"),
                message: "must not be empty".into(),
            });
        }
        if !seen.insert(name) {
            return Err(ConfigError::ValidationError {
                field: format!("teams[{i}].name"),
                message: format!("duplicate team name '{name}'"),
            });
        }
        if team.game_log.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("teams[{i}].game_log"),
                message: "must not be empty".into(),
            });
        }
        if let Some(needle) = &team.tournament_search {
            if needle.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: format!("teams[{i}].tournament_search"),
                    message: "must not be blank".into(),
                });
            }
            if !team.tournaments.is_empty() {
                return Err(ConfigError::ValidationError {
                    field: format!("teams[{i}].tournament_search"),
                    message: "cannot be combined with `tournaments`".into(),
                });
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
