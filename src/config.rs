use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::diagnostics::DiagnosticThresholds;
use crate::draft::DraftConfig;
use crate::error::ConfigError;
use crate::goal::GoalConfig;
use crate::review::StudyConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub handle: String,
    pub model: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            handle: "type2future".to_string(),
            model: "gpt-4.1-mini".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/dashboard.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub account: AccountConfig,
    pub diagnostics: DiagnosticThresholds,
    pub draft: DraftConfig,
    pub goal: GoalConfig,
    pub study: StudyConfig,
    pub state: StateConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            account: AccountConfig::default(),
            diagnostics: DiagnosticThresholds::default(),
            draft: DraftConfig::default(),
            goal: GoalConfig::default(),
            study: StudyConfig::default(),
            state: StateConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config file if it exists, then applies environment overrides.
    /// Returns the resolved path alongside the config.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                        path: path.display().to_string(),
                        source,
                    })?;
                Self::from_toml(&contents)?
            }
            _ => AppConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(write_err)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(handle) = env::var("GROWTH_ACCOUNT_HANDLE") {
            let handle = handle.trim().trim_start_matches('@');
            if !handle.is_empty() {
                self.account.handle = handle.to_string();
            }
        }
        if let Ok(path) = env::var("GROWTH_STATE_PATH") {
            if !path.trim().is_empty() {
                self.state.path = PathBuf::from(path);
            }
        }
        if let Ok(level) = env::var("GROWTH_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.log_level = level;
            }
        }
        if let Ok(pillars) = env::var("GROWTH_PILLARS") {
            let parsed = parse_list(&pillars);
            if !parsed.is_empty() {
                self.draft.pillars = parsed;
            }
        }
    }
}

/// Splits a comma list, trimming entries and dropping blanks.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_config_path() -> Option<PathBuf> {
    env::var("GROWTH_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/growth.toml")))
}
