use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_LINEAR_API_URL: &str = "https://api.linear.app/graphql";

const CONFIG_FILE_NAME: &str = "config.json";

/// Contents of the config file written by `docket config init`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    pub linear_api_key: Option<String>,
    pub linear_team_id: Option<String>,
    pub linear_api_url: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(|err| {
            AppError::Configuration(format!("failed to serialize config: {err}"))
        })?;
        fs::write(&path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Some(base) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(base).join("docket"));
    }
    let home = env::var_os("HOME").filter(|v| !v.is_empty()).ok_or_else(|| {
        AppError::Configuration("neither XDG_CONFIG_HOME nor HOME is set".to_string())
    })?;
    Ok(PathBuf::from(home).join(".config").join("docket"))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// Resolved settings for one run: the stored config with environment
/// variables layered on top.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub linear_api_key: Option<String>,
    pub linear_team_id: Option<String>,
    pub linear_api_url: String,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Ok(Self {
            linear_api_key: env_override("LINEAR_API_KEY").or(stored.linear_api_key),
            linear_team_id: env_override("LINEAR_TEAM_ID").or(stored.linear_team_id),
            linear_api_url: env_override("LINEAR_API_URL")
                .or(stored.linear_api_url)
                .unwrap_or_else(|| DEFAULT_LINEAR_API_URL.to_string()),
        })
    }

    /// Validates the settings every submission needs. Called once before a
    /// client is built, so a missing credential stops the run with zero
    /// network calls.
    pub fn linear(&self, team_override: Option<String>) -> AppResult<LinearConfig> {
        let api_key = self.linear_api_key.clone().ok_or_else(|| {
            AppError::Configuration(
                "Linear API key not configured; set LINEAR_API_KEY or run `docket config init`"
                    .to_string(),
            )
        })?;
        let team_id = team_override
            .or_else(|| self.linear_team_id.clone())
            .ok_or_else(|| {
                AppError::Configuration(
                    "Linear team ID not configured; set LINEAR_TEAM_ID or run `docket config init`"
                        .to_string(),
                )
            })?;

        Ok(LinearConfig {
            api_key,
            team_id,
            api_url: self.linear_api_url.clone(),
        })
    }
}

/// Everything the Linear client needs, fully resolved.
#[derive(Debug, Clone)]
pub struct LinearConfig {
    pub api_key: String,
    pub team_id: String,
    pub api_url: String,
}

fn env_override(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, team_id: Option<&str>) -> AppConfig {
        AppConfig {
            linear_api_key: api_key.map(str::to_string),
            linear_team_id: team_id.map(str::to_string),
            linear_api_url: DEFAULT_LINEAR_API_URL.to_string(),
        }
    }

    #[test]
    fn resolves_complete_settings() {
        let linear = config(Some("lin_api_123"), Some("TEAM")).linear(None).unwrap();
        assert_eq!(linear.api_key, "lin_api_123");
        assert_eq!(linear.team_id, "TEAM");
        assert_eq!(linear.api_url, DEFAULT_LINEAR_API_URL);
    }

    #[test]
    fn missing_api_key_is_a_configuration_error() {
        let err = config(None, Some("TEAM")).linear(None).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn missing_team_id_is_a_configuration_error() {
        let err = config(Some("lin_api_123"), None).linear(None).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn team_override_beats_configured_team() {
        let linear = config(Some("lin_api_123"), Some("TEAM"))
            .linear(Some("OTHER".to_string()))
            .unwrap();
        assert_eq!(linear.team_id, "OTHER");
    }

    #[test]
    fn team_override_satisfies_missing_config() {
        let linear = config(Some("lin_api_123"), None)
            .linear(Some("OTHER".to_string()))
            .unwrap();
        assert_eq!(linear.team_id, "OTHER");
    }
}
