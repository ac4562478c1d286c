//! Configuration management
//!
//! Settings live in `~/.worklog/config.yaml`. Environment variables
//! override the file, and command-line flags override both.
//!
//! | Key                          | Env var               | Default            |
//! |------------------------------|-----------------------|--------------------|
//! | `repo_path`                  | `WORKLOG_REPO`        | current directory  |
//! | `default_timezone`           | `WORKLOG_TIMEZONE`    | `America/New_York` |
//! | `default_duration_minutes`   |                       | 60                 |
//! | `pre_commit_buffer_minutes`  | `WORKLOG_PRE_BUFFER`  | 15                 |
//! | `post_commit_buffer_minutes` | `WORKLOG_POST_BUFFER` | 5                  |

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::journal::DEFAULT_TIMEZONE;
use crate::timing::{
    TimingConfig, DEFAULT_POST_COMMIT_BUFFER_MINUTES, DEFAULT_PRE_COMMIT_BUFFER_MINUTES,
    DEFAULT_SESSION_DURATION_MINUTES,
};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "repo_path",
    "default_timezone",
    "default_duration_minutes",
    "pre_commit_buffer_minutes",
    "post_commit_buffer_minutes",
];

/// Errors from reading or changing individual config values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown config key '{0}'. Valid keys: {}", CONFIG_KEYS.join(", "))]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository used to resolve commit references
    pub repo_path: Option<String>,

    /// IANA zone for annotation times and unknown commit offsets
    pub default_timezone: String,

    /// Reserved fallback session length
    pub default_duration_minutes: u32,

    pub pre_commit_buffer_minutes: u32,
    pub post_commit_buffer_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_path: None,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            default_duration_minutes: DEFAULT_SESSION_DURATION_MINUTES,
            pre_commit_buffer_minutes: DEFAULT_PRE_COMMIT_BUFFER_MINUTES,
            post_commit_buffer_minutes: DEFAULT_POST_COMMIT_BUFFER_MINUTES,
        }
    }
}

impl Config {
    /// Loads the config file, or defaults if there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads a config file from an explicit path, or defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_saphyr::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file {}: {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Writes the config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let yaml = serde_saphyr::to_string(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".worklog");

        Ok(config_dir.join("config.yaml"))
    }

    /// Reads a value by key, formatted for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "repo_path" => self.repo_path.clone().unwrap_or_default(),
            "default_timezone" => self.default_timezone.clone(),
            "default_duration_minutes" => self.default_duration_minutes.to_string(),
            "pre_commit_buffer_minutes" => self.pre_commit_buffer_minutes.to_string(),
            "post_commit_buffer_minutes" => self.post_commit_buffer_minutes.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Sets a value by key after validating it.
    ///
    /// An empty `repo_path` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "repo_path" => {
                let value = value.trim();
                self.repo_path = (!value.is_empty()).then(|| value.to_string());
            }
            "default_timezone" => {
                self.default_timezone = parse_zone(key, value)?.name().to_string();
            }
            "default_duration_minutes" => {
                self.default_duration_minutes = parse_minutes(key, value)?;
            }
            "pre_commit_buffer_minutes" => {
                self.pre_commit_buffer_minutes = parse_minutes(key, value)?;
            }
            "post_commit_buffer_minutes" => {
                self.post_commit_buffer_minutes = parse_minutes(key, value)?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Applies `WORKLOG_*` environment variables on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from an arbitrary variable source.
    ///
    /// Invalid values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        const OVERRIDES: &[(&str, &str)] = &[
            ("WORKLOG_REPO", "repo_path"),
            ("WORKLOG_TIMEZONE", "default_timezone"),
            ("WORKLOG_PRE_BUFFER", "pre_commit_buffer_minutes"),
            ("WORKLOG_POST_BUFFER", "post_commit_buffer_minutes"),
        ];

        for &(var, key) in OVERRIDES {
            if let Some(value) = lookup(var) {
                if let Err(e) = self.set(key, &value) {
                    tracing::warn!("Ignoring {}: {}", var, e);
                }
            }
        }
    }

    /// The configured zone, or the default zone if the stored name is invalid.
    pub fn timezone(&self) -> Tz {
        self.default_timezone.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(
                "Unknown timezone '{}', using {}",
                self.default_timezone,
                DEFAULT_TIMEZONE
            );
            crate::journal::default_zone()
        })
    }

    /// Settings for the timing reconstructor.
    pub fn timing_config(&self) -> TimingConfig {
        TimingConfig {
            repo_path: self.repo_path.as_ref().map(PathBuf::from),
            default_duration_minutes: self.default_duration_minutes,
            pre_commit_buffer_minutes: self.pre_commit_buffer_minutes,
            post_commit_buffer_minutes: self.post_commit_buffer_minutes,
            default_timezone: self.timezone().name().to_string(),
        }
    }
}

fn parse_zone(key: &str, value: &str) -> Result<Tz, ConfigError> {
    value.trim().parse::<Tz>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: "not an IANA timezone name".to_string(),
    })
}

fn parse_minutes(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "pre_commit_buffer_minutes: 30\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.pre_commit_buffer_minutes, 30);
        assert_eq!(config.post_commit_buffer_minutes, 5);
        assert_eq!(config.default_timezone, "America/New_York");
    }

    #[test]
    fn test_load_invalid_yaml_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "pre_commit_buffer_minutes: [not, a, number]\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.set("repo_path", "/work/repo").unwrap();
        config.set("post_commit_buffer_minutes", "10").unwrap();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        config.set("default_timezone", "Europe/London").unwrap();
        assert_eq!(config.get("default_timezone").unwrap(), "Europe/London");

        config.set("repo_path", "  ").unwrap();
        assert_eq!(config.repo_path, None);
        assert_eq!(config.get("repo_path").unwrap(), "");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("default_timezone", "Mars/Olympus"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("pre_commit_buffer_minutes", "-5"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("colour", "blue"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_key_message_lists_keys() {
        let err = Config::default().get("nope").unwrap_err();
        assert!(err.to_string().contains("pre_commit_buffer_minutes"));
    }

    #[test]
    fn test_overrides_apply_and_skip_invalid() {
        let vars: HashMap<&str, &str> = [
            ("WORKLOG_REPO", "/from/env"),
            ("WORKLOG_PRE_BUFFER", "20"),
            ("WORKLOG_POST_BUFFER", "soon"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.repo_path.as_deref(), Some("/from/env"));
        assert_eq!(config.pre_commit_buffer_minutes, 20);
        assert_eq!(config.post_commit_buffer_minutes, 5);
    }

    #[test]
    fn test_timing_config() {
        let mut config = Config::default();
        config.set("repo_path", "/work/repo").unwrap();
        config.default_timezone = "Not/AZone".to_string();

        let timing = config.timing_config();
        assert_eq!(timing.repo_path, Some(PathBuf::from("/work/repo")));
        assert_eq!(timing.default_timezone, "America/New_York");
        assert_eq!(timing.pre_commit_buffer_minutes, 15);
    }
}
