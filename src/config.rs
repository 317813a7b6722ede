//! Application configuration.

use crate::consts::cli_consts::polling;
use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};
use thiserror::Error;

/// Environment variable overriding the backend URL.
pub const SERVER_URL_ENV: &str = "NETMON_SERVER_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("{0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the monitor backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Status poll interval in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
}

impl Config {
    #[cfg(test)]
    pub fn new(server_url: Option<String>, poll_interval_ms: Option<u64>) -> Self {
        Config {
            server_url,
            poll_interval_ms,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns a `ConfigError` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, or the defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the configuration file, if any.
    pub fn clear(path: &Path) -> Result<(), ConfigError> {
        // Check that the path ends with config.json
        if !path.ends_with("config.json") {
            return Err(ConfigError::Invalid(
                "Path must end with config.json".to_string(),
            ));
        }
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Picks the backend: command line, then environment variable, then
    /// config file, then the local default.
    pub fn resolve_environment(
        &self,
        cli_server_url: Option<&str>,
        env_server_url: Option<&str>,
    ) -> Result<Environment, ConfigError> {
        let chosen = cli_server_url
            .or(env_server_url)
            .or(self.server_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty());

        match chosen {
            Some(url) => url.parse::<Environment>().map_err(ConfigError::Invalid),
            None => Ok(Environment::default()),
        }
    }

    /// Picks the poll interval: command line, then config file, then the default.
    pub fn resolve_poll_interval(
        &self,
        cli_interval_ms: Option<u64>,
    ) -> Result<Duration, ConfigError> {
        match cli_interval_ms.or(self.poll_interval_ms) {
            Some(ms) if ms < polling::MIN_POLL_INTERVAL_MS => Err(ConfigError::Invalid(format!(
                "Poll interval must be at least {} ms",
                polling::MIN_POLL_INTERVAL_MS
            ))),
            Some(ms) => Ok(Duration::from_millis(ms)),
            None => Ok(polling::poll_interval()),
        }
    }
}

/// Path of the configuration file: `~/.netmon/config.json`.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let home_path = home::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home_path.join(".netmon").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new(Some("http://10.0.0.2:5000".to_string()), Some(750));
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::new(None, Some(500));
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    // A missing file yields the defaults.
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    // Clearing removes the file and tolerates a missing one.
    fn test_clear_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save(&path).unwrap();

        Config::clear(&path).unwrap();
        assert!(!path.exists());
        Config::clear(&path).unwrap();
        assert!(Config::clear(&dir.path().join("other.json")).is_err());
    }

    #[test]
    fn test_environment_precedence() {
        let config = Config::new(Some("http://from-file:5000".to_string()), None);

        let from_cli = config
            .resolve_environment(Some("http://from-cli:5000"), Some("http://from-env:5000"))
            .unwrap();
        assert_eq!(from_cli.server_url(), "http://from-cli:5000");

        let from_env = config
            .resolve_environment(None, Some("http://from-env:5000"))
            .unwrap();
        assert_eq!(from_env.server_url(), "http://from-env:5000");

        let from_file = config.resolve_environment(None, None).unwrap();
        assert_eq!(from_file.server_url(), "http://from-file:5000");

        let default = Config::default().resolve_environment(None, Some("  ")).unwrap();
        assert_eq!(default, Environment::Local);

        assert!(config.resolve_environment(Some("ftp://nope"), None).is_err());
    }

    #[test]
    fn test_poll_interval_resolution() {
        let config = Config::new(None, Some(1_000));
        assert_eq!(
            config.resolve_poll_interval(None).unwrap(),
            Duration::from_millis(1_000)
        );
        assert_eq!(
            config.resolve_poll_interval(Some(250)).unwrap(),
            Duration::from_millis(250)
        );
        assert_eq!(
            Config::default().resolve_poll_interval(None).unwrap(),
            Duration::from_millis(500)
        );
        assert!(config.resolve_poll_interval(Some(10)).is_err());
    }
}
