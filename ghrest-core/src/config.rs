//! # Configuration Management
//!
//! Fixed per-client settings (base URL, token, timeout, error prefix) and the
//! XDG-style directory that stores them as `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{API_BASE_URL, API_VERSION, DEFAULT_ERROR_PREFIX, DEFAULT_TIMEOUT_SECS, USER_AGENT};

/// Settings a client is constructed with. They never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientSettings {
  /// Root of the REST API (GitHub Enterprise hosts use `https://host/api/v3`)
  pub base_url: String,
  /// Access token sent as a bearer credential
  pub token: Option<String>,
  /// Per-request timeout in seconds
  pub timeout_secs: u64,
  pub user_agent: String,
  /// Value of the `X-GitHub-Api-Version` header
  pub api_version: String,
  /// Prefix used for every error message the client produces
  pub error_prefix: String,
}

impl Default for ClientSettings {
  fn default() -> Self {
    Self {
      base_url: API_BASE_URL.to_string(),
      token: None,
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      user_agent: USER_AGENT.to_string(),
      api_version: API_VERSION.to_string(),
      error_prefix: DEFAULT_ERROR_PREFIX.to_string(),
    }
  }
}

impl ClientSettings {
  /// Settings for the public API authenticated with `token`
  pub fn with_token(token: impl Into<String>) -> Self {
    Self {
      token: Some(token.into()),
      ..Self::default()
    }
  }

  /// Per-request timeout; `0` means the default
  pub fn timeout(&self) -> Duration {
    match self.timeout_secs {
      0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      secs => Duration::from_secs(secs),
    }
  }
}

/// Represents the configuration directories for ghrest
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Locate the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("eddieland", "", "ghrest").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit directory (tests, `--config-dir`)
  pub fn at(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
    }
  }

  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Get the path to the settings file
  pub fn settings_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Load client settings from file or return defaults
  pub fn load_settings(&self) -> Result<ClientSettings> {
    let path = self.settings_path();

    if !path.exists() {
      debug!("No settings file at {}, using defaults", path.display());
      return Ok(ClientSettings::default());
    }

    let content =
      fs::read_to_string(&path).with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: ClientSettings =
      toml::from_str(&content).with_context(|| format!("Failed to parse settings from {}", path.display()))?;

    debug!("Loaded settings from {}", path.display());
    Ok(settings)
  }

  /// Save client settings to file
  pub fn save_settings(&self, settings: &ClientSettings) -> Result<PathBuf> {
    let path = self.settings_path();

    fs::create_dir_all(&self.config_dir)
      .with_context(|| format!("Failed to create config directory {}", self.config_dir.display()))?;

    let content = toml::to_string_pretty(settings).context("Failed to serialize settings to TOML")?;
    fs::write(&path, content).with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(path)
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_default_settings() {
    let settings = ClientSettings::default();
    assert_eq!(settings.base_url, "https://api.github.com");
    assert_eq!(settings.timeout(), Duration::from_secs(30));
    assert_eq!(settings.api_version, "2022-11-28");
    assert!(settings.token.is_none());
  }

  #[test]
  fn test_load_missing_file_returns_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::at(temp_dir.path().join("absent"));

    assert_eq!(dirs.load_settings().unwrap(), ClientSettings::default());
  }

  #[test]
  fn test_save_and_load_settings() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::at(temp_dir.path().join("ghrest"));

    let settings = ClientSettings {
      base_url: "https://github.example.com/api/v3".to_string(),
      timeout_secs: 5,
      ..ClientSettings::with_token("secret")
    };
    let path = dirs.save_settings(&settings).unwrap();

    assert!(path.exists());
    assert_eq!(dirs.load_settings().unwrap(), settings);
  }

  #[test]
  fn test_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::at(temp_dir.path());
    fs::write(dirs.settings_path(), "timeout_secs = 90\n").unwrap();

    let settings = dirs.load_settings().unwrap();
    assert_eq!(settings.timeout_secs, 90);
    assert_eq!(settings.base_url, "https://api.github.com");
  }

  #[test]
  fn test_zero_timeout_uses_default() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::at(temp_dir.path());
    fs::write(dirs.settings_path(), "timeout_secs = 0\n").unwrap();

    let settings = dirs.load_settings().unwrap();
    assert_eq!(settings.timeout_secs, 0);
    assert_eq!(settings.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
  }

  #[test]
  fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::at(temp_dir.path());
    fs::write(dirs.settings_path(), "timeout_secs = \"soon\"\n").unwrap();

    let error = dirs.load_settings().unwrap_err().to_string();
    assert!(error.contains("Failed to parse settings"));
  }
}
