//! # Client Creation
//!
//! Builds the GitHub client for CLI commands: settings from `config.toml`,
//! overridden by command-line flags, with the token resolved from settings,
//! environment or `.netrc`.

use anyhow::{Context, Result};
use directories::BaseDirs;
use ghrest_client::{ClientSettings, GitHubClient};
use ghrest_core::ConfigDirs;
use ghrest_core::creds::resolve_token;
use tracing::{debug, warn};

use crate::cli::GlobalArgs;

/// Configuration directory selected by `--config-dir` or the platform default
pub fn config_dirs(global: &GlobalArgs) -> Result<ConfigDirs> {
  match &global.config_dir {
    Some(dir) => Ok(ConfigDirs::at(dir)),
    None => ConfigDirs::new(),
  }
}

/// Stored settings with command-line overrides applied
pub fn effective_settings(global: &GlobalArgs) -> Result<ClientSettings> {
  let mut settings = config_dirs(global)?.load_settings()?;

  if let Some(base_url) = &global.base_url {
    settings.base_url = base_url.clone();
  }
  if let Some(timeout) = global.timeout {
    settings.timeout_secs = timeout;
  }
  if let Some(token) = &global.token {
    settings.token = Some(token.clone());
  }

  let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
  settings.token = resolve_token(&settings, home.as_deref());
  if settings.token.is_none() {
    warn!("No GitHub token found; requests will be unauthenticated");
  }

  debug!("Using GitHub API at {}", settings.base_url);
  Ok(settings)
}

/// Creates an authenticated GitHub client for a CLI command
pub fn create_client(global: &GlobalArgs) -> Result<GitHubClient> {
  let settings = effective_settings(global)?;
  GitHubClient::new(settings).context("Failed to create GitHub client")
}
