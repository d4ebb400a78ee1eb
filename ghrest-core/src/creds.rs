//! Access-token discovery.
//!
//! A token is taken from the settings file first, then from the
//! `GITHUB_TOKEN`/`GH_TOKEN` environment variables, and finally from a
//! `.netrc` entry for `api.github.com` or `github.com` (the password field).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::ClientSettings;
use crate::consts::{NETRC_MACHINES, TOKEN_ENV_VARS};

/// A `.netrc` machine entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetrcEntry {
  pub login: String,
  pub password: String,
}

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns the entry for the requested machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted. A machine without a password yields `Ok(None)`.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<NetrcEntry>> {
  let file = File::open(path).context("Failed to open .netrc file")?;
  let reader = BufReader::new(file);

  let mut current_machine: Option<String> = None;
  let mut login = String::new();
  let mut password = String::new();

  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    let mut tokens = line.split_whitespace();

    while let Some(token) = tokens.next() {
      match token {
        "machine" => {
          if current_machine.as_deref() == Some(target_machine) && !password.is_empty() {
            return Ok(Some(NetrcEntry { login, password }));
          }
          current_machine = tokens.next().map(str::to_string);
          login.clear();
          password.clear();
        }
        "login" => login = tokens.next().unwrap_or_default().to_string(),
        "password" => password = tokens.next().unwrap_or_default().to_string(),
        _ => {}
      }
    }
  }

  if current_machine.as_deref() == Some(target_machine) && !password.is_empty() {
    return Ok(Some(NetrcEntry { login, password }));
  }

  Ok(None)
}

/// Resolve a token using the process environment.
pub fn resolve_token(settings: &ClientSettings, home: Option<&Path>) -> Option<String> {
  resolve_token_with(settings, |name| std::env::var(name).ok(), home)
}

/// Resolve a token with an explicit environment lookup.
pub fn resolve_token_with<F>(settings: &ClientSettings, env: F, home: Option<&Path>) -> Option<String>
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(token) = settings.token.as_ref().filter(|t| !t.is_empty()) {
    debug!("Using token from settings");
    return Some(token.clone());
  }

  for name in TOKEN_ENV_VARS {
    if let Some(token) = env(name).filter(|t| !t.is_empty()) {
      debug!("Using token from ${}", name);
      return Some(token);
    }
  }

  let netrc_path = get_netrc_path(home?);
  if !netrc_path.exists() {
    return None;
  }

  for machine in NETRC_MACHINES {
    match parse_netrc_file(&netrc_path, machine) {
      Ok(Some(entry)) => {
        debug!("Using token from .netrc machine {}", machine);
        return Some(entry.password);
      }
      Ok(None) => {}
      Err(e) => {
        warn!("Ignoring unreadable .netrc: {e:#}");
        return None;
      }
    }
  }

  None
}
