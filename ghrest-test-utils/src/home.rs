//! Isolated home and configuration directories for testing
//!
//! Nothing here touches process environment variables; callers hand the paths
//! to the code under test (or to a child process via `Command::env`).

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary home directory with a config directory inside it
pub struct TestHome {
  /// The temporary directory used as HOME
  pub temp_dir: TempDir,
}

impl Default for TestHome {
  fn default() -> Self {
    Self::new()
  }
}

impl TestHome {
  /// Create a new empty home directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    fs::create_dir_all(temp_dir.path().join("config")).expect("Failed to create config directory");
    Self { temp_dir }
  }

  /// Get the path to the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to the configuration directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Write a `.netrc` file into the home directory
  pub fn write_netrc(&self, content: &str) -> PathBuf {
    let path = self.temp_dir.path().join(".netrc");
    fs::write(&path, content).expect("Failed to write test .netrc");
    path
  }

  /// Write `config.toml` into the configuration directory
  pub fn write_settings(&self, content: &str) -> PathBuf {
    let path = self.config_dir().join("config.toml");
    fs::write(&path, content).expect("Failed to write test config.toml");
    path
  }
}
