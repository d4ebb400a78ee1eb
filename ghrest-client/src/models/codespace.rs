use ghrest_core::{FromJson, JsonObject, Listed, MappingError};
use serde::Serialize;

use super::{RepositorySummary, User};

/// Represents a codespace
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Codespace {
  pub id: u64,
  pub name: String,
  pub display_name: Option<String>,
  pub environment_id: Option<String>,
  pub owner: User,
  pub billable_owner: User,
  pub repository: RepositorySummary,
  pub machine: Option<CodespaceMachine>,
  pub prebuild: Option<bool>,
  pub created_at: String,
  pub updated_at: String,
  pub last_used_at: String,
  /// `Available`, `Shutdown`, `Starting`, ...
  pub state: String,
  pub url: String,
  pub git_status: GitStatus,
  pub location: String,
  pub idle_timeout_minutes: Option<u64>,
  pub retention_period_minutes: Option<u64>,
  pub web_url: String,
  pub machines_url: String,
  pub start_url: String,
  pub stop_url: String,
}

impl FromJson for Codespace {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      name: object.get_str("name", "")?,
      display_name: object.get_opt_str("display_name")?,
      environment_id: object.get_opt_str("environment_id")?,
      owner: object.get_entity("owner")?,
      billable_owner: object.get_entity("billable_owner")?,
      repository: object.get_entity("repository")?,
      machine: object.get_opt_entity("machine")?,
      prebuild: object.get_opt_bool("prebuild")?,
      created_at: object.get_str("created_at", "")?,
      updated_at: object.get_str("updated_at", "")?,
      last_used_at: object.get_str("last_used_at", "")?,
      state: object.get_str("state", "")?,
      url: object.get_str("url", "")?,
      git_status: object.get_entity("git_status")?,
      location: object.get_str("location", "")?,
      idle_timeout_minutes: object.get_opt_u64("idle_timeout_minutes")?,
      retention_period_minutes: object.get_opt_u64("retention_period_minutes")?,
      web_url: object.get_str("web_url", "")?,
      machines_url: object.get_str("machines_url", "")?,
      start_url: object.get_str("start_url", "")?,
      stop_url: object.get_str("stop_url", "")?,
    })
  }
}

impl Listed for Codespace {
  const COLLECTION_KEY: &'static str = "codespaces";
}

/// Hardware a codespace runs on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CodespaceMachine {
  pub name: String,
  pub display_name: String,
  pub operating_system: String,
  pub storage_in_bytes: u64,
  pub memory_in_bytes: u64,
  pub cpus: u64,
  pub prebuild_availability: Option<String>,
}

impl FromJson for CodespaceMachine {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      name: object.get_str("name", "")?,
      display_name: object.get_str("display_name", "")?,
      operating_system: object.get_str("operating_system", "")?,
      storage_in_bytes: object.get_u64("storage_in_bytes", 0)?,
      memory_in_bytes: object.get_u64("memory_in_bytes", 0)?,
      cpus: object.get_u64("cpus", 0)?,
      prebuild_availability: object.get_opt_str("prebuild_availability")?,
    })
  }
}

/// Working-tree state of a codespace relative to its remote
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GitStatus {
  pub ahead: u64,
  pub behind: u64,
  pub has_unpushed_changes: bool,
  pub has_uncommitted_changes: bool,
  #[serde(rename = "ref")]
  pub git_ref: String,
}

impl FromJson for GitStatus {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      ahead: object.get_u64("ahead", 0)?,
      behind: object.get_u64("behind", 0)?,
      has_unpushed_changes: object.get_bool("has_unpushed_changes", false)?,
      has_uncommitted_changes: object.get_bool("has_uncommitted_changes", false)?,
      git_ref: object.get_str("ref", "")?,
    })
  }
}

#[cfg(test)]
mod tests {
  use ghrest_core::{Page, map_entity};
  use ghrest_test_utils::{assert_fields_preserved, fixtures};
  use serde_json::json;

  use super::*;

  #[test]
  fn test_codespace_round_trip_preserves_fields() {
    let input = fixtures::codespace(2, "monalisa-octocat-hello-world-g4wpq6h95q");
    let codespace: Codespace = map_entity(&input).unwrap();

    assert_eq!(codespace.state, "Available");
    assert_eq!(codespace.git_status.git_ref, "main");
    assert_eq!(codespace.machine.as_ref().unwrap().cpus, 8);
    assert_fields_preserved(&input, &serde_json::to_value(&codespace).unwrap());
  }

  #[test]
  fn test_codespace_page() {
    let input = json!({
      "total_count": 3,
      "codespaces": [fixtures::codespace(2, "b"), fixtures::codespace(1, "a")]
    });

    let page: Page<Codespace> = map_entity(&input).unwrap();
    assert_eq!(page.total_count, 3);
    assert!(page.has_more());
    assert_eq!(page.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["b", "a"]);
  }

  #[test]
  fn test_missing_git_status_uses_defaults() {
    let codespace: Codespace = map_entity(&json!({"name": "x"})).unwrap();
    assert_eq!(codespace.git_status, GitStatus::default());
    assert_eq!(codespace.machine, None);
  }
}
