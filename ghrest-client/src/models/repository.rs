use ghrest_core::{FromJson, JsonObject, MappingError};
use serde::Serialize;

use super::User;

/// Repository as embedded in runs, notifications and codespaces
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RepositorySummary {
  pub id: u64,
  pub node_id: String,
  pub name: String,
  pub full_name: String,
  pub private: bool,
  pub owner: User,
  pub html_url: String,
  pub description: Option<String>,
  pub fork: bool,
  pub url: String,
  pub default_branch: Option<String>,
}

impl FromJson for RepositorySummary {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      name: object.get_str("name", "")?,
      full_name: object.get_str("full_name", "")?,
      private: object.get_bool("private", false)?,
      owner: object.get_entity("owner")?,
      html_url: object.get_str("html_url", "")?,
      description: object.get_opt_str("description")?,
      fork: object.get_bool("fork", false)?,
      url: object.get_str("url", "")?,
      default_branch: object.get_opt_str("default_branch")?,
    })
  }
}

/// Git author or committer identity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GitActor {
  pub name: String,
  pub email: String,
  /// Only present on full commit objects
  pub date: Option<String>,
}

impl FromJson for GitActor {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      name: object.get_str("name", "")?,
      email: object.get_str("email", "")?,
      date: object.get_opt_str("date")?,
    })
  }
}
