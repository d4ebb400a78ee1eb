use ghrest_core::{FromJson, JsonObject, MappingError};
use serde::Serialize;

use super::{GitActor, User};

/// Represents a branch
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Branch {
  /// GitHub omits this for branches; kept for payloads that carry one
  pub id: u64,
  pub name: String,
  pub commit: BranchCommit,
  pub protected: bool,
  pub protection: Option<BranchProtection>,
  pub protection_url: Option<String>,
}

impl FromJson for Branch {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      name: object.get_str("name", "")?,
      commit: object.get_entity("commit")?,
      protected: object.get_bool("protected", false)?,
      protection: object.get_opt_entity("protection")?,
      protection_url: object.get_opt_str("protection_url")?,
    })
  }
}

/// Tip commit of a branch. List responses only carry `sha` and `url`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BranchCommit {
  pub sha: String,
  pub url: String,
  pub node_id: Option<String>,
  pub html_url: Option<String>,
  pub commit: Option<CommitDetail>,
  pub author: Option<User>,
  pub committer: Option<User>,
  pub parents: Vec<CommitPointer>,
}

impl FromJson for BranchCommit {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      sha: object.get_str("sha", "")?,
      url: object.get_str("url", "")?,
      node_id: object.get_opt_str("node_id")?,
      html_url: object.get_opt_str("html_url")?,
      commit: object.get_opt_entity("commit")?,
      author: object.get_opt_entity("author")?,
      committer: object.get_opt_entity("committer")?,
      parents: object.get_entities("parents")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommitDetail {
  pub message: String,
  pub author: GitActor,
  pub committer: GitActor,
  pub comment_count: u64,
  pub url: String,
}

impl CommitDetail {
  /// First line of the commit message
  pub fn summary(&self) -> &str {
    self.message.lines().next().unwrap_or_default()
  }
}

impl FromJson for CommitDetail {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      message: object.get_str("message", "")?,
      author: object.get_entity("author")?,
      committer: object.get_entity("committer")?,
      comment_count: object.get_u64("comment_count", 0)?,
      url: object.get_str("url", "")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommitPointer {
  pub sha: String,
  pub url: String,
}

impl FromJson for CommitPointer {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      sha: object.get_str("sha", "")?,
      url: object.get_str("url", "")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BranchProtection {
  pub enabled: bool,
  pub required_status_checks: StatusChecks,
}

impl FromJson for BranchProtection {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      enabled: object.get_bool("enabled", false)?,
      required_status_checks: object.get_entity("required_status_checks")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatusChecks {
  pub enforcement_level: String,
  pub contexts: Vec<String>,
}

impl FromJson for StatusChecks {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      enforcement_level: object.get_str("enforcement_level", "")?,
      contexts: object.get_strings("contexts")?,
    })
  }
}

/// Result of syncing a fork branch with its upstream
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MergeUpstreamResult {
  pub message: String,
  /// `merge`, `fast-forward` or `none`
  pub merge_type: String,
  pub base_branch: String,
}

impl FromJson for MergeUpstreamResult {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      message: object.get_str("message", "")?,
      merge_type: object.get_str("merge_type", "")?,
      base_branch: object.get_str("base_branch", "")?,
    })
  }
}

#[cfg(test)]
mod tests {
  use ghrest_core::{map_entity, map_list};
  use ghrest_test_utils::{assert_fields_preserved, fixtures};
  use serde_json::json;

  use super::*;

  #[test]
  fn test_branch_scenario() {
    let input = json!({"id": 42, "name": "main", "commit": {"sha": "abc123", "url": "https://x"}});
    let branch: Branch = map_entity(&input).unwrap();

    assert_eq!(branch.id, 42);
    assert_eq!(branch.name, "main");
    assert_eq!(branch.commit.sha, "abc123");
    assert_eq!(branch.commit.url, "https://x");
    assert!(!branch.protected);
    assert_fields_preserved(&input, &serde_json::to_value(&branch).unwrap());
  }

  #[test]
  fn test_full_branch_round_trip() {
    let input = fixtures::branch("main", "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc");
    let branch: Branch = map_entity(&input).unwrap();

    let detail = branch.commit.commit.as_ref().unwrap();
    assert_eq!(detail.summary(), "Fix all the bugs");
    assert_eq!(branch.protection.as_ref().unwrap().required_status_checks.contexts, vec!["ci"]);
    assert_fields_preserved(&input, &serde_json::to_value(&branch).unwrap());
  }

  #[test]
  fn test_branch_list_preserves_order() {
    let input = json!([
      {"name": "main", "commit": {"sha": "1"}},
      {"name": "develop", "commit": {"sha": "2"}},
      {"name": "feature/x", "commit": {"sha": "3"}}
    ]);

    let branches: Vec<Branch> = map_list(&input).unwrap();
    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["main", "develop", "feature/x"]);
  }

  #[test]
  fn test_commit_must_be_an_object() {
    let error = map_entity::<Branch>(&json!({"name": "main", "commit": "abc123"})).unwrap_err();
    assert_eq!(error.field(), Some("commit"));
  }
}
