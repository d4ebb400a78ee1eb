use ghrest_core::{FromJson, JsonObject, MappingError};
use serde::Serialize;

use super::User;

/// Represents an issue, as returned when assignees change
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Issue {
  pub id: u64,
  pub node_id: String,
  pub number: u64,
  pub title: String,
  pub state: String,
  pub body: Option<String>,
  pub user: Option<User>,
  pub labels: Vec<Label>,
  pub assignee: Option<User>,
  pub assignees: Vec<User>,
  pub comments: u64,
  pub locked: bool,
  pub url: String,
  pub html_url: String,
  pub created_at: String,
  pub updated_at: String,
  pub closed_at: Option<String>,
}

impl Issue {
  pub fn is_assigned_to(&self, login: &str) -> bool {
    self.assignees.iter().any(|user| user.login == login)
  }
}

impl FromJson for Issue {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      number: object.get_u64("number", 0)?,
      title: object.get_str("title", "")?,
      state: object.get_str("state", "")?,
      body: object.get_opt_str("body")?,
      user: object.get_opt_entity("user")?,
      labels: object.get_entities("labels")?,
      assignee: object.get_opt_entity("assignee")?,
      assignees: object.get_entities("assignees")?,
      comments: object.get_u64("comments", 0)?,
      locked: object.get_bool("locked", false)?,
      url: object.get_str("url", "")?,
      html_url: object.get_str("html_url", "")?,
      created_at: object.get_str("created_at", "")?,
      updated_at: object.get_str("updated_at", "")?,
      closed_at: object.get_opt_str("closed_at")?,
    })
  }
}

/// Represents an issue label
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Label {
  pub id: u64,
  pub node_id: String,
  pub name: String,
  pub color: String,
  pub description: Option<String>,
  pub default: bool,
}

impl FromJson for Label {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      name: object.get_str("name", "")?,
      color: object.get_str("color", "")?,
      description: object.get_opt_str("description")?,
      default: object.get_bool("default", false)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use ghrest_core::map_entity;
  use ghrest_test_utils::{assert_fields_preserved, fixtures};

  use super::*;

  #[test]
  fn test_issue_round_trip_preserves_fields() {
    let input = fixtures::issue(1347, &["octocat", "hubot"]);
    let issue: Issue = map_entity(&input).unwrap();

    assert_eq!(issue.number, 1347);
    assert!(issue.is_assigned_to("hubot"));
    assert!(!issue.is_assigned_to("monalisa"));
    assert_eq!(issue.assignee.as_ref().map(|u| u.login.as_str()), Some("octocat"));
    assert_eq!(issue.labels[0].name, "bug");
    assert_eq!(issue.user.as_ref().map(|u| u.login.as_str()), Some("octocat"));
    assert_fields_preserved(&input, &serde_json::to_value(&issue).unwrap());
  }

  #[test]
  fn test_issue_from_deleted_user_survives() {
    let input = fixtures::with_nulls(fixtures::issue(7, &[]), &["user"]);
    let issue: Issue = map_entity(&input).unwrap();

    assert_eq!(issue.user, None);
    assert_fields_preserved(&input, &serde_json::to_value(&issue).unwrap());
  }
}
