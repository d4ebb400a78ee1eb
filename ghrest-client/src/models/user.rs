//! Users, teams and the reviewer union over both.

use ghrest_core::{FromJson, JsonObject, MappingError};
use serde::Serialize;

/// Represents a GitHub user (or organization account)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct User {
  pub login: String,
  pub id: u64,
  pub node_id: String,
  pub avatar_url: String,
  pub url: String,
  pub html_url: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub site_admin: bool,
  pub name: Option<String>,
  pub email: Option<String>,
  pub company: Option<String>,
  pub bio: Option<String>,
  pub public_repos: u64,
  pub followers: u64,
  pub following: u64,
  pub created_at: String,
}

impl FromJson for User {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      login: object.get_str("login", "")?,
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      avatar_url: object.get_str("avatar_url", "")?,
      url: object.get_str("url", "")?,
      html_url: object.get_str("html_url", "")?,
      kind: object.get_str("type", "")?,
      site_admin: object.get_bool("site_admin", false)?,
      name: object.get_opt_str("name")?,
      email: object.get_opt_str("email")?,
      company: object.get_opt_str("company")?,
      bio: object.get_opt_str("bio")?,
      public_repos: object.get_u64("public_repos", 0)?,
      followers: object.get_u64("followers", 0)?,
      following: object.get_u64("following", 0)?,
      created_at: object.get_str("created_at", "")?,
    })
  }
}

/// Represents a GitHub team
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Team {
  pub id: u64,
  pub node_id: String,
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub privacy: String,
  pub permission: String,
  pub url: String,
  pub html_url: String,
}

impl FromJson for Team {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      name: object.get_str("name", "")?,
      slug: object.get_str("slug", "")?,
      description: object.get_opt_str("description")?,
      privacy: object.get_str("privacy", "")?,
      permission: object.get_str("permission", "")?,
      url: object.get_str("url", "")?,
      html_url: object.get_str("html_url", "")?,
    })
  }
}

/// Discriminator of a [`Reviewer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReviewerType {
  #[default]
  User,
  Team,
}

impl ReviewerType {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::User => "User",
      Self::Team => "Team",
    }
  }
}

/// A required reviewer: either a user or a team.
///
/// Wire shape is `{"type": "User" | "Team", "reviewer": {...}}`; an absent
/// `type` means `User`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "reviewer")]
pub enum Reviewer {
  User(User),
  Team(Team),
}

impl Reviewer {
  pub const fn reviewer_type(&self) -> ReviewerType {
    match self {
      Self::User(_) => ReviewerType::User,
      Self::Team(_) => ReviewerType::Team,
    }
  }

  /// Login for users, slug for teams
  pub fn handle(&self) -> &str {
    match self {
      Self::User(user) => &user.login,
      Self::Team(team) => &team.slug,
    }
  }

  pub const fn id(&self) -> u64 {
    match self {
      Self::User(user) => user.id,
      Self::Team(team) => team.id,
    }
  }
}

impl Default for Reviewer {
  fn default() -> Self {
    Self::User(User::default())
  }
}

impl FromJson for Reviewer {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    let tag = object.get_str("type", ReviewerType::User.as_str())?;
    let payload = object.get_object("reviewer")?;

    match tag.as_str() {
      "User" => {
        // A team payload carries a slug and never a login.
        if payload.contains("slug") && !payload.contains("login") {
          return Err(MappingError::VariantMismatch {
            field: "reviewer".to_string(),
            tag,
          });
        }
        let user = User::from_json(&payload).map_err(|e| e.within("reviewer"))?;
        Ok(Self::User(user))
      }
      "Team" => {
        if payload.contains("login") {
          return Err(MappingError::VariantMismatch {
            field: "reviewer".to_string(),
            tag,
          });
        }
        let team = Team::from_json(&payload).map_err(|e| e.within("reviewer"))?;
        Ok(Self::Team(team))
      }
      _ => Err(MappingError::UnknownVariant {
        field: "type".to_string(),
        value: tag,
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use ghrest_core::map_entity;
  use ghrest_test_utils::{assert_fields_preserved, fixtures};
  use serde_json::json;

  use super::*;

  #[test]
  fn test_user_round_trip_preserves_fields() {
    let input = fixtures::user("octocat", 1);
    let user: User = map_entity(&input).unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.kind, "User");
    assert_fields_preserved(&input, &serde_json::to_value(&user).unwrap());
  }

  #[test]
  fn test_user_defaults() {
    let user: User = map_entity(&json!({})).unwrap();
    assert_eq!(user, User::default());
  }

  #[test]
  fn test_team_reviewer_scenario() {
    let input = json!({"reviewers": [{"type": "Team", "reviewer": {"id": 1, "name": "core"}}]});
    let object = JsonObject::from_value(&input).unwrap();

    let reviewers: Vec<Reviewer> = object.get_entities("reviewers").unwrap();
    assert_eq!(reviewers.len(), 1);
    assert_eq!(reviewers[0].reviewer_type(), ReviewerType::Team);
    match &reviewers[0] {
      Reviewer::Team(team) => {
        assert_eq!(team.id, 1);
        assert_eq!(team.name, "core");
      }
      other => panic!("expected a team reviewer, got {other:?}"),
    }
  }

  #[test]
  fn test_missing_type_defaults_to_user() {
    let reviewer: Reviewer = map_entity(&json!({"reviewer": {"login": "hubot", "id": 2}})).unwrap();
    assert_eq!(reviewer.reviewer_type(), ReviewerType::User);
    assert_eq!(reviewer.handle(), "hubot");
  }

  #[test]
  fn test_unknown_type_is_rejected() {
    let error = map_entity::<Reviewer>(&json!({"type": "Bot", "reviewer": {"id": 3}})).unwrap_err();
    assert!(matches!(
      error,
      MappingError::UnknownVariant { ref field, ref value } if field == "type" && value == "Bot"
    ));
  }

  #[test]
  fn test_team_tag_with_user_payload_is_a_mismatch() {
    let error = map_entity::<Reviewer>(&json!({"type": "Team", "reviewer": {"login": "octocat", "id": 1}})).unwrap_err();
    assert!(matches!(error, MappingError::VariantMismatch { ref tag, .. } if tag == "Team"));
  }

  #[test]
  fn test_user_tag_with_team_payload_is_a_mismatch() {
    let error = map_entity::<Reviewer>(&json!({"type": "User", "reviewer": {"slug": "core", "id": 1}})).unwrap_err();
    assert!(matches!(error, MappingError::VariantMismatch { ref tag, .. } if tag == "User"));
  }

  #[test]
  fn test_reviewer_serializes_tag_and_payload() {
    let input = json!({"type": "Team", "reviewer": fixtures::team("core", 1)});
    let reviewer: Reviewer = map_entity(&input).unwrap();

    let output = serde_json::to_value(&reviewer).unwrap();
    assert_eq!(output["type"], "Team");
    assert_fields_preserved(&input, &output);
  }

  #[test]
  fn test_nested_error_path_is_reported() {
    let input = json!({"reviewers": [{"type": "User", "reviewer": {"id": "one"}}]});
    let object = JsonObject::from_value(&input).unwrap();

    let error = object.get_entities::<Reviewer>("reviewers").unwrap_err();
    assert_eq!(error.field(), Some("reviewers[0].reviewer.id"));
  }
}
