//! Deployments, their statuses and deployment environments.

use ghrest_core::{FromJson, JsonObject, Listed, MappingError};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::{Reviewer, User};

/// Represents a deployment
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Deployment {
  pub id: u64,
  pub node_id: String,
  pub url: String,
  pub sha: String,
  #[serde(rename = "ref")]
  pub git_ref: String,
  pub task: String,
  /// Free-form JSON supplied when the deployment was created
  pub payload: Value,
  pub environment: String,
  pub original_environment: String,
  pub description: Option<String>,
  pub creator: Option<User>,
  pub created_at: String,
  pub updated_at: String,
  pub statuses_url: String,
  pub repository_url: String,
  pub transient_environment: bool,
  pub production_environment: bool,
}

impl FromJson for Deployment {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      url: object.get_str("url", "")?,
      sha: object.get_str("sha", "")?,
      git_ref: object.get_str("ref", "")?,
      task: object.get_str("task", "")?,
      payload: object.get_json("payload"),
      environment: object.get_str("environment", "")?,
      original_environment: object.get_str("original_environment", "")?,
      description: object.get_opt_str("description")?,
      creator: object.get_opt_entity("creator")?,
      created_at: object.get_str("created_at", "")?,
      updated_at: object.get_str("updated_at", "")?,
      statuses_url: object.get_str("statuses_url", "")?,
      repository_url: object.get_str("repository_url", "")?,
      transient_environment: object.get_bool("transient_environment", false)?,
      production_environment: object.get_bool("production_environment", false)?,
    })
  }
}

/// Represents one status update of a deployment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DeploymentStatus {
  pub id: u64,
  pub node_id: String,
  pub url: String,
  pub state: String,
  pub creator: Option<User>,
  pub description: String,
  pub environment: String,
  pub target_url: String,
  pub log_url: String,
  pub environment_url: String,
  pub created_at: String,
  pub updated_at: String,
  pub deployment_url: String,
  pub repository_url: String,
}

impl FromJson for DeploymentStatus {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      url: object.get_str("url", "")?,
      state: object.get_str("state", "")?,
      creator: object.get_opt_entity("creator")?,
      description: object.get_str("description", "")?,
      environment: object.get_str("environment", "")?,
      target_url: object.get_str("target_url", "")?,
      log_url: object.get_str("log_url", "")?,
      environment_url: object.get_str("environment_url", "")?,
      created_at: object.get_str("created_at", "")?,
      updated_at: object.get_str("updated_at", "")?,
      deployment_url: object.get_str("deployment_url", "")?,
      repository_url: object.get_str("repository_url", "")?,
    })
  }
}

/// Environment reference embedded in reviews and pending deployments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EnvironmentSummary {
  pub id: u64,
  pub node_id: String,
  pub name: String,
  pub url: String,
  pub html_url: String,
}

impl FromJson for EnvironmentSummary {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      name: object.get_str("name", "")?,
      url: object.get_str("url", "")?,
      html_url: object.get_str("html_url", "")?,
    })
  }
}

/// Represents a deployment environment with its protection rules
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Environment {
  pub id: u64,
  pub node_id: String,
  pub name: String,
  pub url: String,
  pub html_url: String,
  pub created_at: String,
  pub updated_at: String,
  pub protection_rules: Vec<ProtectionRule>,
  pub deployment_branch_policy: Option<DeploymentBranchPolicy>,
}

impl Environment {
  /// Reviewers across all `required_reviewers` rules, in rule order
  pub fn required_reviewers(&self) -> impl Iterator<Item = &Reviewer> {
    self
      .protection_rules
      .iter()
      .filter_map(|rule| match rule {
        ProtectionRule::RequiredReviewers { reviewers, .. } => Some(reviewers),
        _ => None,
      })
      .flatten()
  }
}

impl FromJson for Environment {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      name: object.get_str("name", "")?,
      url: object.get_str("url", "")?,
      html_url: object.get_str("html_url", "")?,
      created_at: object.get_str("created_at", "")?,
      updated_at: object.get_str("updated_at", "")?,
      protection_rules: object.get_entities("protection_rules")?,
      deployment_branch_policy: object.get_opt_entity("deployment_branch_policy")?,
    })
  }
}

impl Listed for Environment {
  const COLLECTION_KEY: &'static str = "environments";
}

/// A protection rule, discriminated by its `type` field.
/// An absent `type` means `required_reviewers`. Rule types this crate does
/// not model land in [`ProtectionRule::Other`] with their fields kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtectionRule {
  RequiredReviewers {
    id: u64,
    node_id: String,
    prevent_self_review: bool,
    reviewers: Vec<Reviewer>,
  },
  WaitTimer {
    id: u64,
    node_id: String,
    wait_timer: u64,
  },
  BranchPolicy {
    id: u64,
    node_id: String,
  },
  Other {
    kind: String,
    id: u64,
    node_id: String,
    fields: Map<String, Value>,
  },
}

impl ProtectionRule {
  pub const fn id(&self) -> u64 {
    match self {
      Self::RequiredReviewers { id, .. }
      | Self::WaitTimer { id, .. }
      | Self::BranchPolicy { id, .. }
      | Self::Other { id, .. } => *id,
    }
  }

  /// The `type` string as GitHub sends it
  pub fn kind(&self) -> &str {
    match self {
      Self::RequiredReviewers { .. } => "required_reviewers",
      Self::WaitTimer { .. } => "wait_timer",
      Self::BranchPolicy { .. } => "branch_policy",
      Self::Other { kind, .. } => kind,
    }
  }

  pub fn node_id(&self) -> &str {
    match self {
      Self::RequiredReviewers { node_id, .. }
      | Self::WaitTimer { node_id, .. }
      | Self::BranchPolicy { node_id, .. }
      | Self::Other { node_id, .. } => node_id,
    }
  }
}

impl Serialize for ProtectionRule {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(None)?;
    map.serialize_entry("type", self.kind())?;
    map.serialize_entry("id", &self.id())?;
    map.serialize_entry("node_id", self.node_id())?;
    match self {
      Self::RequiredReviewers {
        prevent_self_review,
        reviewers,
        ..
      } => {
        map.serialize_entry("prevent_self_review", prevent_self_review)?;
        map.serialize_entry("reviewers", reviewers)?;
      }
      Self::WaitTimer { wait_timer, .. } => map.serialize_entry("wait_timer", wait_timer)?,
      Self::BranchPolicy { .. } => {}
      Self::Other { fields, .. } => {
        for (key, value) in fields {
          map.serialize_entry(key, value)?;
        }
      }
    }
    map.end()
  }
}

impl FromJson for ProtectionRule {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    let kind = object.get_str("type", "required_reviewers")?;
    let id = object.get_u64("id", 0)?;
    let node_id = object.get_str("node_id", "")?;

    match kind.as_str() {
      "required_reviewers" => Ok(Self::RequiredReviewers {
        id,
        node_id,
        prevent_self_review: object.get_bool("prevent_self_review", false)?,
        reviewers: object.get_entities("reviewers")?,
      }),
      "wait_timer" => Ok(Self::WaitTimer {
        id,
        node_id,
        wait_timer: object.get_u64("wait_timer", 0)?,
      }),
      "branch_policy" => Ok(Self::BranchPolicy { id, node_id }),
      _ => Ok(Self::Other {
        fields: object.fields_except(&["type", "id", "node_id"]),
        kind,
        id,
        node_id,
      }),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeploymentBranchPolicy {
  pub protected_branches: bool,
  pub custom_branch_policies: bool,
}

impl FromJson for DeploymentBranchPolicy {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      protected_branches: object.get_bool("protected_branches", false)?,
      custom_branch_policies: object.get_bool("custom_branch_policies", false)?,
    })
  }
}
