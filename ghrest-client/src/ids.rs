//! # Identifiers
//!
//! Typed keys for the path parameters managers accept. Each converts from the
//! raw key (a number or a string) and from the entity that carries it, so
//! `runs.get(&repo, 42)` and `runs.get(&repo, &run)` both work.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
  Branch, Codespace, Deployment, Environment, HookDelivery, Issue, MarketplaceAccount, Notification, Plan,
  RepositorySummary, User, Webhook, Workflow, WorkflowRun,
};

static GITHUB_REPO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"github\.com[/:]([^/]+)/([^/]+?)(?:\.git)?(?:/|$)").expect("Failed to compile GitHub repo regex")
});

/// Failure to interpret a repository reference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoRefError {
  #[error("Invalid repository '{0}', expected owner/name")]
  Malformed(String),

  #[error("Could not extract owner and repo from URL: {0}")]
  NotAGitHubUrl(String),
}

/// `owner/name` pair addressing a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoRef {
  pub owner: String,
  pub name: String,
}

impl RepoRef {
  pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      name: name.into(),
    }
  }

  /// Extract owner and repo from a GitHub URL such as
  /// `https://github.com/owner/repo`, `git@github.com:owner/repo.git` or
  /// `https://github.com/owner/repo/pull/123`.
  pub fn from_url(url: &str) -> Result<Self, RepoRefError> {
    let captures = GITHUB_REPO_REGEX
      .captures(url)
      .ok_or_else(|| RepoRefError::NotAGitHubUrl(url.to_string()))?;

    match (captures.get(1), captures.get(2)) {
      (Some(owner), Some(name)) => Ok(Self::new(owner.as_str(), name.as_str())),
      _ => Err(RepoRefError::NotAGitHubUrl(url.to_string())),
    }
  }
}

impl FromStr for RepoRef {
  type Err = RepoRefError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once('/') {
      Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
        Ok(Self::new(owner, name))
      }
      _ => Err(RepoRefError::Malformed(s.to_string())),
    }
  }
}

impl fmt::Display for RepoRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

impl From<&RepositorySummary> for RepoRef {
  fn from(repo: &RepositorySummary) -> Self {
    Self::new(&repo.owner.login, &repo.name)
  }
}

macro_rules! numeric_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    #[serde(transparent)]
    pub struct $name(pub u64);

    impl $name {
      pub fn segment(self) -> String {
        self.0.to_string()
      }
    }

    impl From<u64> for $name {
      fn from(value: u64) -> Self {
        Self(value)
      }
    }

    impl FromStr for $name {
      type Err = std::num::ParseIntError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_start_matches('#').parse().map(Self)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }
  };
}

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    #[serde(transparent)]
    pub struct $name(pub String);

    impl $name {
      pub fn as_str(&self) -> &str {
        &self.0
      }
    }

    impl From<&str> for $name {
      fn from(value: &str) -> Self {
        Self(value.to_string())
      }
    }

    impl From<String> for $name {
      fn from(value: String) -> Self {
        Self(value)
      }
    }

    impl FromStr for $name {
      type Err = Infallible;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
      }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str {
        &self.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

numeric_id!(
  /// Workflow run id
  RunId
);
numeric_id!(DeploymentId);
numeric_id!(
  /// Repository webhook id
  HookId
);
numeric_id!(DeliveryId);
numeric_id!(
  /// Marketplace listing plan id
  PlanId
);
numeric_id!(
  /// Marketplace account id (user or organization)
  AccountId
);
numeric_id!(
  /// Issue or pull request number (not its global id)
  IssueNumber
);

string_id!(
  /// Notification thread id (GitHub sends it as a string)
  ThreadId
);
string_id!(CodespaceName);
string_id!(BranchName);
string_id!(Username);
string_id!(EnvironmentName);

impl From<&WorkflowRun> for RunId {
  fn from(run: &WorkflowRun) -> Self {
    Self(run.id)
  }
}

impl From<&Deployment> for DeploymentId {
  fn from(deployment: &Deployment) -> Self {
    Self(deployment.id)
  }
}

impl From<&Webhook> for HookId {
  fn from(hook: &Webhook) -> Self {
    Self(hook.id)
  }
}

impl From<&HookDelivery> for DeliveryId {
  fn from(delivery: &HookDelivery) -> Self {
    Self(delivery.id)
  }
}

impl From<&Plan> for PlanId {
  fn from(plan: &Plan) -> Self {
    Self(plan.id)
  }
}

impl From<&MarketplaceAccount> for AccountId {
  fn from(account: &MarketplaceAccount) -> Self {
    Self(account.id)
  }
}

impl From<&Issue> for IssueNumber {
  fn from(issue: &Issue) -> Self {
    Self(issue.number)
  }
}

impl From<&Notification> for ThreadId {
  fn from(notification: &Notification) -> Self {
    Self(notification.id.clone())
  }
}

impl From<&Codespace> for CodespaceName {
  fn from(codespace: &Codespace) -> Self {
    Self(codespace.name.clone())
  }
}

impl From<&Branch> for BranchName {
  fn from(branch: &Branch) -> Self {
    Self(branch.name.clone())
  }
}

impl From<&User> for Username {
  fn from(user: &User) -> Self {
    Self(user.login.clone())
  }
}

impl From<&Environment> for EnvironmentName {
  fn from(environment: &Environment) -> Self {
    Self(environment.name.clone())
  }
}

/// A workflow addressed by numeric id or by its file name (`ci.yml`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorkflowRef {
  Id(u64),
  File(String),
}

impl WorkflowRef {
  pub fn segment(&self) -> String {
    self.to_string()
  }
}

impl From<u64> for WorkflowRef {
  fn from(id: u64) -> Self {
    Self::Id(id)
  }
}

impl From<&str> for WorkflowRef {
  fn from(file: &str) -> Self {
    Self::File(file.to_string())
  }
}

impl From<&Workflow> for WorkflowRef {
  fn from(workflow: &Workflow) -> Self {
    Self::Id(workflow.id)
  }
}

impl FromStr for WorkflowRef {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(s.parse::<u64>().map_or_else(|_| Self::File(s.to_string()), Self::Id))
  }
}

impl fmt::Display for WorkflowRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Id(id) => id.fmt(f),
      Self::File(file) => f.write_str(file),
    }
  }
}
