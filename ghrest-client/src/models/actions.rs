//! GitHub Actions entities: workflows, runs, jobs, billing usage and
//! deployment reviews.

use std::collections::BTreeMap;
use std::fmt;

use ghrest_core::{FromJson, JsonObject, Listed, MappingError};
use serde::Serialize;

use super::{EnvironmentSummary, GitActor, RepositorySummary, Reviewer, User};

/// Represents a workflow definition
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Workflow {
  pub id: u64,
  pub node_id: String,
  pub name: String,
  pub path: String,
  pub state: String,
  pub created_at: String,
  pub updated_at: String,
  pub url: String,
  pub html_url: String,
  pub badge_url: String,
}

impl FromJson for Workflow {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      node_id: object.get_str("node_id", "")?,
      name: object.get_str("name", "")?,
      path: object.get_str("path", "")?,
      state: object.get_str("state", "")?,
      created_at: object.get_str("created_at", "")?,
      updated_at: object.get_str("updated_at", "")?,
      url: object.get_str("url", "")?,
      html_url: object.get_str("html_url", "")?,
      badge_url: object.get_str("badge_url", "")?,
    })
  }
}

impl Listed for Workflow {
  const COLLECTION_KEY: &'static str = "workflows";
}

/// Represents one run of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WorkflowRun {
  pub id: u64,
  pub name: Option<String>,
  pub node_id: String,
  pub head_branch: Option<String>,
  pub head_sha: String,
  pub path: String,
  pub display_title: String,
  pub run_number: u64,
  pub run_attempt: u64,
  pub event: String,
  pub status: String,
  pub conclusion: Option<String>,
  pub workflow_id: u64,
  pub check_suite_id: u64,
  pub url: String,
  pub html_url: String,
  pub jobs_url: String,
  pub logs_url: String,
  pub created_at: String,
  pub updated_at: String,
  pub run_started_at: String,
  pub actor: User,
  pub triggering_actor: User,
  pub pull_requests: Vec<PullRequestRef>,
  pub head_commit: Option<HeadCommit>,
  pub repository: RepositorySummary,
}

impl WorkflowRun {
  pub fn is_completed(&self) -> bool {
    self.status == "completed"
  }
}

impl FromJson for WorkflowRun {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      name: object.get_opt_str("name")?,
      node_id: object.get_str("node_id", "")?,
      head_branch: object.get_opt_str("head_branch")?,
      head_sha: object.get_str("head_sha", "")?,
      path: object.get_str("path", "")?,
      display_title: object.get_str("display_title", "")?,
      run_number: object.get_u64("run_number", 0)?,
      run_attempt: object.get_u64("run_attempt", 0)?,
      event: object.get_str("event", "")?,
      status: object.get_str("status", "")?,
      conclusion: object.get_opt_str("conclusion")?,
      workflow_id: object.get_u64("workflow_id", 0)?,
      check_suite_id: object.get_u64("check_suite_id", 0)?,
      url: object.get_str("url", "")?,
      html_url: object.get_str("html_url", "")?,
      jobs_url: object.get_str("jobs_url", "")?,
      logs_url: object.get_str("logs_url", "")?,
      created_at: object.get_str("created_at", "")?,
      updated_at: object.get_str("updated_at", "")?,
      run_started_at: object.get_str("run_started_at", "")?,
      actor: object.get_entity("actor")?,
      triggering_actor: object.get_entity("triggering_actor")?,
      pull_requests: object.get_entities("pull_requests")?,
      head_commit: object.get_opt_entity("head_commit")?,
      repository: object.get_entity("repository")?,
    })
  }
}

impl Listed for WorkflowRun {
  const COLLECTION_KEY: &'static str = "workflow_runs";
}

/// The commit a run was triggered for
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HeadCommit {
  pub id: String,
  pub tree_id: String,
  pub message: String,
  pub timestamp: String,
  pub author: GitActor,
  pub committer: GitActor,
}

impl FromJson for HeadCommit {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_str("id", "")?,
      tree_id: object.get_str("tree_id", "")?,
      message: object.get_str("message", "")?,
      timestamp: object.get_str("timestamp", "")?,
      author: object.get_entity("author")?,
      committer: object.get_entity("committer")?,
    })
  }
}

/// Pull request associated with a run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PullRequestRef {
  pub id: u64,
  pub number: u64,
  pub url: String,
  pub head: PullRequestBranch,
  pub base: PullRequestBranch,
}

impl FromJson for PullRequestRef {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      number: object.get_u64("number", 0)?,
      url: object.get_str("url", "")?,
      head: object.get_entity("head")?,
      base: object.get_entity("base")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PullRequestBranch {
  #[serde(rename = "ref")]
  pub git_ref: String,
  pub sha: String,
  pub repo: RepoPointer,
}

impl FromJson for PullRequestBranch {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      git_ref: object.get_str("ref", "")?,
      sha: object.get_str("sha", "")?,
      repo: object.get_entity("repo")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RepoPointer {
  pub id: u64,
  pub url: String,
  pub name: String,
}

impl FromJson for RepoPointer {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      url: object.get_str("url", "")?,
      name: object.get_str("name", "")?,
    })
  }
}

/// Represents a job within a workflow run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Job {
  pub id: u64,
  pub run_id: u64,
  pub run_url: String,
  pub run_attempt: u64,
  pub node_id: String,
  pub head_sha: String,
  pub head_branch: Option<String>,
  pub url: String,
  pub html_url: String,
  pub status: String,
  pub conclusion: Option<String>,
  pub created_at: String,
  pub started_at: String,
  pub completed_at: Option<String>,
  pub name: String,
  pub workflow_name: Option<String>,
  pub steps: Vec<Step>,
  pub labels: Vec<String>,
  pub runner_id: Option<u64>,
  pub runner_name: Option<String>,
}

impl FromJson for Job {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      run_id: object.get_u64("run_id", 0)?,
      run_url: object.get_str("run_url", "")?,
      run_attempt: object.get_u64("run_attempt", 0)?,
      node_id: object.get_str("node_id", "")?,
      head_sha: object.get_str("head_sha", "")?,
      head_branch: object.get_opt_str("head_branch")?,
      url: object.get_str("url", "")?,
      html_url: object.get_str("html_url", "")?,
      status: object.get_str("status", "")?,
      conclusion: object.get_opt_str("conclusion")?,
      created_at: object.get_str("created_at", "")?,
      started_at: object.get_str("started_at", "")?,
      completed_at: object.get_opt_str("completed_at")?,
      name: object.get_str("name", "")?,
      workflow_name: object.get_opt_str("workflow_name")?,
      steps: object.get_entities("steps")?,
      labels: object.get_strings("labels")?,
      runner_id: object.get_opt_u64("runner_id")?,
      runner_name: object.get_opt_str("runner_name")?,
    })
  }
}

impl Listed for Job {
  const COLLECTION_KEY: &'static str = "jobs";
}

/// One step of a job
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Step {
  pub name: String,
  pub status: String,
  pub conclusion: Option<String>,
  pub number: u64,
  pub started_at: Option<String>,
  pub completed_at: Option<String>,
}

impl FromJson for Step {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      name: object.get_str("name", "")?,
      status: object.get_str("status", "")?,
      conclusion: object.get_opt_str("conclusion")?,
      number: object.get_u64("number", 0)?,
      started_at: object.get_opt_str("started_at")?,
      completed_at: object.get_opt_str("completed_at")?,
    })
  }
}

/// Runner operating systems GitHub bills separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunnerEnvironment {
  Ubuntu,
  Macos,
  Windows,
}

impl RunnerEnvironment {
  pub const ALL: [Self; 3] = [Self::Ubuntu, Self::Macos, Self::Windows];

  /// Key used in `billable` maps
  pub const fn key(self) -> &'static str {
    match self {
      Self::Ubuntu => "UBUNTU",
      Self::Macos => "MACOS",
      Self::Windows => "WINDOWS",
    }
  }
}

impl fmt::Display for RunnerEnvironment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

/// Billable time of a workflow run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WorkflowRunUsage {
  /// Keyed by runner environment (`UBUNTU`, `MACOS`, `WINDOWS`)
  pub billable: BTreeMap<String, RunBillable>,
  pub run_duration_ms: u64,
}

impl WorkflowRunUsage {
  pub fn for_environment(&self, environment: RunnerEnvironment) -> Option<&RunBillable> {
    self.billable.get(environment.key())
  }

  pub fn total_billable_ms(&self) -> u64 {
    self.billable.values().map(|b| b.total_ms).sum()
  }
}

impl FromJson for WorkflowRunUsage {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      billable: object.get_map("billable")?,
      run_duration_ms: object.get_u64("run_duration_ms", 0)?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunBillable {
  pub total_ms: u64,
  pub jobs: u64,
  pub job_runs: Vec<JobRunUsage>,
}

impl FromJson for RunBillable {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      total_ms: object.get_u64("total_ms", 0)?,
      jobs: object.get_u64("jobs", 0)?,
      job_runs: object.get_entities("job_runs")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct JobRunUsage {
  pub job_id: u64,
  pub duration_ms: u64,
}

impl FromJson for JobRunUsage {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      job_id: object.get_u64("job_id", 0)?,
      duration_ms: object.get_u64("duration_ms", 0)?,
    })
  }
}

/// Billable time of a workflow in the current billing cycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WorkflowUsage {
  pub billable: BTreeMap<String, WorkflowBillable>,
}

impl WorkflowUsage {
  pub fn for_environment(&self, environment: RunnerEnvironment) -> Option<&WorkflowBillable> {
    self.billable.get(environment.key())
  }
}

impl FromJson for WorkflowUsage {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      billable: object.get_map("billable")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WorkflowBillable {
  pub total_ms: u64,
}

impl FromJson for WorkflowBillable {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      total_ms: object.get_u64("total_ms", 0)?,
    })
  }
}

/// A deployment waiting on environment protection rules
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PendingDeployment {
  pub environment: EnvironmentSummary,
  pub wait_timer: u64,
  pub wait_timer_started_at: Option<String>,
  pub current_user_can_approve: bool,
  pub reviewers: Vec<Reviewer>,
}

impl FromJson for PendingDeployment {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      environment: object.get_entity("environment")?,
      wait_timer: object.get_u64("wait_timer", 0)?,
      wait_timer_started_at: object.get_opt_str("wait_timer_started_at")?,
      current_user_can_approve: object.get_bool("current_user_can_approve", false)?,
      reviewers: object.get_entities("reviewers")?,
    })
  }
}

/// Review decision on a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
  #[default]
  Approved,
  Rejected,
  Pending,
}

impl ApprovalState {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Approved => "approved",
      Self::Rejected => "rejected",
      Self::Pending => "pending",
    }
  }

  /// Read the `state` discriminator (absent means approved)
  pub fn from_field(object: &JsonObject<'_>, field: &str) -> Result<Self, MappingError> {
    let value = object.get_str(field, Self::Approved.as_str())?;
    match value.as_str() {
      "approved" => Ok(Self::Approved),
      "rejected" => Ok(Self::Rejected),
      "pending" => Ok(Self::Pending),
      _ => Err(MappingError::UnknownVariant {
        field: field.to_string(),
        value,
      }),
    }
  }
}

/// A recorded review of a run's deployments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EnvironmentApproval {
  pub environments: Vec<EnvironmentSummary>,
  pub state: ApprovalState,
  pub user: User,
  pub comment: String,
}

impl FromJson for EnvironmentApproval {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      environments: object.get_entities("environments")?,
      state: ApprovalState::from_field(object, "state")?,
      user: object.get_entity("user")?,
      comment: object.get_str("comment", "")?,
    })
  }
}

#[cfg(test)]
mod tests {
  use ghrest_core::{Page, map_entity, map_list};
  use ghrest_test_utils::{assert_fields_preserved, fixtures};
  use serde_json::json;

  use super::*;
  use crate::models::ReviewerType;

  #[test]
  fn test_workflow_run_round_trip_preserves_fields() {
    let input = fixtures::workflow_run(30433642, "completed");
    let run: WorkflowRun = map_entity(&input).unwrap();

    assert_eq!(run.id, 30433642);
    assert!(run.is_completed());
    assert_eq!(run.actor.login, "octocat");
    assert_eq!(run.pull_requests[0].head.git_ref, "feature");
    assert_eq!(run.head_commit.as_ref().unwrap().author.name, "Mona Octocat");
    assert_fields_preserved(&input, &serde_json::to_value(&run).unwrap());
  }

  #[test]
  fn test_workflow_run_defaults() {
    let run: WorkflowRun = map_entity(&json!({"id": 5})).unwrap();
    assert_eq!(run.id, 5);
    assert_eq!(run.name, None);
    assert_eq!(run.conclusion, None);
    assert_eq!(run.head_commit, None);
    assert!(run.pull_requests.is_empty());
    assert_eq!(run.actor, User::default());
  }

  #[test]
  fn test_null_run_name_and_branch_survive() {
    let input = fixtures::with_nulls(fixtures::workflow_run(7, "queued"), &["name", "head_branch"]);
    let run: WorkflowRun = map_entity(&input).unwrap();

    assert_eq!(run.name, None);
    assert_eq!(run.head_branch, None);
    assert_fields_preserved(&input, &serde_json::to_value(&run).unwrap());
  }

  #[test]
  fn test_null_job_branch_and_workflow_name_survive() {
    let input = fixtures::with_nulls(fixtures::job(9, &["Set up job"]), &["head_branch", "workflow_name"]);
    let job: Job = map_entity(&input).unwrap();

    assert_eq!(job.head_branch, None);
    assert_eq!(job.workflow_name, None);
    assert_fields_preserved(&input, &serde_json::to_value(&job).unwrap());
  }

  #[test]
  fn test_run_page_keeps_total_and_order() {
    let input = json!({
      "total_count": 42,
      "workflow_runs": [
        fixtures::workflow_run(3, "queued"),
        fixtures::workflow_run(1, "completed"),
        fixtures::workflow_run(2, "in_progress")
      ]
    });

    let page: Page<WorkflowRun> = map_entity(&input).unwrap();
    assert_eq!(page.total_count, 42);
    assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1, 2]);
  }

  #[test]
  fn test_job_steps_keep_order() {
    let input = fixtures::job(399444496, &["Set up job", "Run actions/checkout@v4", "Complete job"]);
    let job: Job = map_entity(&input).unwrap();

    let names: Vec<&str> = job.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Set up job", "Run actions/checkout@v4", "Complete job"]);
    assert_eq!(job.steps[2].number, 3);
    assert_fields_preserved(&input, &serde_json::to_value(&job).unwrap());
  }

  #[test]
  fn test_run_usage_billable_by_environment() {
    let input = json!({
      "billable": {
        "UBUNTU": {"total_ms": 180000, "jobs": 1, "job_runs": [{"job_id": 1, "duration_ms": 180000}]},
        "MACOS": {"total_ms": 240000, "jobs": 4, "job_runs": [
          {"job_id": 2, "duration_ms": 60000},
          {"job_id": 3, "duration_ms": 60000}
        ]}
      },
      "run_duration_ms": 500000
    });

    let usage: WorkflowRunUsage = map_entity(&input).unwrap();
    assert_eq!(usage.for_environment(RunnerEnvironment::Ubuntu).unwrap().total_ms, 180000);
    assert_eq!(usage.for_environment(RunnerEnvironment::Macos).unwrap().job_runs.len(), 2);
    assert!(usage.for_environment(RunnerEnvironment::Windows).is_none());
    assert_eq!(usage.total_billable_ms(), 420000);
    assert_fields_preserved(&input, &serde_json::to_value(&usage).unwrap());
  }

  #[test]
  fn test_workflow_usage_empty_billable() {
    let usage: WorkflowUsage = map_entity(&json!({})).unwrap();
    assert!(usage.billable.is_empty());
  }

  #[test]
  fn test_pending_deployments_mix_reviewer_types() {
    let input = json!([{
      "environment": {"id": 161088068, "node_id": "MDExOkVudmlyb25tZW50MTYxMDg4MDY4", "name": "staging"},
      "wait_timer": 30,
      "wait_timer_started_at": "2020-11-23T22:00:40Z",
      "current_user_can_approve": true,
      "reviewers": [
        {"type": "User", "reviewer": fixtures::user("octocat", 1)},
        {"type": "Team", "reviewer": fixtures::team("justice-league", 1)}
      ]
    }]);

    let pending: Vec<PendingDeployment> = map_list(&input).unwrap();
    assert_eq!(pending[0].environment.name, "staging");
    let types: Vec<_> = pending[0].reviewers.iter().map(Reviewer::reviewer_type).collect();
    assert_eq!(types, vec![ReviewerType::User, ReviewerType::Team]);
    assert_fields_preserved(&input, &serde_json::to_value(&pending).unwrap());
  }

  #[test]
  fn test_approval_state_defaults_to_approved() {
    let approval: EnvironmentApproval = map_entity(&json!({"comment": "ship it"})).unwrap();
    assert_eq!(approval.state, ApprovalState::Approved);

    let approval: EnvironmentApproval = map_entity(&json!({"state": "rejected"})).unwrap();
    assert_eq!(approval.state, ApprovalState::Rejected);

    let error = map_entity::<EnvironmentApproval>(&json!({"state": "maybe"})).unwrap_err();
    assert!(matches!(error, MappingError::UnknownVariant { .. }));
  }
}
