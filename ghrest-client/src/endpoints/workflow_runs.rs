//! # GitHub Actions Workflow Run Endpoints
//!
//! Runs, their jobs and billing, deployment reviews, and the run lifecycle
//! actions (approve, cancel, re-run, delete).

use ghrest_core::{Page, map_entity, map_list};
use reqwest::Method;
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{RepoRef, RunId, WorkflowRef};
use crate::models::{
  ApprovalState, Deployment, EnvironmentApproval, Job, PendingDeployment, WorkflowRun, WorkflowRunUsage,
};
use crate::outcome::ActionOutcome;
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

/// Filters for listing workflow runs
#[derive(Debug, Clone, Default)]
pub struct ListRunsOptions {
  /// Login of the user who triggered the run
  pub actor: Option<String>,
  pub branch: Option<String>,
  pub event: Option<String>,
  /// `completed`, `in_progress`, `failure`, `success`, ...
  pub status: Option<String>,
  /// Date range such as `>=2024-01-01`
  pub created: Option<String>,
  pub head_sha: Option<String>,
  pub exclude_pull_requests: Option<bool>,
  pub pagination: Pagination,
}

impl ListRunsOptions {
  fn query(&self) -> Query {
    Query::new()
      .push_opt("actor", self.actor.as_deref())
      .push_opt("branch", self.branch.as_deref())
      .push_opt("event", self.event.as_deref())
      .push_opt("status", self.status.as_deref())
      .push_opt("created", self.created.as_deref())
      .push_opt("head_sha", self.head_sha.as_deref())
      .push_opt("exclude_pull_requests", self.exclude_pull_requests)
      .pagination(&self.pagination)
  }
}

/// Filters for listing the jobs of a run
#[derive(Debug, Clone, Default)]
pub struct ListJobsOptions {
  /// `latest` (default upstream) or `all` attempts
  pub filter: Option<String>,
  pub pagination: Pagination,
}

/// Body for approving or rejecting pending deployments
#[derive(Debug, Clone, Serialize)]
pub struct ReviewPendingDeploymentsParams {
  pub environment_ids: Vec<u64>,
  pub state: ApprovalState,
  pub comment: String,
}

/// Workflow run endpoints
#[derive(Clone, Copy)]
pub struct WorkflowRunsManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> WorkflowRunsManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  /// List workflow runs for a repository
  #[instrument(skip(self), level = "debug")]
  pub fn list(&self, repo: &RepoRef, options: &ListRunsOptions) -> ApiResult<ApiResponse<Page<WorkflowRun>>> {
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "actions", "runs"]).with_query(options.query());
    self.client.fetch(request, map_entity::<Page<WorkflowRun>>)
  }

  /// List the runs of a single workflow
  #[instrument(skip(self, workflow), level = "debug")]
  pub fn list_for_workflow(
    &self,
    repo: &RepoRef,
    workflow: impl Into<WorkflowRef>,
    options: &ListRunsOptions,
  ) -> ApiResult<ApiResponse<Page<WorkflowRun>>> {
    let workflow = workflow.into().segment();
    let request = ApiRequest::get(&[
      "repos",
      &repo.owner,
      &repo.name,
      "actions",
      "workflows",
      &workflow,
      "runs",
    ])
    .with_query(options.query());
    self.client.fetch(request, map_entity::<Page<WorkflowRun>>)
  }

  #[instrument(skip(self, run), level = "debug")]
  pub fn get(&self, repo: &RepoRef, run: impl Into<RunId>) -> ApiResult<ApiResponse<WorkflowRun>> {
    self.client.fetch(run_request(Method::GET, repo, run.into(), &[]), map_entity::<WorkflowRun>)
  }

  /// Billable time of a run, by runner environment
  #[instrument(skip(self, run), level = "debug")]
  pub fn usage(&self, repo: &RepoRef, run: impl Into<RunId>) -> ApiResult<ApiResponse<WorkflowRunUsage>> {
    self
      .client
      .fetch(run_request(Method::GET, repo, run.into(), &["timing"]), map_entity::<WorkflowRunUsage>)
  }

  /// List the jobs of a run; each job's steps keep execution order
  #[instrument(skip(self, run), level = "debug")]
  pub fn list_jobs(
    &self,
    repo: &RepoRef,
    run: impl Into<RunId>,
    options: &ListJobsOptions,
  ) -> ApiResult<ApiResponse<Page<Job>>> {
    let query = Query::new()
      .push_opt("filter", options.filter.as_deref())
      .pagination(&options.pagination);
    let request = run_request(Method::GET, repo, run.into(), &["jobs"]).with_query(query);
    self.client.fetch(request, map_entity::<Page<Job>>)
  }

  /// Deployments of a run waiting on environment reviewers
  #[instrument(skip(self, run), level = "debug")]
  pub fn pending_deployments(
    &self,
    repo: &RepoRef,
    run: impl Into<RunId>,
  ) -> ApiResult<ApiResponse<Vec<PendingDeployment>>> {
    self.client.fetch(
      run_request(Method::GET, repo, run.into(), &["pending_deployments"]),
      map_list::<PendingDeployment>,
    )
  }

  /// Approve or reject pending deployments
  #[instrument(skip(self, run), level = "debug")]
  pub fn review_pending_deployments(
    &self,
    repo: &RepoRef,
    run: impl Into<RunId>,
    params: &ReviewPendingDeploymentsParams,
  ) -> ApiResult<ApiResponse<Vec<Deployment>>> {
    let request = run_request(Method::POST, repo, run.into(), &["pending_deployments"]);
    self.client.fetch_json(request, params, map_list::<Deployment>)
  }

  /// Review history of a run's deployments
  #[instrument(skip(self, run), level = "debug")]
  pub fn approvals(&self, repo: &RepoRef, run: impl Into<RunId>) -> ApiResult<ApiResponse<Vec<EnvironmentApproval>>> {
    self
      .client
      .fetch(run_request(Method::GET, repo, run.into(), &["approvals"]), map_list::<EnvironmentApproval>)
  }

  /// Approve a run from a first-time contributor's fork
  #[instrument(skip(self, run), level = "debug")]
  pub fn approve(&self, repo: &RepoRef, run: impl Into<RunId>) -> ActionOutcome {
    self.action(repo, run.into(), "approve", &[201])
  }

  #[instrument(skip(self, run), level = "debug")]
  pub fn cancel(&self, repo: &RepoRef, run: impl Into<RunId>) -> ActionOutcome {
    self.action(repo, run.into(), "cancel", &[202])
  }

  /// Re-run every job of a run
  #[instrument(skip(self, run), level = "debug")]
  pub fn rerun(&self, repo: &RepoRef, run: impl Into<RunId>) -> ActionOutcome {
    self.action(repo, run.into(), "rerun", &[201])
  }

  #[instrument(skip(self, run), level = "debug")]
  pub fn rerun_failed_jobs(&self, repo: &RepoRef, run: impl Into<RunId>) -> ActionOutcome {
    self.action(repo, run.into(), "rerun-failed-jobs", &[201])
  }

  #[instrument(skip(self, run), level = "debug")]
  pub fn delete(&self, repo: &RepoRef, run: impl Into<RunId>) -> ActionOutcome {
    let request = run_request(Method::DELETE, repo, run.into(), &[]);
    self.client.perform(request, &[204])
  }

  #[instrument(skip(self, run), level = "debug")]
  pub fn delete_logs(&self, repo: &RepoRef, run: impl Into<RunId>) -> ActionOutcome {
    let request = run_request(Method::DELETE, repo, run.into(), &["logs"]);
    self.client.perform(request, &[204])
  }

  fn action(&self, repo: &RepoRef, run: RunId, action: &str, expected: &[u16]) -> ActionOutcome {
    info!("Requesting {} for run {} in {}", action, run, repo);
    let request = run_request(Method::POST, repo, run, &[action]);
    self.client.perform(request, expected)
  }
}

/// `/repos/{owner}/{repo}/actions/runs/{run}/{rest...}`
fn run_request(method: Method, repo: &RepoRef, run: RunId, rest: &[&str]) -> ApiRequest {
  let run = run.segment();
  let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str(), "actions", "runs", run.as_str()];
  segments.extend_from_slice(rest);
  ApiRequest::new(method, &segments)
}
