//! # GitHub Actions Workflow Endpoints

use std::collections::BTreeMap;

use ghrest_core::{Page, map_entity};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{RepoRef, WorkflowRef};
use crate::models::{Workflow, WorkflowUsage};
use crate::outcome::ActionOutcome;
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

/// Body of a `workflow_dispatch` trigger
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchWorkflowParams {
  /// Branch or tag to run the workflow on
  #[serde(rename = "ref")]
  pub git_ref: String,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub inputs: BTreeMap<String, String>,
}

impl DispatchWorkflowParams {
  pub fn new(git_ref: impl Into<String>) -> Self {
    Self {
      git_ref: git_ref.into(),
      inputs: BTreeMap::new(),
    }
  }

  #[must_use]
  pub fn input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.inputs.insert(name.into(), value.into());
    self
  }
}

/// Workflow definition endpoints
#[derive(Clone, Copy)]
pub struct WorkflowsManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> WorkflowsManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  /// List the workflows of a repository
  #[instrument(skip(self), level = "debug")]
  pub fn list(&self, repo: &RepoRef, pagination: Pagination) -> ApiResult<ApiResponse<Page<Workflow>>> {
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "actions", "workflows"])
      .with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_entity::<Page<Workflow>>)
  }

  #[instrument(skip(self, workflow), level = "debug")]
  pub fn get(&self, repo: &RepoRef, workflow: impl Into<WorkflowRef>) -> ApiResult<ApiResponse<Workflow>> {
    let workflow = workflow.into().segment();
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "actions", "workflows", &workflow]);
    self.client.fetch(request, map_entity::<Workflow>)
  }

  /// Billable minutes of a workflow in the current billing cycle
  #[instrument(skip(self, workflow), level = "debug")]
  pub fn usage(&self, repo: &RepoRef, workflow: impl Into<WorkflowRef>) -> ApiResult<ApiResponse<WorkflowUsage>> {
    let workflow = workflow.into().segment();
    let request = ApiRequest::get(&[
      "repos",
      &repo.owner,
      &repo.name,
      "actions",
      "workflows",
      &workflow,
      "timing",
    ]);
    self.client.fetch(request, map_entity::<WorkflowUsage>)
  }

  #[instrument(skip(self, workflow), level = "debug")]
  pub fn enable(&self, repo: &RepoRef, workflow: impl Into<WorkflowRef>) -> ActionOutcome {
    self.toggle(repo, &workflow.into(), "enable")
  }

  #[instrument(skip(self, workflow), level = "debug")]
  pub fn disable(&self, repo: &RepoRef, workflow: impl Into<WorkflowRef>) -> ActionOutcome {
    self.toggle(repo, &workflow.into(), "disable")
  }

  /// Trigger a `workflow_dispatch` event
  #[instrument(skip(self, workflow), level = "debug")]
  pub fn dispatch(
    &self,
    repo: &RepoRef,
    workflow: impl Into<WorkflowRef>,
    params: &DispatchWorkflowParams,
  ) -> ActionOutcome {
    let workflow = workflow.into().segment();
    info!("Dispatching workflow {} on {} in {}", workflow, params.git_ref, repo);
    let request = ApiRequest::post(&[
      "repos",
      &repo.owner,
      &repo.name,
      "actions",
      "workflows",
      &workflow,
      "dispatches",
    ]);
    self.client.perform_json(request, params, &[204])
  }

  fn toggle(&self, repo: &RepoRef, workflow: &WorkflowRef, action: &str) -> ActionOutcome {
    let workflow = workflow.segment();
    let request = ApiRequest::put(&["repos", &repo.owner, &repo.name, "actions", "workflows", &workflow, action]);
    self.client.perform(request, &[204])
  }
}

#[cfg(test)]
mod tests {
  use ghrest_test_utils::MockGitHub;
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path, query_param};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;
  use crate::client::tests::client_for;

  fn repo() -> RepoRef {
    RepoRef::new("octo-org", "octo-repo")
  }

  #[test]
  fn test_list_workflows() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octo-org/octo-repo/actions/workflows"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "total_count": 5,
          "workflows": [
            {"id": 161335, "name": "CI", "path": ".github/workflows/blank.yaml", "state": "active"},
            {"id": 269289, "name": "Linter", "path": ".github/workflows/linter.yaml", "state": "disabled_manually"}
          ]
        }))),
    );

    let page = client_for(&server)
      .workflows()
      .list(&repo(), Pagination::per_page(2))
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(page.total_count, 5);
    assert_eq!(page.items[1].state, "disabled_manually");
  }

  #[test]
  fn test_get_workflow_by_file_name() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octo-org/octo-repo/actions/workflows/ci.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 161335, "name": "CI"}))),
    );

    let workflow = client_for(&server)
      .workflows()
      .get(&repo(), "ci.yml")
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(workflow.id, 161335);
  }

  #[test]
  fn test_workflow_usage() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octo-org/octo-repo/actions/workflows/161335/timing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "billable": {"UBUNTU": {"total_ms": 180000}, "MACOS": {"total_ms": 240000}, "WINDOWS": {"total_ms": 300000}}
        }))),
    );

    let usage = client_for(&server)
      .workflows()
      .usage(&repo(), 161335)
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(usage.billable.len(), 3);
    assert_eq!(usage.billable["WINDOWS"].total_ms, 300000);
  }

  #[test]
  fn test_enable_and_disable() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("PUT"))
        .and(path("/repos/octo-org/octo-repo/actions/workflows/161335/enable"))
        .respond_with(ResponseTemplate::new(204)),
    );
    server.mount(
      Mock::given(method("PUT"))
        .and(path("/repos/octo-org/octo-repo/actions/workflows/161335/disable"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Must have admin rights"}))),
    );

    let client = client_for(&server);
    assert!(client.workflows().enable(&repo(), 161335).is_success());

    let outcome = client.workflows().disable(&repo(), 161335);
    let failure = outcome.failure().unwrap();
    assert_eq!(failure.reason, crate::FailureReason::Unauthorized);
    assert_eq!(failure.detail, "Must have admin rights");
  }

  #[test]
  fn test_dispatch_sends_ref_and_inputs() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("POST"))
        .and(path("/repos/octo-org/octo-repo/actions/workflows/deploy.yml/dispatches"))
        .and(body_json(json!({"ref": "main", "inputs": {"environment": "staging"}})))
        .respond_with(ResponseTemplate::new(204)),
    );

    let params = DispatchWorkflowParams::new("main").input("environment", "staging");
    let outcome = client_for(&server).workflows().dispatch(&repo(), "deploy.yml", &params);
    assert_eq!(outcome, ActionOutcome::Succeeded { status: 204 });
  }
}
