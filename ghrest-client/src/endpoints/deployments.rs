//! # Deployment and Environment Endpoints

use ghrest_core::{Page, map_entity, map_list};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{DeploymentId, EnvironmentName, RepoRef};
use crate::models::{Deployment, DeploymentStatus, Environment};
use crate::outcome::ActionOutcome;
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

/// Filters for listing deployments
#[derive(Debug, Clone, Default)]
pub struct ListDeploymentsOptions {
  pub sha: Option<String>,
  pub git_ref: Option<String>,
  pub task: Option<String>,
  pub environment: Option<String>,
  pub pagination: Pagination,
}

/// Body for creating a deployment
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDeploymentParams {
  /// Branch, tag or SHA to deploy
  #[serde(rename = "ref")]
  pub git_ref: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub task: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub auto_merge: Option<bool>,
  /// Status contexts to verify; an empty list skips the checks
  #[serde(skip_serializing_if = "Option::is_none")]
  pub required_contexts: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub payload: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub environment: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub transient_environment: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub production_environment: Option<bool>,
}

impl CreateDeploymentParams {
  pub fn new(git_ref: impl Into<String>) -> Self {
    Self {
      git_ref: git_ref.into(),
      ..Self::default()
    }
  }
}

/// Body for creating a deployment status
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDeploymentStatusParams {
  /// `error`, `failure`, `inactive`, `in_progress`, `queued`, `pending` or
  /// `success`
  pub state: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub log_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub environment: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub environment_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub auto_inactive: Option<bool>,
}

impl CreateDeploymentStatusParams {
  pub fn new(state: impl Into<String>) -> Self {
    Self {
      state: state.into(),
      ..Self::default()
    }
  }
}

/// Deployment endpoints
#[derive(Clone, Copy)]
pub struct DeploymentsManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> DeploymentsManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  #[instrument(skip(self), level = "debug")]
  pub fn list(&self, repo: &RepoRef, options: &ListDeploymentsOptions) -> ApiResult<ApiResponse<Vec<Deployment>>> {
    let query = Query::new()
      .push_opt("sha", options.sha.as_deref())
      .push_opt("ref", options.git_ref.as_deref())
      .push_opt("task", options.task.as_deref())
      .push_opt("environment", options.environment.as_deref())
      .pagination(&options.pagination);
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "deployments"]).with_query(query);
    self.client.fetch(request, map_list::<Deployment>)
  }

  #[instrument(skip(self, deployment), level = "debug")]
  pub fn get(&self, repo: &RepoRef, deployment: impl Into<DeploymentId>) -> ApiResult<ApiResponse<Deployment>> {
    let deployment = deployment.into().segment();
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "deployments", &deployment]);
    self.client.fetch(request, map_entity::<Deployment>)
  }

  #[instrument(skip(self), level = "debug")]
  pub fn create(&self, repo: &RepoRef, params: &CreateDeploymentParams) -> ApiResult<ApiResponse<Deployment>> {
    info!("Creating deployment of {} in {}", params.git_ref, repo);
    let request = ApiRequest::post(&["repos", &repo.owner, &repo.name, "deployments"]);
    self.client.fetch_json(request, params, map_entity::<Deployment>)
  }

  /// Delete an inactive deployment
  #[instrument(skip(self, deployment), level = "debug")]
  pub fn delete(&self, repo: &RepoRef, deployment: impl Into<DeploymentId>) -> ActionOutcome {
    let deployment = deployment.into().segment();
    let request = ApiRequest::delete(&["repos", &repo.owner, &repo.name, "deployments", &deployment]);
    self.client.perform(request, &[204])
  }

  #[instrument(skip(self, deployment), level = "debug")]
  pub fn list_statuses(
    &self,
    repo: &RepoRef,
    deployment: impl Into<DeploymentId>,
    pagination: Pagination,
  ) -> ApiResult<ApiResponse<Vec<DeploymentStatus>>> {
    let deployment = deployment.into().segment();
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "deployments", &deployment, "statuses"])
      .with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_list::<DeploymentStatus>)
  }

  #[instrument(skip(self, deployment), level = "debug")]
  pub fn create_status(
    &self,
    repo: &RepoRef,
    deployment: impl Into<DeploymentId>,
    params: &CreateDeploymentStatusParams,
  ) -> ApiResult<ApiResponse<DeploymentStatus>> {
    let deployment = deployment.into().segment();
    let request = ApiRequest::post(&["repos", &repo.owner, &repo.name, "deployments", &deployment, "statuses"]);
    self.client.fetch_json(request, params, map_entity::<DeploymentStatus>)
  }

  /// List deployment environments with their protection rules
  #[instrument(skip(self), level = "debug")]
  pub fn list_environments(&self, repo: &RepoRef, pagination: Pagination) -> ApiResult<ApiResponse<Page<Environment>>> {
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "environments"])
      .with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_entity::<Page<Environment>>)
  }

  #[instrument(skip(self, environment), level = "debug")]
  pub fn get_environment(
    &self,
    repo: &RepoRef,
    environment: impl Into<EnvironmentName>,
  ) -> ApiResult<ApiResponse<Environment>> {
    let environment = environment.into();
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "environments", environment.as_str()]);
    self.client.fetch(request, map_entity::<Environment>)
  }
}

#[cfg(test)]
mod tests {
  use ghrest_test_utils::{MockGitHub, fixtures};
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path, query_param};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;
  use crate::client::tests::client_for;
  use crate::error::ApiError;
  use crate::models::ProtectionRule;

  fn repo() -> RepoRef {
    RepoRef::new("octocat", "example")
  }

  #[test]
  fn test_list_deployments_filters_by_environment() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octocat/example/deployments"))
        .and(query_param("environment", "production"))
        .and(query_param("ref", "topic-branch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::deployment(1, "production")]))),
    );

    let options = ListDeploymentsOptions {
      environment: Some("production".to_string()),
      git_ref: Some("topic-branch".to_string()),
      ..ListDeploymentsOptions::default()
    };
    let deployments = client_for(&server)
      .deployments()
      .list(&repo(), &options)
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(deployments.len(), 1);
    assert_eq!(deployments[0].payload, json!({"deploy": "migrate"}));
  }

  #[test]
  fn test_create_deployment_sends_only_set_fields() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("POST"))
        .and(path("/repos/octocat/example/deployments"))
        .and(body_json(json!({
          "ref": "topic-branch",
          "required_contexts": [],
          "payload": {"deploy": "migrate"},
          "environment": "production"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixtures::deployment(1, "production"))),
    );

    let params = CreateDeploymentParams {
      required_contexts: Some(Vec::new()),
      payload: Some(json!({"deploy": "migrate"})),
      environment: Some("production".to_string()),
      ..CreateDeploymentParams::new("topic-branch")
    };
    let response = client_for(&server).deployments().create(&repo(), &params).unwrap();
    assert_eq!(response.status(), 201);
    assert_eq!(response.into_object().unwrap().git_ref, "topic-branch");
  }

  #[test]
  fn test_create_deployment_conflict_is_an_error() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("POST"))
        .and(path("/repos/octocat/example/deployments"))
        .respond_with(
          ResponseTemplate::new(409).set_body_json(json!({"message": "Conflict merging main into topic-branch."})),
        ),
    );

    let error = client_for(&server)
      .deployments()
      .create(&repo(), &CreateDeploymentParams::new("topic-branch"))
      .unwrap_err();
    assert_eq!(error.status(), Some(409));
    assert!(matches!(error, ApiError::Status { ref message, .. } if message.starts_with("Conflict")));
  }

  #[test]
  fn test_delete_active_deployment_fails() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("DELETE"))
        .and(path("/repos/octocat/example/deployments/1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "We cannot delete an active deployment unless it is the only deployment in a given environment."}))),
    );

    let client = client_for(&server);
    assert!(!bool::from(client.deployments().delete(&repo(), 1)));
    assert!(client.last_error_body().unwrap().contains("active deployment"));
  }

  #[test]
  fn test_statuses() {
    let server = MockGitHub::start();
    let status = json!({
      "id": 1,
      "state": "success",
      "creator": fixtures::user("octocat", 1),
      "description": "Deployment finished successfully.",
      "environment": "production",
      "environment_url": "https://test-branch.lab.acme.com"
    });
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octocat/example/deployments/1/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([status.clone()]))),
    );
    server.mount(
      Mock::given(method("POST"))
        .and(path("/repos/octocat/example/deployments/1/statuses"))
        .and(body_json(json!({"state": "success", "environment_url": "https://test-branch.lab.acme.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(status)),
    );

    let client = client_for(&server);
    let statuses = client
      .deployments()
      .list_statuses(&repo(), 1, Pagination::default())
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(statuses[0].state, "success");

    let params = CreateDeploymentStatusParams {
      environment_url: Some("https://test-branch.lab.acme.com".to_string()),
      ..CreateDeploymentStatusParams::new("success")
    };
    let created = client
      .deployments()
      .create_status(&repo(), 1, &params)
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(created.creator.map(|creator| creator.login), Some("octocat".to_string()));
  }

  #[test]
  fn test_environments_with_protection_rules() {
    let server = MockGitHub::start();
    let environment = json!({
      "id": 161088068,
      "name": "staging",
      "protection_rules": [
        {"id": 3736, "type": "wait_timer", "wait_timer": 30},
        {"id": 3755, "type": "required_reviewers", "prevent_self_review": false, "reviewers": [
          {"type": "User", "reviewer": fixtures::user("octocat", 1)},
          {"type": "Team", "reviewer": fixtures::team("justice-league", 1)}
        ]},
        {"id": 3756, "type": "branch_policy"}
      ],
      "deployment_branch_policy": {"protected_branches": false, "custom_branch_policies": true}
    });
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octocat/example/environments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_count": 1, "environments": [environment.clone()]}))),
    );
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octocat/example/environments/staging"))
        .respond_with(ResponseTemplate::new(200).set_body_json(environment)),
    );

    let client = client_for(&server);
    let page = client
      .deployments()
      .list_environments(&repo(), Pagination::default())
      .unwrap()
      .into_object()
      .unwrap();
    let staging = &page.items[0];
    assert!(matches!(staging.protection_rules[0], ProtectionRule::WaitTimer { wait_timer: 30, .. }));
    assert_eq!(staging.required_reviewers().count(), 2);

    let fetched = client
      .deployments()
      .get_environment(&repo(), staging)
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(&fetched, staging);
  }
}
