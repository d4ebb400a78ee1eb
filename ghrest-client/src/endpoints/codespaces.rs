//! # Codespaces Endpoints

use ghrest_core::{Page, map_entity};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{CodespaceName, RepoRef};
use crate::models::Codespace;
use crate::outcome::ActionOutcome;
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

/// Body for creating a codespace in a repository. Unset fields fall back to
/// the repository's defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCodespaceParams {
  #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
  pub git_ref: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  /// Machine type name, such as `standardLinux32gb`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub machine: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub devcontainer_path: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub idle_timeout_minutes: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub retention_period_minutes: Option<u32>,
}

/// Codespaces endpoints for the authenticated user
#[derive(Clone, Copy)]
pub struct CodespacesManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> CodespacesManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  #[instrument(skip(self), level = "debug")]
  pub fn list(&self, pagination: Pagination) -> ApiResult<ApiResponse<Page<Codespace>>> {
    let request = ApiRequest::get(&["user", "codespaces"]).with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_entity::<Page<Codespace>>)
  }

  /// Codespaces of the authenticated user in one repository
  #[instrument(skip(self), level = "debug")]
  pub fn list_for_repository(
    &self,
    repo: &RepoRef,
    pagination: Pagination,
  ) -> ApiResult<ApiResponse<Page<Codespace>>> {
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "codespaces"])
      .with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_entity::<Page<Codespace>>)
  }

  #[instrument(skip_all, level = "debug")]
  pub fn get(&self, codespace: impl Into<CodespaceName>) -> ApiResult<ApiResponse<Codespace>> {
    let codespace = codespace.into();
    let request = ApiRequest::get(&["user", "codespaces", codespace.as_str()]);
    self.client.fetch(request, map_entity::<Codespace>)
  }

  #[instrument(skip(self), level = "debug")]
  pub fn create_for_repository(
    &self,
    repo: &RepoRef,
    params: &CreateCodespaceParams,
  ) -> ApiResult<ApiResponse<Codespace>> {
    info!("Creating codespace in {}", repo);
    let request = ApiRequest::post(&["repos", &repo.owner, &repo.name, "codespaces"]);
    self.client.fetch_json(request, params, map_entity::<Codespace>)
  }

  #[instrument(skip_all, level = "debug")]
  pub fn start(&self, codespace: impl Into<CodespaceName>) -> ApiResult<ApiResponse<Codespace>> {
    self.transition(codespace.into(), "start")
  }

  #[instrument(skip_all, level = "debug")]
  pub fn stop(&self, codespace: impl Into<CodespaceName>) -> ApiResult<ApiResponse<Codespace>> {
    self.transition(codespace.into(), "stop")
  }

  /// Delete a codespace. Deletion completes asynchronously.
  #[instrument(skip_all, level = "debug")]
  pub fn delete(&self, codespace: impl Into<CodespaceName>) -> ActionOutcome {
    let codespace = codespace.into();
    info!("Deleting codespace {}", codespace);
    self
      .client
      .perform(ApiRequest::delete(&["user", "codespaces", codespace.as_str()]), &[202])
  }

  fn transition(&self, codespace: CodespaceName, action: &str) -> ApiResult<ApiResponse<Codespace>> {
    info!("Requesting {} for codespace {}", action, codespace);
    let request = ApiRequest::post(&["user", "codespaces", codespace.as_str(), action]);
    self.client.fetch(request, map_entity::<Codespace>)
  }
}

#[cfg(test)]
mod tests {
  use ghrest_test_utils::{MockGitHub, fixtures};
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;
  use crate::client::tests::client_for;
  use crate::error::ApiError;

  const NAME: &str = "monalisa-octocat-hello-world-g4wpq6h95q";

  #[test]
  fn test_list_codespaces() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/user/codespaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "total_count": 2,
          "codespaces": [fixtures::codespace(1, NAME), fixtures::codespace(2, "second")]
        }))),
    );

    let page = client_for(&server)
      .codespaces()
      .list(Pagination::default())
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.items[0].machine.as_ref().map(|m| m.cpus), Some(8));
    assert_eq!(page.items[0].git_status.git_ref, "main");
  }

  #[test]
  fn test_list_for_repository() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/codespaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_count": 0, "codespaces": []}))),
    );

    let page = client_for(&server)
      .codespaces()
      .list_for_repository(&RepoRef::new("octocat", "Hello-World"), Pagination::default())
      .unwrap()
      .into_object()
      .unwrap();
    assert!(page.is_empty());
  }

  #[test]
  fn test_create_for_repository() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("POST"))
        .and(path("/repos/octocat/Hello-World/codespaces"))
        .and(body_json(json!({"ref": "main", "machine": "standardLinux"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixtures::codespace(1, NAME))),
    );

    let params = CreateCodespaceParams {
      git_ref: Some("main".to_string()),
      machine: Some("standardLinux".to_string()),
      ..CreateCodespaceParams::default()
    };
    let codespace = client_for(&server)
      .codespaces()
      .create_for_repository(&RepoRef::new("octocat", "Hello-World"), &params)
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(codespace.name, NAME);
  }

  #[test]
  fn test_start_stop_and_delete() {
    let server = MockGitHub::start();
    let mut shutdown = fixtures::codespace(1, NAME);
    shutdown["state"] = json!("Shutdown");
    server.mount(
      Mock::given(method("GET"))
        .and(path(format!("/user/codespaces/{NAME}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::codespace(1, NAME))),
    );
    server.mount(
      Mock::given(method("POST"))
        .and(path(format!("/user/codespaces/{NAME}/stop")))
        .respond_with(ResponseTemplate::new(200).set_body_json(shutdown)),
    );
    server.mount(
      Mock::given(method("POST"))
        .and(path(format!("/user/codespaces/{NAME}/start")))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({"message": "Payment required"}))),
    );
    server.mount(
      Mock::given(method("DELETE"))
        .and(path(format!("/user/codespaces/{NAME}")))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({}))),
    );

    let client = client_for(&server);
    let codespace = client.codespaces().get(NAME).unwrap().into_object().unwrap();
    assert_eq!(codespace.state, "Available");

    let stopped = client.codespaces().stop(&codespace).unwrap().into_object().unwrap();
    assert_eq!(stopped.state, "Shutdown");

    let error = client.codespaces().start(&codespace).unwrap_err();
    assert!(matches!(error, ApiError::Status { status: 402, .. }));

    assert_eq!(client.codespaces().delete(&codespace).status(), Some(202));
  }
}
