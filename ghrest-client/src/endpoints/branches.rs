use ghrest_core::{map_entity, map_list};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{BranchName, RepoRef};
use crate::models::{Branch, MergeUpstreamResult};
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

/// Filters for listing branches
#[derive(Debug, Clone, Default)]
pub struct ListBranchesOptions {
  /// `Some(true)` for protected branches only, `Some(false)` for unprotected
  pub protected: Option<bool>,
  pub pagination: Pagination,
}

#[derive(Serialize)]
struct RenameBranch<'a> {
  new_name: &'a str,
}

#[derive(Serialize)]
struct MergeUpstream<'a> {
  branch: &'a str,
}

/// Branch endpoints
#[derive(Clone, Copy)]
pub struct BranchesManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> BranchesManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  /// List branches. Listed branches carry only the commit SHA and URL.
  #[instrument(skip(self), level = "debug")]
  pub fn list(&self, repo: &RepoRef, options: &ListBranchesOptions) -> ApiResult<ApiResponse<Vec<Branch>>> {
    let query = Query::new()
      .push_opt("protected", options.protected)
      .pagination(&options.pagination);
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "branches"]).with_query(query);
    self.client.fetch(request, map_list::<Branch>)
  }

  #[instrument(skip(self, branch), level = "debug")]
  pub fn get(&self, repo: &RepoRef, branch: impl Into<BranchName>) -> ApiResult<ApiResponse<Branch>> {
    let branch = branch.into();
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "branches", branch.as_str()]);
    self.client.fetch(request, map_entity::<Branch>)
  }

  /// Rename a branch; returns the branch under its new name
  #[instrument(skip(self, branch), level = "debug")]
  pub fn rename(&self, repo: &RepoRef, branch: impl Into<BranchName>, new_name: &str) -> ApiResult<ApiResponse<Branch>> {
    let branch = branch.into();
    info!("Renaming branch {} to {} in {}", branch, new_name, repo);
    let request = ApiRequest::post(&["repos", &repo.owner, &repo.name, "branches", branch.as_str(), "rename"]);
    self
      .client
      .fetch_json(request, &RenameBranch { new_name }, map_entity::<Branch>)
  }

  /// Sync a fork branch with its upstream repository
  #[instrument(skip(self, branch), level = "debug")]
  pub fn sync_with_upstream(
    &self,
    repo: &RepoRef,
    branch: impl Into<BranchName>,
  ) -> ApiResult<ApiResponse<MergeUpstreamResult>> {
    let branch = branch.into();
    let request = ApiRequest::post(&["repos", &repo.owner, &repo.name, "merge-upstream"]);
    self.client.fetch_json(
      request,
      &MergeUpstream {
        branch: branch.as_str(),
      },
      map_entity::<MergeUpstreamResult>,
    )
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

  fn repo() -> RepoRef {
    RepoRef::new("octocat", "Hello-World")
  }

  #[test]
  fn test_list_protected_branches() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/branches"))
        .and(query_param("protected", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
          "name": "master",
          "commit": {"sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc", "url": "https://api.github.com/repos/octocat/Hello-World/commits/c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc"},
          "protected": true
        }]))),
    );

    let options = ListBranchesOptions {
      protected: Some(true),
      ..ListBranchesOptions::default()
    };
    let branches = client_for(&server)
      .branches()
      .list(&repo(), &options)
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(branches[0].name, "master");
    assert!(branches[0].protected);
    assert_eq!(branches[0].commit.commit, None);
    assert_eq!(branches[0].protection, None);
  }

  #[test]
  fn test_get_branch_keeps_nested_commit() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/branches/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::branch("main", "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d"))),
    );

    let branch = client_for(&server)
      .branches()
      .get(&repo(), "main")
      .unwrap()
      .into_object()
      .unwrap();
    let detail = branch.commit.commit.as_ref().unwrap();
    assert_eq!(detail.summary(), "Fix all the bugs");
    assert_eq!(branch.protection.unwrap().required_status_checks.contexts, vec!["ci"]);
  }

  #[test]
  fn test_rename_branch() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("POST"))
        .and(path("/repos/octocat/Hello-World/branches/master/rename"))
        .and(body_json(json!({"new_name": "main"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixtures::branch("main", "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d"))),
    );

    let renamed = client_for(&server)
      .branches()
      .rename(&repo(), "master", "main")
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(renamed.name, "main");
  }

  #[test]
  fn test_sync_with_upstream() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("POST"))
        .and(path("/repos/octocat/Hello-World/merge-upstream"))
        .and(body_json(json!({"branch": "main"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "message": "Successfully fetched and fast-forwarded from upstream defunkt:main",
          "merge_type": "fast-forward",
          "base_branch": "defunkt:main"
        }))),
    );
    server.mount(
      Mock::given(method("POST"))
        .and(path("/repos/octocat/Hello-World/merge-upstream"))
        .and(body_json(json!({"branch": "conflicted"})))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "There are merge conflicts"}))),
    );

    let client = client_for(&server);
    let result = client
      .branches()
      .sync_with_upstream(&repo(), "main")
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(result.merge_type, "fast-forward");

    let error = client.branches().sync_with_upstream(&repo(), "conflicted").unwrap_err();
    assert!(matches!(error, ApiError::Status { status: 409, .. }));
  }
}
