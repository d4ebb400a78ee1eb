use ghrest_core::{map_entity, map_list};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{IssueNumber, RepoRef, Username};
use crate::models::{Issue, User};
use crate::outcome::ActionOutcome;
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

#[derive(Serialize)]
struct Assignees<'a> {
  assignees: &'a [&'a str],
}

/// Issue assignee endpoints
#[derive(Clone, Copy)]
pub struct AssigneesManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> AssigneesManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  /// Users that issues in the repository can be assigned to
  #[instrument(skip(self), level = "debug")]
  pub fn list(&self, repo: &RepoRef, pagination: Pagination) -> ApiResult<ApiResponse<Vec<User>>> {
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "assignees"])
      .with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_list::<User>)
  }

  /// Succeeds with 204 when the user can be assigned; GitHub answers 404
  /// otherwise
  #[instrument(skip(self, user), level = "debug")]
  pub fn check(&self, repo: &RepoRef, user: impl Into<Username>) -> ActionOutcome {
    let user = user.into();
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "assignees", user.as_str()]);
    self.client.check(request, &[204])
  }

  /// Whether the user can be assigned to one specific issue
  #[instrument(skip(self, issue, user), level = "debug")]
  pub fn check_for_issue(
    &self,
    repo: &RepoRef,
    issue: impl Into<IssueNumber>,
    user: impl Into<Username>,
  ) -> ActionOutcome {
    let issue = issue.into().segment();
    let user = user.into();
    let request = ApiRequest::get(&[
      "repos",
      &repo.owner,
      &repo.name,
      "issues",
      &issue,
      "assignees",
      user.as_str(),
    ]);
    self.client.check(request, &[204])
  }

  /// Add assignees; users that cannot be assigned are silently ignored by
  /// GitHub
  #[instrument(skip(self, issue), level = "debug")]
  pub fn add(&self, repo: &RepoRef, issue: impl Into<IssueNumber>, logins: &[&str]) -> ApiResult<ApiResponse<Issue>> {
    let issue = issue.into().segment();
    info!("Assigning {:?} to issue #{} in {}", logins, issue, repo);
    let request = ApiRequest::post(&["repos", &repo.owner, &repo.name, "issues", &issue, "assignees"]);
    self
      .client
      .fetch_json(request, &Assignees { assignees: logins }, map_entity::<Issue>)
  }

  #[instrument(skip(self, issue), level = "debug")]
  pub fn remove(
    &self,
    repo: &RepoRef,
    issue: impl Into<IssueNumber>,
    logins: &[&str],
  ) -> ApiResult<ApiResponse<Issue>> {
    let issue = issue.into().segment();
    info!("Unassigning {:?} from issue #{} in {}", logins, issue, repo);
    let request = ApiRequest::delete(&["repos", &repo.owner, &repo.name, "issues", &issue, "assignees"]);
    self
      .client
      .fetch_json(request, &Assignees { assignees: logins }, map_entity::<Issue>)
  }
}
