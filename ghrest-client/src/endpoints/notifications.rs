//! # Notification Endpoints
//!
//! Inbox listing, read markers and per-thread subscriptions.

use ghrest_core::{map_entity, map_list};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{RepoRef, ThreadId};
use crate::models::{Notification, ThreadSubscription};
use crate::outcome::ActionOutcome;
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

/// Filters for listing notifications
#[derive(Debug, Clone, Default)]
pub struct ListNotificationsOptions {
  /// Include notifications already marked as read
  pub all: bool,
  /// Only notifications where the user is directly participating or mentioned
  pub participating: bool,
  /// ISO 8601 timestamp; only notifications updated after it
  pub since: Option<String>,
  /// ISO 8601 timestamp; only notifications updated before it
  pub before: Option<String>,
  pub pagination: Pagination,
}

impl ListNotificationsOptions {
  fn query(&self) -> Query {
    Query::new()
      .push_opt("all", self.all.then_some(true))
      .push_opt("participating", self.participating.then_some(true))
      .push_opt("since", self.since.as_deref())
      .push_opt("before", self.before.as_deref())
      .pagination(&self.pagination)
  }
}

#[derive(Serialize)]
struct MarkRead<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  last_read_at: Option<&'a str>,
}

#[derive(Serialize)]
struct SetSubscription {
  ignored: bool,
}

/// Notification endpoints for the authenticated user
#[derive(Clone, Copy)]
pub struct NotificationsManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> NotificationsManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  #[instrument(skip(self), level = "debug")]
  pub fn list(&self, options: &ListNotificationsOptions) -> ApiResult<ApiResponse<Vec<Notification>>> {
    let request = ApiRequest::get(&["notifications"]).with_query(options.query());
    self.client.fetch(request, map_list::<Notification>)
  }

  #[instrument(skip(self), level = "debug")]
  pub fn list_for_repository(
    &self,
    repo: &RepoRef,
    options: &ListNotificationsOptions,
  ) -> ApiResult<ApiResponse<Vec<Notification>>> {
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "notifications"]).with_query(options.query());
    self.client.fetch(request, map_list::<Notification>)
  }

  #[instrument(skip_all, level = "debug")]
  pub fn get_thread(&self, thread: impl Into<ThreadId>) -> ApiResult<ApiResponse<Notification>> {
    let thread = thread.into();
    let request = ApiRequest::get(&["notifications", "threads", thread.as_str()]);
    self.client.fetch(request, map_entity::<Notification>)
  }

  /// Mark every notification as read, optionally only those updated before
  /// `last_read_at`. GitHub answers 202 when it finishes the work
  /// asynchronously.
  #[instrument(skip(self), level = "debug")]
  pub fn mark_as_read(&self, last_read_at: Option<&str>) -> ActionOutcome {
    info!("Marking notifications as read");
    let request = ApiRequest::put(&["notifications"]);
    self.client.perform_json(request, &MarkRead { last_read_at }, &[202, 205])
  }

  #[instrument(skip(self), level = "debug")]
  pub fn mark_repository_as_read(&self, repo: &RepoRef, last_read_at: Option<&str>) -> ActionOutcome {
    info!("Marking notifications in {} as read", repo);
    let request = ApiRequest::put(&["repos", &repo.owner, &repo.name, "notifications"]);
    self.client.perform_json(request, &MarkRead { last_read_at }, &[202, 205])
  }

  #[instrument(skip_all, level = "debug")]
  pub fn mark_thread_as_read(&self, thread: impl Into<ThreadId>) -> ActionOutcome {
    let thread = thread.into();
    let request = ApiRequest::patch(&["notifications", "threads", thread.as_str()]);
    self.client.perform(request, &[205])
  }

  /// Mark a thread as done, removing it from the inbox
  #[instrument(skip_all, level = "debug")]
  pub fn mark_thread_as_done(&self, thread: impl Into<ThreadId>) -> ActionOutcome {
    let thread = thread.into();
    let request = ApiRequest::delete(&["notifications", "threads", thread.as_str()]);
    self.client.perform(request, &[204])
  }

  #[instrument(skip_all, level = "debug")]
  pub fn get_thread_subscription(&self, thread: impl Into<ThreadId>) -> ApiResult<ApiResponse<ThreadSubscription>> {
    let thread = thread.into();
    let request = ApiRequest::get(&["notifications", "threads", thread.as_str(), "subscription"]);
    self.client.fetch(request, map_entity::<ThreadSubscription>)
  }

  /// Subscribe to a thread, or mute it with `ignored`
  #[instrument(skip(self, thread), level = "debug")]
  pub fn set_thread_subscription(
    &self,
    thread: impl Into<ThreadId>,
    ignored: bool,
  ) -> ApiResult<ApiResponse<ThreadSubscription>> {
    let thread = thread.into();
    let request = ApiRequest::put(&["notifications", "threads", thread.as_str(), "subscription"]);
    self
      .client
      .fetch_json(request, &SetSubscription { ignored }, map_entity::<ThreadSubscription>)
  }

  #[instrument(skip_all, level = "debug")]
  pub fn delete_thread_subscription(&self, thread: impl Into<ThreadId>) -> ActionOutcome {
    let thread = thread.into();
    let request = ApiRequest::delete(&["notifications", "threads", thread.as_str(), "subscription"]);
    self.client.perform(request, &[204])
  }
}
