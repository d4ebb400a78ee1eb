//! # Repository Webhook Endpoints
//!
//! Hook configuration, test triggers and the delivery log.

use ghrest_core::{map_entity, map_list};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{DeliveryId, HookId, RepoRef};
use crate::models::{HookDelivery, InsecureSsl, Webhook, WebhookConfig};
use crate::outcome::ActionOutcome;
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

/// Delivery settings sent when creating or updating a hook
#[derive(Debug, Clone, Default, Serialize)]
pub struct WebhookConfigParams {
  pub url: String,
  /// `json` or `form`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub secret: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub insecure_ssl: Option<InsecureSsl>,
}

impl WebhookConfigParams {
  pub fn new(url: impl Into<String>) -> Self {
    Self {
      url: url.into(),
      ..Self::default()
    }
  }
}

/// Body for creating a repository webhook
#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhookParams {
  /// Always `web` for repository hooks
  pub name: String,
  pub config: WebhookConfigParams,
  /// Defaults to `["push"]` upstream when empty
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub events: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub active: Option<bool>,
}

impl CreateWebhookParams {
  pub fn new(config: WebhookConfigParams) -> Self {
    Self {
      name: "web".to_string(),
      config,
      events: Vec::new(),
      active: None,
    }
  }

  #[must_use]
  pub fn events<I, S>(mut self, events: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.events = events.into_iter().map(Into::into).collect();
    self
  }
}

/// Body for updating a webhook; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateWebhookParams {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub config: Option<WebhookConfigParams>,
  /// Replaces the event list
  #[serde(skip_serializing_if = "Option::is_none")]
  pub events: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub add_events: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub remove_events: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub active: Option<bool>,
}

/// Repository webhook endpoints
#[derive(Clone, Copy)]
pub struct WebhooksManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> WebhooksManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  #[instrument(skip(self), level = "debug")]
  pub fn list(&self, repo: &RepoRef, pagination: Pagination) -> ApiResult<ApiResponse<Vec<Webhook>>> {
    let request = ApiRequest::get(&["repos", &repo.owner, &repo.name, "hooks"])
      .with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_list::<Webhook>)
  }

  #[instrument(skip(self, hook), level = "debug")]
  pub fn get(&self, repo: &RepoRef, hook: impl Into<HookId>) -> ApiResult<ApiResponse<Webhook>> {
    self.client.fetch(hook_request(ApiRequest::get, repo, hook.into(), &[]), map_entity::<Webhook>)
  }

  #[instrument(skip(self), level = "debug")]
  pub fn create(&self, repo: &RepoRef, params: &CreateWebhookParams) -> ApiResult<ApiResponse<Webhook>> {
    info!("Creating webhook for {} in {}", params.config.url, repo);
    let request = ApiRequest::post(&["repos", &repo.owner, &repo.name, "hooks"]);
    self.client.fetch_json(request, params, map_entity::<Webhook>)
  }

  #[instrument(skip(self, hook), level = "debug")]
  pub fn update(
    &self,
    repo: &RepoRef,
    hook: impl Into<HookId>,
    params: &UpdateWebhookParams,
  ) -> ApiResult<ApiResponse<Webhook>> {
    let request = hook_request(ApiRequest::patch, repo, hook.into(), &[]);
    self.client.fetch_json(request, params, map_entity::<Webhook>)
  }

  #[instrument(skip(self, hook), level = "debug")]
  pub fn delete(&self, repo: &RepoRef, hook: impl Into<HookId>) -> ActionOutcome {
    let hook = hook.into();
    info!("Deleting webhook {} in {}", hook, repo);
    self.client.perform(hook_request(ApiRequest::delete, repo, hook, &[]), &[204])
  }

  /// Send a `ping` event to the hook
  #[instrument(skip(self, hook), level = "debug")]
  pub fn ping(&self, repo: &RepoRef, hook: impl Into<HookId>) -> ActionOutcome {
    self
      .client
      .perform(hook_request(ApiRequest::post, repo, hook.into(), &["pings"]), &[204])
  }

  /// Replay the latest push to the hook. Nothing is sent when the hook is
  /// not subscribed to `push`, but GitHub still answers 204.
  #[instrument(skip(self, hook), level = "debug")]
  pub fn test_push(&self, repo: &RepoRef, hook: impl Into<HookId>) -> ActionOutcome {
    self
      .client
      .perform(hook_request(ApiRequest::post, repo, hook.into(), &["tests"]), &[204])
  }

  #[instrument(skip(self, hook), level = "debug")]
  pub fn get_config(&self, repo: &RepoRef, hook: impl Into<HookId>) -> ApiResult<ApiResponse<WebhookConfig>> {
    self.client.fetch(
      hook_request(ApiRequest::get, repo, hook.into(), &["config"]),
      map_entity::<WebhookConfig>,
    )
  }

  #[instrument(skip(self, hook), level = "debug")]
  pub fn update_config(
    &self,
    repo: &RepoRef,
    hook: impl Into<HookId>,
    params: &WebhookConfigParams,
  ) -> ApiResult<ApiResponse<WebhookConfig>> {
    let request = hook_request(ApiRequest::patch, repo, hook.into(), &["config"]);
    self.client.fetch_json(request, params, map_entity::<WebhookConfig>)
  }

  /// Delivery log of a hook, newest first
  #[instrument(skip(self, hook), level = "debug")]
  pub fn list_deliveries(
    &self,
    repo: &RepoRef,
    hook: impl Into<HookId>,
    pagination: Pagination,
  ) -> ApiResult<ApiResponse<Vec<HookDelivery>>> {
    let request = hook_request(ApiRequest::get, repo, hook.into(), &["deliveries"])
      .with_query(Query::new().push_opt("per_page", pagination.per_page));
    self.client.fetch(request, map_list::<HookDelivery>)
  }

  #[instrument(skip(self, hook, delivery), level = "debug")]
  pub fn get_delivery(
    &self,
    repo: &RepoRef,
    hook: impl Into<HookId>,
    delivery: impl Into<DeliveryId>,
  ) -> ApiResult<ApiResponse<HookDelivery>> {
    let delivery = delivery.into().segment();
    let request = hook_request(ApiRequest::get, repo, hook.into(), &["deliveries", &delivery]);
    self.client.fetch(request, map_entity::<HookDelivery>)
  }

  /// Queue a new delivery attempt
  #[instrument(skip(self, hook, delivery), level = "debug")]
  pub fn redeliver(&self, repo: &RepoRef, hook: impl Into<HookId>, delivery: impl Into<DeliveryId>) -> ActionOutcome {
    let delivery = delivery.into().segment();
    let request = hook_request(ApiRequest::post, repo, hook.into(), &["deliveries", &delivery, "attempts"]);
    self.client.perform(request, &[202])
  }
}

/// `/repos/{owner}/{repo}/hooks/{hook}/{rest...}`
fn hook_request(build: fn(&[&str]) -> ApiRequest, repo: &RepoRef, hook: HookId, rest: &[&str]) -> ApiRequest {
  let hook = hook.segment();
  let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str(), "hooks", hook.as_str()];
  segments.extend_from_slice(rest);
  build(&segments)
}
