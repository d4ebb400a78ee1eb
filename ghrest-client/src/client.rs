//! # GitHub HTTP Client
//!
//! Entry point for GitHub REST API interactions. The client owns the fixed
//! settings and the transport; resource managers borrow it and funnel every
//! call through [`GitHubClient::fetch`] (read operations) or
//! [`GitHubClient::perform`] (status-only actions).

use ghrest_core::{ClientSettings, Mapper};
use serde::Serialize;
use tracing::{debug, warn};

use crate::endpoints::{
  AssigneesManager, BranchesManager, CodespacesManager, DeploymentsManager, MarketplaceManager, NotificationsManager,
  UsersManager, WebhooksManager, WorkflowRunsManager, WorkflowsManager,
};
use crate::error::{ApiError, ApiResult, TransportError, extract_error_message};
use crate::outcome::{ActionFailure, ActionOutcome, FailureReason};
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::transport::{HttpTransport, Transport};

/// Represents a GitHub API client
pub struct GitHubClient {
  transport: Box<dyn Transport>,
  settings: ClientSettings,
}

impl GitHubClient {
  /// Create a client that talks HTTP using `settings`
  pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
    let transport = HttpTransport::new(&settings)?;
    Ok(Self::with_transport(settings, transport))
  }

  /// Create a client on top of a custom transport
  pub fn with_transport(settings: ClientSettings, transport: impl Transport + 'static) -> Self {
    Self {
      transport: Box::new(transport),
      settings,
    }
  }

  pub fn settings(&self) -> &ClientSettings {
    &self.settings
  }

  /// Status of the most recent exchange
  pub fn last_status(&self) -> Option<u16> {
    self.transport.last_status()
  }

  /// Body of the most recent exchange, when it failed
  pub fn last_error_body(&self) -> Option<String> {
    self.transport.last_error_body()
  }

  pub fn users(&self) -> UsersManager<'_> {
    UsersManager::new(self)
  }

  pub fn workflows(&self) -> WorkflowsManager<'_> {
    WorkflowsManager::new(self)
  }

  pub fn workflow_runs(&self) -> WorkflowRunsManager<'_> {
    WorkflowRunsManager::new(self)
  }

  pub fn deployments(&self) -> DeploymentsManager<'_> {
    DeploymentsManager::new(self)
  }

  pub fn notifications(&self) -> NotificationsManager<'_> {
    NotificationsManager::new(self)
  }

  pub fn branches(&self) -> BranchesManager<'_> {
    BranchesManager::new(self)
  }

  pub fn marketplace(&self) -> MarketplaceManager<'_> {
    MarketplaceManager::new(self)
  }

  pub fn codespaces(&self) -> CodespacesManager<'_> {
    CodespacesManager::new(self)
  }

  pub fn webhooks(&self) -> WebhooksManager<'_> {
    WebhooksManager::new(self)
  }

  pub fn assignees(&self) -> AssigneesManager<'_> {
    AssigneesManager::new(self)
  }

  /// Test the GitHub connection by fetching the current user
  pub fn test_connection(&self) -> bool {
    self.perform(ApiRequest::get(&["user"]), &[200]).is_success()
  }

  /// Send a read request and keep the successful body for later
  /// materialization through `mapper`.
  pub(crate) fn fetch<T>(&self, request: ApiRequest, mapper: Mapper<T>) -> ApiResult<ApiResponse<T>> {
    let prefix = &self.settings.error_prefix;
    let raw = self.transport.send(&request).map_err(|source| ApiError::Transport {
      prefix: prefix.clone(),
      source,
    })?;

    if raw.is_success() {
      return Ok(ApiResponse::new(raw.status, raw.body, mapper));
    }

    let message = extract_error_message(&raw.body);
    let description = request.describe();
    match raw.status {
      401 | 403 => {
        warn!("{} rejected credentials (HTTP {})", description, raw.status);
        Err(ApiError::Unauthorized {
          prefix: prefix.clone(),
          request: description,
          status: raw.status,
          message,
        })
      }
      404 => Err(ApiError::NotFound {
        prefix: prefix.clone(),
        request: description,
        message,
      }),
      status => Err(ApiError::Status {
        prefix: prefix.clone(),
        request: description,
        status,
        message,
      }),
    }
  }

  /// Like [`Self::fetch`] with a JSON body
  pub(crate) fn fetch_json<B, T>(&self, request: ApiRequest, body: &B, mapper: Mapper<T>) -> ApiResult<ApiResponse<T>>
  where
    B: Serialize + ?Sized,
  {
    self.fetch(request.with_json(body)?, mapper)
  }

  /// Send a status-only request. Never fails: anything but one of the
  /// `expected` statuses becomes [`ActionOutcome::Failed`].
  pub(crate) fn perform(&self, request: ApiRequest, expected: &[u16]) -> ActionOutcome {
    let outcome = self.send_action(&request, expected);
    self.log_outcome(&outcome, false);
    outcome
  }

  /// Like [`Self::perform`] for yes/no queries, where GitHub answers "no"
  /// with 404. That answer is logged at debug level, not as a warning.
  pub(crate) fn check(&self, request: ApiRequest, expected: &[u16]) -> ActionOutcome {
    let outcome = self.send_action(&request, expected);
    self.log_outcome(&outcome, true);
    outcome
  }

  fn send_action(&self, request: &ApiRequest, expected: &[u16]) -> ActionOutcome {
    let description = request.describe();

    match self.transport.send(request) {
      Ok(raw) if expected.contains(&raw.status) => ActionOutcome::Succeeded { status: raw.status },
      Ok(raw) => ActionOutcome::Failed(ActionFailure {
        request: description,
        reason: FailureReason::from_status(raw.status),
        status: Some(raw.status),
        detail: extract_error_message(&raw.body),
      }),
      Err(error) => ActionOutcome::Failed(ActionFailure {
        request: description,
        reason: FailureReason::Transport,
        status: None,
        detail: error.to_string(),
      }),
    }
  }

  fn log_outcome(&self, outcome: &ActionOutcome, not_found_is_answer: bool) {
    match outcome {
      ActionOutcome::Succeeded { status } => debug!("Action succeeded with HTTP {}", status),
      ActionOutcome::Failed(failure) if not_found_is_answer && failure.reason == FailureReason::NotFound => {
        debug!("{}", failure);
      }
      ActionOutcome::Failed(failure) => warn!("{}: {}", self.settings.error_prefix, failure),
    }
  }

  /// Like [`Self::perform`] with a JSON body
  pub(crate) fn perform_json<B>(&self, request: ApiRequest, body: &B, expected: &[u16]) -> ActionOutcome
  where
    B: Serialize + ?Sized,
  {
    let description = request.describe();
    match request.with_json(body) {
      Ok(request) => self.perform(request, expected),
      Err(error) => {
        warn!("{}: {}", self.settings.error_prefix, error);
        ActionOutcome::Failed(ActionFailure {
          request: description,
          reason: FailureReason::Transport,
          status: None,
          detail: error.to_string(),
        })
      }
    }
  }
}

/// Create a GitHub client for the public API from an access token
pub fn create_github_client(token: &str) -> Result<GitHubClient, TransportError> {
  GitHubClient::new(ClientSettings::with_token(token))
}
