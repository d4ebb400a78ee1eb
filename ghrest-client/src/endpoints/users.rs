use ghrest_core::map_entity;
use tracing::instrument;

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::Username;
use crate::models::User;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// User profile endpoints
#[derive(Clone, Copy)]
pub struct UsersManager<'a> {
  client: &'a GitHubClient,
}

impl<'a> UsersManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client }
  }

  /// Get the current authenticated user
  #[instrument(skip(self), level = "debug")]
  pub fn current_user(&self) -> ApiResult<ApiResponse<User>> {
    self.client.fetch(ApiRequest::get(&["user"]), map_entity::<User>)
  }

  /// Get a user by login
  #[instrument(skip_all, level = "debug")]
  pub fn get_user(&self, username: impl Into<Username>) -> ApiResult<ApiResponse<User>> {
    let username = username.into();
    self
      .client
      .fetch(ApiRequest::get(&["users", username.as_str()]), map_entity::<User>)
  }
}
