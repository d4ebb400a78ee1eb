//! # GitHub Marketplace Endpoints
//!
//! Plans and subscriptions of a Marketplace listing. The listing endpoints
//! have a `stubbed` twin that serves fake data for testing an app before it
//! is published; [`MarketplaceManager::stubbed`] switches to it.

use ghrest_core::{map_entity, map_list};
use tracing::instrument;

use crate::client::GitHubClient;
use crate::error::ApiResult;
use crate::ids::{AccountId, PlanId};
use crate::models::{MarketplaceAccount, MarketplacePurchase, Plan};
use crate::request::{ApiRequest, Pagination, Query};
use crate::response::ApiResponse;

/// Ordering for accounts subscribed to a plan
#[derive(Debug, Clone, Default)]
pub struct ListAccountsOptions {
  /// `created` (default upstream) or `updated`
  pub sort: Option<String>,
  /// `asc` or `desc`
  pub direction: Option<String>,
  pub pagination: Pagination,
}

/// Marketplace listing endpoints
#[derive(Clone, Copy)]
pub struct MarketplaceManager<'a> {
  client: &'a GitHubClient,
  stubbed: bool,
}

impl<'a> MarketplaceManager<'a> {
  pub(crate) const fn new(client: &'a GitHubClient) -> Self {
    Self { client, stubbed: false }
  }

  /// Use the stubbed listing endpoints
  #[must_use]
  pub const fn stubbed(self) -> Self {
    Self { stubbed: true, ..self }
  }

  pub const fn is_stubbed(&self) -> bool {
    self.stubbed
  }

  #[instrument(skip(self), fields(stubbed = self.stubbed), level = "debug")]
  pub fn list_plans(&self, pagination: Pagination) -> ApiResult<ApiResponse<Vec<Plan>>> {
    let request = ApiRequest::get(&self.listing(&["plans"])).with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_list::<Plan>)
  }

  /// Accounts that have purchased a plan, including free trials
  #[instrument(skip(self, plan), fields(stubbed = self.stubbed), level = "debug")]
  pub fn list_accounts_for_plan(
    &self,
    plan: impl Into<PlanId>,
    options: &ListAccountsOptions,
  ) -> ApiResult<ApiResponse<Vec<MarketplaceAccount>>> {
    let plan = plan.into().segment();
    let query = Query::new()
      .push_opt("sort", options.sort.as_deref())
      .push_opt("direction", options.direction.as_deref())
      .pagination(&options.pagination);
    let request = ApiRequest::get(&self.listing(&["plans", &plan, "accounts"])).with_query(query);
    self.client.fetch(request, map_list::<MarketplaceAccount>)
  }

  /// The plan an account is subscribed to, with any pending change
  #[instrument(skip(self, account), fields(stubbed = self.stubbed), level = "debug")]
  pub fn get_subscription_for_account(
    &self,
    account: impl Into<AccountId>,
  ) -> ApiResult<ApiResponse<MarketplaceAccount>> {
    let account = account.into().segment();
    let request = ApiRequest::get(&self.listing(&["accounts", &account]));
    self.client.fetch(request, map_entity::<MarketplaceAccount>)
  }

  /// Marketplace purchases of the authenticated user
  #[instrument(skip(self), fields(stubbed = self.stubbed), level = "debug")]
  pub fn list_user_subscriptions(&self, pagination: Pagination) -> ApiResult<ApiResponse<Vec<MarketplacePurchase>>> {
    let mut segments = vec!["user", "marketplace_purchases"];
    if self.stubbed {
      segments.push("stubbed");
    }
    let request = ApiRequest::get(&segments).with_query(Query::new().pagination(&pagination));
    self.client.fetch(request, map_list::<MarketplacePurchase>)
  }

  fn listing<'s>(&self, rest: &[&'s str]) -> Vec<&'s str> {
    let mut segments = vec!["marketplace_listing"];
    if self.stubbed {
      segments.push("stubbed");
    }
    segments.extend_from_slice(rest);
    segments
  }
}

#[cfg(test)]
mod tests {
  use ghrest_test_utils::{MockGitHub, fixtures};
  use serde_json::json;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, ResponseTemplate};

  use super::*;
  use crate::client::tests::client_for;

  fn account() -> serde_json::Value {
    json!({
      "url": "https://api.github.com/orgs/github",
      "type": "Organization",
      "id": 4,
      "login": "github",
      "organization_billing_email": "billing@github.com",
      "marketplace_purchase": {
        "billing_cycle": "monthly",
        "next_billing_date": "2017-11-11T00:00:00Z",
        "unit_count": null,
        "on_free_trial": true,
        "free_trial_ends_on": "2017-11-11T00:00:00Z",
        "updated_at": "2017-11-02T01:12:12Z",
        "plan": fixtures::plan(1313, "Pro")
      },
      "marketplace_pending_change": {
        "effective_date": "2017-11-11T00:00:00Z",
        "unit_count": null,
        "id": 77,
        "plan": fixtures::plan(1111, "Basic")
      }
    })
  }

  #[test]
  fn test_list_plans_live_and_stubbed() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/marketplace_listing/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::plan(1313, "Pro")]))),
    );
    server.mount(
      Mock::given(method("GET"))
        .and(path("/marketplace_listing/stubbed/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::plan(1, "Stub")]))),
    );

    let client = client_for(&server);
    let live = client
      .marketplace()
      .list_plans(Pagination::default())
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(live[0].name, "Pro");
    assert_eq!(live[0].unit_name, None);

    let stubbed = client.marketplace().stubbed();
    assert!(stubbed.is_stubbed());
    let plans = stubbed.list_plans(Pagination::default()).unwrap().into_object().unwrap();
    assert_eq!(plans[0].name, "Stub");
  }

  #[test]
  fn test_list_accounts_for_plan() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/marketplace_listing/plans/1313/accounts"))
        .and(query_param("sort", "updated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([account()]))),
    );

    let options = ListAccountsOptions {
      sort: Some("updated".to_string()),
      ..ListAccountsOptions::default()
    };
    let accounts = client_for(&server)
      .marketplace()
      .list_accounts_for_plan(1313, &options)
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(accounts[0].kind, "Organization");
    assert!(accounts[0].marketplace_purchase.on_free_trial);
  }

  #[test]
  fn test_get_subscription_for_account_with_pending_change() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/marketplace_listing/stubbed/accounts/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account())),
    );

    let account = client_for(&server)
      .marketplace()
      .stubbed()
      .get_subscription_for_account(4)
      .unwrap()
      .into_object()
      .unwrap();
    let pending = account.marketplace_pending_change.unwrap();
    assert_eq!(pending.plan.name, "Basic");
    assert_eq!(pending.unit_count, None);
  }

  #[test]
  fn test_list_user_subscriptions() {
    let server = MockGitHub::start();
    server.mount(
      Mock::given(method("GET"))
        .and(path("/user/marketplace_purchases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
          "billing_cycle": "monthly",
          "is_installed": true,
          "on_free_trial": false,
          "updated_at": "2017-11-02T01:12:12Z",
          "account": {"login": "github", "id": 4, "url": "https://api.github.com/orgs/github", "type": "Organization"},
          "plan": fixtures::plan(1313, "Pro")
        }]))),
    );

    let purchases = client_for(&server)
      .marketplace()
      .list_user_subscriptions(Pagination::default())
      .unwrap()
      .into_object()
      .unwrap();
    assert_eq!(purchases[0].account.as_ref().map(|a| a.login.as_str()), Some("github"));
    assert_eq!(purchases[0].plan.bullets.len(), 2);
  }
}
