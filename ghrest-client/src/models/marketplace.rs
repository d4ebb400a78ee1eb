//! GitHub Marketplace listing plans and purchases.

use ghrest_core::{FromJson, JsonObject, MappingError};
use serde::Serialize;

/// A pricing plan of a Marketplace listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Plan {
  pub id: u64,
  pub number: u64,
  pub url: String,
  pub accounts_url: String,
  pub name: String,
  pub description: String,
  pub monthly_price_in_cents: u64,
  pub yearly_price_in_cents: u64,
  /// `FREE`, `FLAT_RATE` or `PER_UNIT`
  pub price_model: String,
  pub has_free_trial: bool,
  pub unit_name: Option<String>,
  pub state: String,
  pub bullets: Vec<String>,
}

impl FromJson for Plan {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      number: object.get_u64("number", 0)?,
      url: object.get_str("url", "")?,
      accounts_url: object.get_str("accounts_url", "")?,
      name: object.get_str("name", "")?,
      description: object.get_str("description", "")?,
      monthly_price_in_cents: object.get_u64("monthly_price_in_cents", 0)?,
      yearly_price_in_cents: object.get_u64("yearly_price_in_cents", 0)?,
      price_model: object.get_str("price_model", "")?,
      has_free_trial: object.get_bool("has_free_trial", false)?,
      unit_name: object.get_opt_str("unit_name")?,
      state: object.get_str("state", "")?,
      bullets: object.get_strings("bullets")?,
    })
  }
}

/// An account that purchased a plan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MarketplaceAccount {
  pub id: u64,
  pub login: String,
  pub url: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub organization_billing_email: Option<String>,
  pub marketplace_purchase: MarketplacePurchase,
  pub marketplace_pending_change: Option<PendingChange>,
}

impl FromJson for MarketplaceAccount {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      login: object.get_str("login", "")?,
      url: object.get_str("url", "")?,
      kind: object.get_str("type", "")?,
      organization_billing_email: object.get_opt_str("organization_billing_email")?,
      marketplace_purchase: object.get_entity("marketplace_purchase")?,
      marketplace_pending_change: object.get_opt_entity("marketplace_pending_change")?,
    })
  }
}

/// A purchase of a plan. Purchases listed for the authenticated user also
/// carry the purchasing `account`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MarketplacePurchase {
  /// `monthly` or `yearly`
  pub billing_cycle: String,
  pub next_billing_date: Option<String>,
  pub is_installed: bool,
  pub unit_count: Option<u64>,
  pub on_free_trial: bool,
  pub free_trial_ends_on: Option<String>,
  pub updated_at: String,
  pub account: Option<AccountRef>,
  pub plan: Plan,
}

impl FromJson for MarketplacePurchase {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      billing_cycle: object.get_str("billing_cycle", "")?,
      next_billing_date: object.get_opt_str("next_billing_date")?,
      is_installed: object.get_bool("is_installed", false)?,
      unit_count: object.get_opt_u64("unit_count")?,
      on_free_trial: object.get_bool("on_free_trial", false)?,
      free_trial_ends_on: object.get_opt_str("free_trial_ends_on")?,
      updated_at: object.get_str("updated_at", "")?,
      account: object.get_opt_entity("account")?,
      plan: object.get_entity("plan")?,
    })
  }
}

/// A plan change that takes effect at the next billing cycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PendingChange {
  pub id: u64,
  pub effective_date: String,
  pub is_installed: bool,
  pub unit_count: Option<u64>,
  pub plan: Plan,
}

impl FromJson for PendingChange {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      effective_date: object.get_str("effective_date", "")?,
      is_installed: object.get_bool("is_installed", false)?,
      unit_count: object.get_opt_u64("unit_count")?,
      plan: object.get_entity("plan")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AccountRef {
  pub id: u64,
  pub login: String,
  pub url: String,
  pub node_id: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub organization_billing_email: Option<String>,
}

impl FromJson for AccountRef {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      login: object.get_str("login", "")?,
      url: object.get_str("url", "")?,
      node_id: object.get_str("node_id", "")?,
      kind: object.get_str("type", "")?,
      organization_billing_email: object.get_opt_str("organization_billing_email")?,
    })
  }
}

#[cfg(test)]
mod tests {
  use ghrest_core::{map_entity, map_list};
  use ghrest_test_utils::{assert_fields_preserved, fixtures};
  use serde_json::json;

  use super::*;

  #[test]
  fn test_plan_round_trip_keeps_bullets_in_order() {
    let input = fixtures::plan(1313, "Pro");
    let plan: Plan = map_entity(&input).unwrap();

    assert_eq!(plan.bullets, vec!["Up to 25 private repositories", "11 concurrent builds"]);
    assert_eq!(plan.unit_name, None);
    assert_fields_preserved(&input, &serde_json::to_value(&plan).unwrap());
  }

  #[test]
  fn test_account_with_pending_change() {
    let input = json!({
      "url": "https://api.github.com/orgs/github",
      "type": "Organization",
      "id": 4,
      "login": "github",
      "organization_billing_email": "billing@github.com",
      "marketplace_purchase": {
        "billing_cycle": "monthly",
        "next_billing_date": "2017-11-11T00:00:00Z",
        "unit_count": 1,
        "on_free_trial": true,
        "free_trial_ends_on": "2017-11-11T00:00:00Z",
        "updated_at": "2017-11-02T01:12:12Z",
        "plan": fixtures::plan(1313, "Pro")
      },
      "marketplace_pending_change": {
        "effective_date": "2017-11-11T00:00:00Z",
        "unit_count": 1,
        "id": 77,
        "plan": fixtures::plan(1111, "Basic")
      }
    });

    let account: MarketplaceAccount = map_entity(&input).unwrap();
    assert_eq!(account.kind, "Organization");
    assert!(account.marketplace_purchase.on_free_trial);
    assert_eq!(account.marketplace_pending_change.as_ref().unwrap().plan.name, "Basic");
    assert_fields_preserved(&input, &serde_json::to_value(&account).unwrap());
  }

  #[test]
  fn test_user_purchases_carry_account() {
    let input = json!([{
      "billing_cycle": "yearly",
      "account": {"login": "github", "id": 4, "type": "Organization"},
      "plan": {"id": 1313, "name": "Pro"}
    }]);

    let purchases: Vec<MarketplacePurchase> = map_list(&input).unwrap();
    assert_eq!(purchases[0].account.as_ref().unwrap().login, "github");
    assert_eq!(purchases[0].plan.id, 1313);
  }
}
