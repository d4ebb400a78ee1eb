use std::fmt;

use ghrest_core::{FromJson, JsonObject, MappingError};
use serde::Serialize;
use serde_json::{Number, Value};

/// Represents a repository webhook
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Webhook {
  pub id: u64,
  #[serde(rename = "type")]
  pub kind: String,
  pub name: String,
  pub active: bool,
  pub events: Vec<String>,
  pub config: WebhookConfig,
  pub updated_at: String,
  pub created_at: String,
  pub url: String,
  pub test_url: String,
  pub ping_url: String,
  pub deliveries_url: String,
  pub last_response: HookResponse,
}

impl FromJson for Webhook {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      kind: object.get_str("type", "")?,
      name: object.get_str("name", "")?,
      active: object.get_bool("active", false)?,
      events: object.get_strings("events")?,
      config: object.get_entity("config")?,
      updated_at: object.get_str("updated_at", "")?,
      created_at: object.get_str("created_at", "")?,
      url: object.get_str("url", "")?,
      test_url: object.get_str("test_url", "")?,
      ping_url: object.get_str("ping_url", "")?,
      deliveries_url: object.get_str("deliveries_url", "")?,
      last_response: object.get_entity("last_response")?,
    })
  }
}

/// Delivery settings of a webhook
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WebhookConfig {
  pub url: String,
  /// `json` or `form`
  pub content_type: String,
  /// GitHub masks stored secrets as `********`
  pub secret: Option<String>,
  pub insecure_ssl: InsecureSsl,
}

impl FromJson for WebhookConfig {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      url: object.get_str("url", "")?,
      content_type: object.get_str("content_type", "")?,
      secret: object.get_opt_str("secret")?,
      insecure_ssl: InsecureSsl::from_value(object.get_scalar("insecure_ssl")?),
    })
  }
}

/// TLS verification flag of a webhook: `0` verifies certificates, `1` skips
/// verification. GitHub sends it as a string or a number and it is written
/// back in the same form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InsecureSsl {
  Text(String),
  Number(Number),
}

impl InsecureSsl {
  fn from_value(value: Option<&Value>) -> Self {
    match value {
      Some(Value::Number(number)) => Self::Number(number.clone()),
      Some(Value::String(text)) => Self::Text(text.clone()),
      _ => Self::default(),
    }
  }

  /// Whether deliveries skip certificate verification
  pub fn skips_verification(&self) -> bool {
    match self {
      Self::Text(text) => text.trim() != "0",
      Self::Number(number) => number.as_f64() != Some(0.0),
    }
  }
}

impl Default for InsecureSsl {
  fn default() -> Self {
    Self::Text("0".to_string())
  }
}

impl fmt::Display for InsecureSsl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Text(text) => f.write_str(text),
      Self::Number(number) => write!(f, "{number}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HookResponse {
  pub code: Option<u64>,
  pub status: Option<String>,
  pub message: Option<String>,
}

impl FromJson for HookResponse {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      code: object.get_opt_u64("code")?,
      status: object.get_opt_str("status")?,
      message: object.get_opt_str("message")?,
    })
  }
}

/// One attempt to deliver a webhook event
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HookDelivery {
  pub id: u64,
  pub guid: String,
  pub delivered_at: String,
  pub redelivery: bool,
  /// Seconds the receiving server took to answer
  pub duration: f64,
  pub status: String,
  pub status_code: u64,
  pub event: String,
  pub action: Option<String>,
  pub installation_id: Option<u64>,
  pub repository_id: Option<u64>,
}

impl FromJson for HookDelivery {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_u64("id", 0)?,
      guid: object.get_str("guid", "")?,
      delivered_at: object.get_str("delivered_at", "")?,
      redelivery: object.get_bool("redelivery", false)?,
      duration: object.get_f64("duration", 0.0)?,
      status: object.get_str("status", "")?,
      status_code: object.get_u64("status_code", 0)?,
      event: object.get_str("event", "")?,
      action: object.get_opt_str("action")?,
      installation_id: object.get_opt_u64("installation_id")?,
      repository_id: object.get_opt_u64("repository_id")?,
    })
  }
}
