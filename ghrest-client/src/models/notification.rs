use ghrest_core::{FromJson, JsonObject, MappingError};
use serde::Serialize;

use super::RepositorySummary;

/// Represents a notification thread
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Notification {
  /// Thread id (a numeric string)
  pub id: String,
  pub unread: bool,
  pub reason: String,
  pub updated_at: String,
  pub last_read_at: Option<String>,
  pub subject: NotificationSubject,
  pub repository: RepositorySummary,
  pub url: String,
  pub subscription_url: String,
}

impl FromJson for Notification {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      id: object.get_str("id", "")?,
      unread: object.get_bool("unread", false)?,
      reason: object.get_str("reason", "")?,
      updated_at: object.get_str("updated_at", "")?,
      last_read_at: object.get_opt_str("last_read_at")?,
      subject: object.get_entity("subject")?,
      repository: object.get_entity("repository")?,
      url: object.get_str("url", "")?,
      subscription_url: object.get_str("subscription_url", "")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NotificationSubject {
  pub title: String,
  pub url: Option<String>,
  pub latest_comment_url: Option<String>,
  /// `Issue`, `PullRequest`, `Release`, ...
  #[serde(rename = "type")]
  pub kind: String,
}

impl FromJson for NotificationSubject {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      title: object.get_str("title", "")?,
      url: object.get_opt_str("url")?,
      latest_comment_url: object.get_opt_str("latest_comment_url")?,
      kind: object.get_str("type", "")?,
    })
  }
}

/// Whether the authenticated user is subscribed to a thread
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ThreadSubscription {
  pub subscribed: bool,
  pub ignored: bool,
  pub reason: Option<String>,
  pub created_at: String,
  pub url: String,
  pub thread_url: String,
}

impl FromJson for ThreadSubscription {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    Ok(Self {
      subscribed: object.get_bool("subscribed", false)?,
      ignored: object.get_bool("ignored", false)?,
      reason: object.get_opt_str("reason")?,
      created_at: object.get_str("created_at", "")?,
      url: object.get_str("url", "")?,
      thread_url: object.get_str("thread_url", "")?,
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
  fn test_notification_round_trip_preserves_fields() {
    let input = fixtures::notification("1", "Greetings");
    let notification: Notification = map_entity(&input).unwrap();

    assert_eq!(notification.id, "1");
    assert_eq!(notification.subject.kind, "Issue");
    assert_eq!(notification.repository.owner.login, "octocat");
    assert_fields_preserved(&input, &serde_json::to_value(&notification).unwrap());
  }

  #[test]
  fn test_notification_list_order() {
    let input = json!([fixtures::notification("9", "b"), fixtures::notification("3", "a")]);
    let notifications: Vec<Notification> = map_list(&input).unwrap();
    assert_eq!(
      notifications.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
      vec!["9", "3"]
    );
  }

  #[test]
  fn test_numeric_thread_id_is_a_coercion_error() {
    let error = map_entity::<Notification>(&json!({"id": 1})).unwrap_err();
    assert_eq!(error.field(), Some("id"));
  }

  #[test]
  fn test_subscription_null_reason() {
    let subscription: ThreadSubscription =
      map_entity(&json!({"subscribed": true, "ignored": false, "reason": null})).unwrap();
    assert!(subscription.subscribed);
    assert_eq!(subscription.reason, None);
  }
}
