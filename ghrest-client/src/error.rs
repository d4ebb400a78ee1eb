//! Error types for the GitHub client.

use ghrest_core::MappingError;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures below the HTTP status level: the request never produced a
/// response, or its body could not be read.
#[derive(Debug, Error)]
pub enum TransportError {
  #[error("Invalid base URL '{url}': {reason}")]
  InvalidBaseUrl { url: String, reason: String },

  #[error("Invalid header {name}: {reason}")]
  InvalidHeader { name: &'static str, reason: String },

  #[error("Failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("{method} {url} failed: {source}")]
  Send {
    method: String,
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("Failed to read response body from {url}: {source}")]
  Body {
    url: String,
    #[source]
    source: reqwest::Error,
  },
}

/// Errors surfaced by read operations
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{prefix}: {source}")]
  Transport {
    prefix: String,
    #[source]
    source: TransportError,
  },

  #[error("{prefix}: {request}: Authentication failed. Please check your GitHub credentials. ({message})")]
  Unauthorized {
    prefix: String,
    request: String,
    status: u16,
    message: String,
  },

  #[error("{prefix}: {request}: not found ({message})")]
  NotFound {
    prefix: String,
    request: String,
    message: String,
  },

  #[error("{prefix}: {request}: HTTP {status} - {message}")]
  Status {
    prefix: String,
    request: String,
    status: u16,
    message: String,
  },

  #[error("Failed to map GitHub response: {0}")]
  Mapping(#[from] MappingError),

  #[error("Failed to encode request body: {0}")]
  Encode(#[source] serde_json::Error),
}

impl ApiError {
  /// HTTP status that caused the error, when one was received
  pub const fn status(&self) -> Option<u16> {
    match self {
      Self::Unauthorized { status, .. } | Self::Status { status, .. } => Some(*status),
      Self::NotFound { .. } => Some(404),
      _ => None,
    }
  }

  pub const fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}

/// Pull GitHub's `message` out of an error body, falling back to the raw text.
pub(crate) fn extract_error_message(body: &str) -> String {
  serde_json::from_str::<serde_json::Value>(body)
    .ok()
    .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
    .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_error_message_from_github_body() {
    let body = r#"{"message": "Not Found", "documentation_url": "https://docs.github.com/rest"}"#;
    assert_eq!(extract_error_message(body), "Not Found");
  }

  #[test]
  fn test_extract_error_message_falls_back_to_text() {
    assert_eq!(extract_error_message("  Bad Gateway \n"), "Bad Gateway");
  }

  #[test]
  fn test_status_accessor() {
    let error = ApiError::Status {
      prefix: "GitHub API request failed".to_string(),
      request: "GET /user".to_string(),
      status: 500,
      message: "boom".to_string(),
    };
    assert_eq!(error.status(), Some(500));
    assert_eq!(
      error.to_string(),
      "GitHub API request failed: GET /user: HTTP 500 - boom"
    );
  }
}
