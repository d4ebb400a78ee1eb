//! # Action Outcomes
//!
//! Mutation endpoints that answer with an empty body (mark-as-read, ping,
//! cancel, delete) report success purely through the status code. They return
//! an [`ActionOutcome`] instead of a `Result`: callers that only care whether
//! the call worked use [`ActionOutcome::is_success`] or convert to `bool`,
//! while the failure reason stays available for those who want it.

use std::fmt;

use thiserror::Error;

/// Why an action did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
  /// 401 or 403
  Unauthorized,
  /// 404
  NotFound,
  /// GitHub refused the change (400, 409, 410 or 422)
  Rejected,
  /// Any other status, including a 2xx the endpoint does not document
  UnexpectedStatus,
  /// No response was received, or the request could not be built
  Transport,
}

impl FailureReason {
  pub fn from_status(status: u16) -> Self {
    match status {
      401 | 403 => Self::Unauthorized,
      404 => Self::NotFound,
      400 | 409 | 410 | 422 => Self::Rejected,
      _ => Self::UnexpectedStatus,
    }
  }
}

impl fmt::Display for FailureReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      Self::Unauthorized => "authentication failed",
      Self::NotFound => "not found",
      Self::Rejected => "rejected",
      Self::UnexpectedStatus => "unexpected status",
      Self::Transport => "transport error",
    };
    f.write_str(text)
  }
}

/// Details of a failed action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{request}: {reason}{}: {detail}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
pub struct ActionFailure {
  pub request: String,
  pub reason: FailureReason,
  /// HTTP status, when a response was received
  pub status: Option<u16>,
  /// GitHub's error message, or the transport error text
  pub detail: String,
}

/// Result of a status-only mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
  Succeeded { status: u16 },
  Failed(ActionFailure),
}

impl ActionOutcome {
  pub const fn is_success(&self) -> bool {
    matches!(self, Self::Succeeded { .. })
  }

  /// Status code of the exchange, if one happened
  pub const fn status(&self) -> Option<u16> {
    match self {
      Self::Succeeded { status } => Some(*status),
      Self::Failed(failure) => failure.status,
    }
  }

  pub const fn failure(&self) -> Option<&ActionFailure> {
    match self {
      Self::Succeeded { .. } => None,
      Self::Failed(failure) => Some(failure),
    }
  }

  /// Convert into a `Result` for callers that prefer `?`
  pub fn into_result(self) -> Result<u16, ActionFailure> {
    match self {
      Self::Succeeded { status } => Ok(status),
      Self::Failed(failure) => Err(failure),
    }
  }
}

impl From<ActionOutcome> for bool {
  fn from(outcome: ActionOutcome) -> Self {
    outcome.is_success()
  }
}
