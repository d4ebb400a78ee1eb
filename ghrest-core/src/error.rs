//! Errors raised while turning response text into typed entities.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while parsing or mapping a GitHub payload
#[derive(Debug, Error)]
pub enum MappingError {
  #[error("Failed to parse response body as JSON: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("Expected a JSON object but found {found}")]
  NotAnObject { found: &'static str },

  #[error("Expected a JSON array but found {found}")]
  NotAnArray { found: &'static str },

  #[error("Field '{field}' expected {expected} but found {found}")]
  Coercion {
    field: String,
    expected: &'static str,
    found: &'static str,
  },

  #[error("Field '{field}' has unknown variant '{value}'")]
  UnknownVariant { field: String, value: String },

  #[error("Field '{field}' is tagged '{tag}' but its payload has a different shape")]
  VariantMismatch { field: String, tag: String },
}

impl MappingError {
  pub fn coercion(field: &str, expected: &'static str, found: &Value) -> Self {
    Self::Coercion {
      field: field.to_string(),
      expected,
      found: json_kind(found),
    }
  }

  /// Re-root a field-level error under `parent`, so nested failures report
  /// paths such as `commit.sha` or `reviewers[0].reviewer.id`.
  pub fn within(self, parent: &str) -> Self {
    match self {
      Self::Coercion { field, expected, found } => Self::Coercion {
        field: join_path(parent, &field),
        expected,
        found,
      },
      Self::UnknownVariant { field, value } => Self::UnknownVariant {
        field: join_path(parent, &field),
        value,
      },
      Self::VariantMismatch { field, tag } => Self::VariantMismatch {
        field: join_path(parent, &field),
        tag,
      },
      Self::NotAnObject { found } => Self::Coercion {
        field: parent.to_string(),
        expected: "object",
        found,
      },
      Self::NotAnArray { found } => Self::Coercion {
        field: parent.to_string(),
        expected: "array",
        found,
      },
      other => other,
    }
  }

  /// The dotted field path this error refers to, if any.
  pub fn field(&self) -> Option<&str> {
    match self {
      Self::Coercion { field, .. } | Self::UnknownVariant { field, .. } | Self::VariantMismatch { field, .. } => {
        Some(field)
      }
      _ => None,
    }
  }
}

fn join_path(parent: &str, field: &str) -> String {
  if field.starts_with('[') {
    format!("{parent}{field}")
  } else {
    format!("{parent}.{field}")
  }
}

/// Human-readable name of a JSON value's type.
pub fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
