//! # Format Dispatch
//!
//! Selects which representation of a response body reaches the caller: the
//! untouched text, a generic JSON tree, or the mapped entity graph. Mapping
//! only happens when the object form is requested.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MappingError;
use crate::mapping::parse_document;

/// Output format requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormat {
  /// The response body exactly as received
  Text,
  /// The body parsed into a generic JSON tree
  Json,
  /// The body mapped into typed entities
  #[default]
  Object,
}

impl ReturnFormat {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Text => "text",
      Self::Json => "json",
      Self::Object => "object",
    }
  }
}

impl fmt::Display for ReturnFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ReturnFormat {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "text" | "raw" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "object" => Ok(Self::Object),
      other => Err(format!("Unknown return format '{other}' (expected text, json or object)")),
    }
  }
}

/// A response body in the representation the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Materialized<T> {
  Text(String),
  Json(Value),
  Object(T),
}

impl<T> Materialized<T> {
  pub const fn format(&self) -> ReturnFormat {
    match self {
      Self::Text(_) => ReturnFormat::Text,
      Self::Json(_) => ReturnFormat::Json,
      Self::Object(_) => ReturnFormat::Object,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text(text) => Some(text),
      _ => None,
    }
  }

  pub fn as_json(&self) -> Option<&Value> {
    match self {
      Self::Json(value) => Some(value),
      _ => None,
    }
  }

  pub fn into_object(self) -> Option<T> {
    match self {
      Self::Object(object) => Some(object),
      _ => None,
    }
  }
}

/// Produce the requested representation of `raw`.
///
/// `mapper` is invoked only for [`ReturnFormat::Object`]; text requests never
/// parse and JSON requests never map, so a payload that fails entity mapping
/// is still available in the raw forms.
pub fn materialize<T, F>(raw: String, format: ReturnFormat, mapper: F) -> Result<Materialized<T>, MappingError>
where
  F: FnOnce(&Value) -> Result<T, MappingError>,
{
  match format {
    ReturnFormat::Text => Ok(Materialized::Text(raw)),
    ReturnFormat::Json => parse_document(&raw).map(Materialized::Json),
    ReturnFormat::Object => {
      let document = parse_document(&raw)?;
      mapper(&document).map(Materialized::Object)
    }
  }
}
