//! Responses whose representation is chosen after the call.

use std::fmt;

use ghrest_core::{Mapper, Materialized, ReturnFormat, materialize, parse_document};
use serde_json::Value;

use crate::error::ApiResult;

/// A successful response body together with the mapper for its entity type.
///
/// Nothing is parsed until the caller asks for a representation, so a caller
/// that wants the raw text never pays for (or fails on) entity mapping.
pub struct ApiResponse<T> {
  status: u16,
  body: String,
  mapper: Mapper<T>,
}

impl<T> ApiResponse<T> {
  pub fn new(status: u16, body: String, mapper: Mapper<T>) -> Self {
    Self { status, body, mapper }
  }

  pub const fn status(&self) -> u16 {
    self.status
  }

  /// The body exactly as received
  pub fn text(&self) -> &str {
    &self.body
  }

  /// Produce the representation selected by `format`
  pub fn materialize(self, format: ReturnFormat) -> ApiResult<Materialized<T>> {
    Ok(materialize(self.body, format, self.mapper)?)
  }

  /// Map the body into the endpoint's entity type
  pub fn into_object(self) -> ApiResult<T> {
    let document = parse_document(&self.body)?;
    Ok((self.mapper)(&document)?)
  }

  /// Parse the body without mapping it
  pub fn into_json(self) -> ApiResult<Value> {
    Ok(parse_document(&self.body)?)
  }

  pub fn into_text(self) -> String {
    self.body
  }
}

impl<T> fmt::Debug for ApiResponse<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ApiResponse")
      .field("status", &self.status)
      .field("body", &self.body)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use ghrest_core::map_entity;
  use serde_json::json;

  use super::*;
  use crate::error::ApiError;
  use crate::models::User;

  #[test]
  fn test_into_object_maps_entity() {
    let response = ApiResponse::new(200, r#"{"login":"octocat","id":1}"#.to_string(), map_entity::<User>);
    let user = response.into_object().unwrap();
    assert_eq!(user.login, "octocat");
    assert_eq!(user.id, 1);
  }

  #[test]
  fn test_text_survives_mapping_failure() {
    let body = r#"{"login": 5}"#.to_string();
    let response = ApiResponse::new(200, body.clone(), map_entity::<User>);
    assert_eq!(response.text(), body);

    let error = response.into_object().unwrap_err();
    assert!(matches!(error, ApiError::Mapping(_)));
  }

  #[test]
  fn test_materialize_json_skips_mapping() {
    let response = ApiResponse::new(200, r#"{"login": 5}"#.to_string(), map_entity::<User>);
    let materialized = response.materialize(ReturnFormat::Json).unwrap();
    assert_eq!(materialized.as_json(), Some(&json!({"login": 5})));
  }
}
