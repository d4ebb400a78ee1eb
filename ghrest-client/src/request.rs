//! Request descriptions handed to the transport.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// One REST call: verb, path segments (joined and percent-encoded by the
/// transport), query pairs and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub segments: Vec<String>,
  pub query: Vec<(String, String)>,
  pub body: Option<Value>,
}

impl ApiRequest {
  pub fn new(method: Method, segments: &[&str]) -> Self {
    Self {
      method,
      segments: segments.iter().map(|s| s.to_string()).collect(),
      query: Vec::new(),
      body: None,
    }
  }

  pub fn get(segments: &[&str]) -> Self {
    Self::new(Method::GET, segments)
  }

  pub fn post(segments: &[&str]) -> Self {
    Self::new(Method::POST, segments)
  }

  pub fn put(segments: &[&str]) -> Self {
    Self::new(Method::PUT, segments)
  }

  pub fn patch(segments: &[&str]) -> Self {
    Self::new(Method::PATCH, segments)
  }

  pub fn delete(segments: &[&str]) -> Self {
    Self::new(Method::DELETE, segments)
  }

  #[must_use]
  pub fn with_query(mut self, query: Query) -> Self {
    self.query = query.pairs;
    self
  }

  /// Attach a JSON body
  pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
    self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
    Ok(self)
  }

  /// Unencoded path, for logs and error messages
  pub fn path(&self) -> String {
    format!("/{}", self.segments.join("/"))
  }

  /// `METHOD /path`, for logs and error messages
  pub fn describe(&self) -> String {
    format!("{} {}", self.method, self.path())
  }
}

/// Builder for query-string pairs. `None` values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
  pairs: Vec<(String, String)>,
}

impl Query {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn push(mut self, key: &str, value: impl ToString) -> Self {
    self.pairs.push((key.to_string(), value.to_string()));
    self
  }

  #[must_use]
  pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
    match value {
      Some(value) => self.push(key, value),
      None => self,
    }
  }

  #[must_use]
  pub fn pagination(self, pagination: &Pagination) -> Self {
    self
      .push_opt("per_page", pagination.per_page)
      .push_opt("page", pagination.page)
  }

  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }

  pub fn pairs(&self) -> &[(String, String)] {
    &self.pairs
  }
}

/// Page selection shared by list endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
  /// Results per page (GitHub caps this at 100)
  pub per_page: Option<u32>,
  /// 1-based page number
  pub page: Option<u32>,
}

impl Pagination {
  pub const fn new(per_page: u32, page: u32) -> Self {
    Self {
      per_page: Some(per_page),
      page: Some(page),
    }
  }

  pub const fn page(page: u32) -> Self {
    Self {
      per_page: None,
      page: Some(page),
    }
  }

  pub const fn per_page(per_page: u32) -> Self {
    Self {
      per_page: Some(per_page),
      page: None,
    }
  }
}
