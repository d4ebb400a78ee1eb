//! # HTTP Transport
//!
//! The collaborator that turns an [`ApiRequest`] into one blocking HTTP call
//! and hands back the status and body untouched. It also remembers the last
//! exchange so failed actions can be inspected after the fact.

use std::sync::{Mutex, PoisonError};

use ghrest_core::ClientSettings;
use ghrest_core::consts::{ACCEPT, API_VERSION_HEADER};
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, trace};
use url::Url;

use crate::error::TransportError;
use crate::request::ApiRequest;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
  pub status: u16,
  pub body: String,
}

impl RawResponse {
  pub fn new(status: u16, body: impl Into<String>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  pub const fn is_success(&self) -> bool {
    self.status >= 200 && self.status < 300
  }
}

/// Sends requests on behalf of a [`crate::GitHubClient`].
pub trait Transport: Send + Sync {
  fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;

  /// Status of the most recent exchange (`None` before the first one, or when
  /// it never produced a response)
  fn last_status(&self) -> Option<u16>;

  /// Body of the most recent exchange when it was not a 2xx
  fn last_error_body(&self) -> Option<String>;
}

#[derive(Debug, Default)]
struct LastExchange {
  status: Option<u16>,
  error_body: Option<String>,
}

/// [`Transport`] backed by a blocking reqwest client
#[derive(Debug)]
pub struct HttpTransport {
  client: Client,
  base_url: Url,
  token: Option<String>,
  last: Mutex<LastExchange>,
}

impl HttpTransport {
  pub fn new(settings: &ClientSettings) -> Result<Self, TransportError> {
    let base_url = Url::parse(&settings.base_url).map_err(|e| TransportError::InvalidBaseUrl {
      url: settings.base_url.clone(),
      reason: e.to_string(),
    })?;
    if base_url.cannot_be_a_base() {
      return Err(TransportError::InvalidBaseUrl {
        url: settings.base_url.clone(),
        reason: "URL cannot carry a path".to_string(),
      });
    }

    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
      HeaderName::from_static(API_VERSION_HEADER),
      HeaderValue::from_str(&settings.api_version).map_err(|e| TransportError::InvalidHeader {
        name: API_VERSION_HEADER,
        reason: e.to_string(),
      })?,
    );

    let client = Client::builder()
      .default_headers(headers)
      .user_agent(settings.user_agent.clone())
      .timeout(settings.timeout())
      .build()
      .map_err(TransportError::Build)?;

    Ok(Self {
      client,
      base_url,
      token: settings.token.clone().filter(|t| !t.is_empty()),
      last: Mutex::new(LastExchange::default()),
    })
  }

  /// Base URL with the request's segments appended (each percent-encoded)
  /// and its query attached.
  pub fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|()| TransportError::InvalidBaseUrl {
        url: self.base_url.to_string(),
        reason: "URL cannot carry a path".to_string(),
      })?
      .pop_if_empty()
      .extend(&request.segments);

    if !request.query.is_empty() {
      url.query_pairs_mut().extend_pairs(&request.query);
    }

    Ok(url)
  }

  fn record(&self, status: Option<u16>, error_body: Option<String>) {
    let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
    last.status = status;
    last.error_body = error_body;
  }
}

impl Transport for HttpTransport {
  fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
    let url = self.url_for(request)?;
    debug!("{} {}", request.method, url.path());
    trace!("Full URL: {}", url);

    let mut builder = self.client.request(request.method.clone(), url.clone());
    if let Some(token) = &self.token {
      builder = builder.bearer_auth(token);
    }
    if let Some(body) = &request.body {
      trace!("Request body: {}", body);
      builder = builder.json(body);
    }

    let response = builder.send().map_err(|source| {
      self.record(None, None);
      TransportError::Send {
        method: request.method.to_string(),
        url: url.to_string(),
        source,
      }
    })?;

    let status = response.status().as_u16();
    let body = response.text().map_err(|source| {
      self.record(Some(status), None);
      TransportError::Body {
        url: url.to_string(),
        source,
      }
    })?;

    debug!("{} {} -> {}", request.method, url.path(), status);
    trace!("Response body: {}", body);

    let raw = RawResponse::new(status, body);
    self.record(Some(status), (!raw.is_success()).then(|| raw.body.clone()));
    Ok(raw)
  }

  fn last_status(&self) -> Option<u16> {
    self.last.lock().unwrap_or_else(PoisonError::into_inner).status
  }

  fn last_error_body(&self) -> Option<String> {
    self
      .last
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .error_body
      .clone()
  }
}
