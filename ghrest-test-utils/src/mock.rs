//! Mock GitHub server for blocking clients
//!
//! The ghrest client is synchronous, and a blocking HTTP client must not run
//! inside an async runtime. [`MockGitHub`] owns its own tokio runtime, uses it
//! only to start the wiremock server and mount mocks, and leaves the test
//! thread free to issue blocking requests.

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

/// A wiremock server plus the runtime used to drive its setup
pub struct MockGitHub {
  // Declared before the runtime so the server shuts down first.
  server: MockServer,
  runtime: Runtime,
}

impl MockGitHub {
  /// Start a new mock server
  pub fn start() -> Self {
    let runtime = Runtime::new().expect("Failed to create tokio runtime for mock server");
    let server = runtime.block_on(MockServer::start());
    Self { server, runtime }
  }

  /// Base URI to point a client at
  pub fn uri(&self) -> String {
    self.server.uri()
  }

  /// Mount a mock on the server
  pub fn mount(&self, mock: Mock) {
    self.runtime.block_on(mock.mount(&self.server));
  }

  /// Requests the server has seen so far
  pub fn received_requests(&self) -> Vec<Request> {
    self
      .runtime
      .block_on(self.server.received_requests())
      .unwrap_or_default()
  }

  /// The single request the server has seen, panicking otherwise
  pub fn only_request(&self) -> Request {
    let mut requests = self.received_requests();
    assert_eq!(requests.len(), 1, "expected exactly one request, got {}", requests.len());
    requests.remove(0)
  }
}
