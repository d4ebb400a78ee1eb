//! Constants shared across ghrest components.

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("ghrest/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github+json";

/// REST API version requested through the `X-GitHub-Api-Version` header
pub const API_VERSION: &str = "2022-11-28";

/// Header carrying the requested REST API version
pub const API_VERSION_HEADER: &str = "x-github-api-version";

/// Per-request timeout used when the configuration does not set one
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Prefix for error messages produced by the client
pub const DEFAULT_ERROR_PREFIX: &str = "GitHub API request failed";

/// Environment variables consulted for an access token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// `.netrc` machines consulted for an access token, in order.
pub const NETRC_MACHINES: [&str; 2] = ["api.github.com", "github.com"];
