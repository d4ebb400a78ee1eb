//! # GitHub API Client
//!
//! Blocking GitHub REST API client. Each resource group is exposed as a
//! manager borrowed from [`GitHubClient`]; read operations return an
//! [`ApiResponse`] that can be materialized as text, JSON or typed entities,
//! and status-only mutations return an [`ActionOutcome`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod ids;
pub mod models;
pub mod outcome;
pub mod request;
pub mod response;
pub mod transport;

// Re-export the client
pub use client::{GitHubClient, create_github_client};
// Re-export the materialization core
pub use ghrest_core::{ClientSettings, Materialized, Page, ReturnFormat};
pub use error::{ApiError, ApiResult, TransportError};
pub use ids::{
  AccountId, BranchName, CodespaceName, DeliveryId, DeploymentId, EnvironmentName, HookId, IssueNumber, PlanId,
  RepoRef, RepoRefError, RunId, ThreadId, Username, WorkflowRef,
};
pub use outcome::{ActionFailure, ActionOutcome, FailureReason};
pub use request::{ApiRequest, Pagination, Query};
pub use response::ApiResponse;
pub use transport::{HttpTransport, RawResponse, Transport};
