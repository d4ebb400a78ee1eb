//! # GitHub Data Models
//!
//! Immutable records for the payloads GitHub returns. Every entity implements
//! [`ghrest_core::FromJson`] and serializes back with the wire's field names.
//! Timestamps are kept as the ISO-8601 strings GitHub sends; use
//! [`parse_timestamp`] when a typed value is needed.

mod actions;
mod branch;
mod codespace;
mod deployment;
mod issue;
mod marketplace;
mod notification;
mod repository;
mod user;
mod webhook;

use chrono::{DateTime, Utc};
pub use actions::{
  ApprovalState, EnvironmentApproval, HeadCommit, Job, JobRunUsage, PendingDeployment, PullRequestBranch,
  PullRequestRef, RepoPointer, RunBillable, RunnerEnvironment, Step, Workflow, WorkflowBillable, WorkflowRun,
  WorkflowRunUsage, WorkflowUsage,
};
pub use branch::{Branch, BranchCommit, BranchProtection, CommitDetail, CommitPointer, MergeUpstreamResult, StatusChecks};
pub use codespace::{Codespace, CodespaceMachine, GitStatus};
pub use deployment::{
  Deployment, DeploymentBranchPolicy, DeploymentStatus, Environment, EnvironmentSummary, ProtectionRule,
};
pub use issue::{Issue, Label};
pub use marketplace::{AccountRef, MarketplaceAccount, MarketplacePurchase, PendingChange, Plan};
pub use notification::{Notification, NotificationSubject, ThreadSubscription};
pub use repository::{GitActor, RepositorySummary};
pub use user::{Reviewer, ReviewerType, Team, User};
pub use webhook::{HookDelivery, HookResponse, InsecureSsl, Webhook, WebhookConfig};

/// Parse a GitHub timestamp (`2020-01-22T19:33:08Z`). Empty or malformed
/// strings yield `None`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(value)
    .ok()
    .map(|time| time.with_timezone(&Utc))
}
