//! # GitHub API Endpoints
//!
//! One manager per resource group. Managers borrow the client, build the
//! request for each REST endpoint and hand the response back unmaterialized
//! (read operations) or as an [`crate::ActionOutcome`] (status-only
//! mutations).

pub mod assignees;
pub mod branches;
pub mod codespaces;
pub mod deployments;
pub mod marketplace;
pub mod notifications;
pub mod users;
pub mod webhooks;
pub mod workflow_runs;
pub mod workflows;

pub use assignees::AssigneesManager;
pub use branches::{BranchesManager, ListBranchesOptions};
pub use codespaces::{CodespacesManager, CreateCodespaceParams};
pub use deployments::{
  CreateDeploymentParams, CreateDeploymentStatusParams, DeploymentsManager, ListDeploymentsOptions,
};
pub use marketplace::{ListAccountsOptions, MarketplaceManager};
pub use notifications::{ListNotificationsOptions, NotificationsManager};
pub use users::UsersManager;
pub use webhooks::{CreateWebhookParams, UpdateWebhookParams, WebhookConfigParams, WebhooksManager};
pub use workflow_runs::{ListJobsOptions, ListRunsOptions, ReviewPendingDeploymentsParams, WorkflowRunsManager};
pub use workflows::{DispatchWorkflowParams, WorkflowsManager};
