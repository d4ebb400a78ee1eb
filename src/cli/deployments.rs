//! # Deployments Command

use anyhow::Result;
use clap::{Args, Subcommand};
use ghrest_client::endpoints::ListDeploymentsOptions;
use ghrest_client::models::{Environment, ProtectionRule};
use ghrest_client::{DeploymentId, EnvironmentName, Pagination};
use owo_colors::OwoColorize;

use super::{GlobalArgs, RepoArgs};
use crate::clients::create_client;
use crate::output::{emit, format_name, format_timestamp, format_url, print_info};

/// Command for deployments and environments
#[derive(Args)]
pub struct DeploymentsArgs {
  #[command(flatten)]
  pub repo: RepoArgs,

  #[command(subcommand)]
  pub subcommand: DeploymentsSubcommands,
}

#[derive(Subcommand)]
pub enum DeploymentsSubcommands {
  /// List deployments, newest first
  #[command(alias = "ls")]
  List {
    /// Only deployments to this environment
    #[arg(long, short = 'e')]
    environment: Option<String>,

    /// Only deployments of this ref
    #[arg(long = "ref", value_name = "REF")]
    git_ref: Option<String>,

    #[arg(long, short = 'n')]
    limit: Option<u32>,
  },

  /// Show the status history of a deployment
  Statuses { deployment: DeploymentId },

  /// List environments, or show one with its protection rules
  #[command(alias = "env")]
  Environment { name: Option<EnvironmentName> },
}

pub(crate) fn handle_deployments_command(global: &GlobalArgs, args: DeploymentsArgs) -> Result<()> {
  let client = create_client(global)?;
  let deployments = client.deployments();
  let repo = &args.repo.repo;

  match args.subcommand {
    DeploymentsSubcommands::List {
      environment,
      git_ref,
      limit,
    } => {
      let options = ListDeploymentsOptions {
        environment,
        git_ref,
        pagination: Pagination {
          per_page: limit,
          page: None,
        },
        ..ListDeploymentsOptions::default()
      };
      emit(deployments.list(repo, &options)?, global.format, |list| {
        if list.is_empty() {
          print_info(&format!("No deployments found in {repo}"));
        }
        for deployment in &list {
          println!(
            "{} {} {} {} {}",
            format!("#{}", deployment.id).bright_black(),
            format_name(&deployment.environment),
            deployment.git_ref.cyan(),
            deployment.creator.as_ref().map_or("ghost", |creator| creator.login.as_str()),
            format_timestamp(&deployment.created_at)
          );
        }
      })
    }
    DeploymentsSubcommands::Statuses { deployment } => emit(
      deployments.list_statuses(repo, deployment, Pagination::default())?,
      global.format,
      |statuses| {
        for status in &statuses {
          println!(
            "{} {} {}",
            status.state.bold(),
            format_timestamp(&status.created_at),
            status.description
          );
        }
      },
    ),
    DeploymentsSubcommands::Environment { name: Some(name) } => {
      emit(deployments.get_environment(repo, name)?, global.format, |environment| {
        print_environment(&environment);
      })
    }
    DeploymentsSubcommands::Environment { name: None } => emit(
      deployments.list_environments(repo, Pagination::default())?,
      global.format,
      |page| {
        if page.is_empty() {
          print_info(&format!("No environments configured in {repo}"));
        }
        for environment in &page {
          print_environment(environment);
        }
      },
    ),
  }
}

fn print_environment(environment: &Environment) {
  println!("{}", format_name(&environment.name));
  for rule in &environment.protection_rules {
    match rule {
      ProtectionRule::RequiredReviewers { .. } => {}
      ProtectionRule::WaitTimer { wait_timer, .. } => println!("  Wait timer: {wait_timer} minute(s)"),
      ProtectionRule::BranchPolicy { .. } => println!("  Deployment branch policy"),
      ProtectionRule::Other { kind, .. } => println!("  Protection rule: {kind}"),
    }
  }
  let reviewers: Vec<&str> = environment.required_reviewers().map(|r| r.handle()).collect();
  if !reviewers.is_empty() {
    println!("  Required reviewers: {}", reviewers.join(", "));
  }
  println!("  {}", format_url(&environment.html_url));
}
