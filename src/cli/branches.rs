//! # Branches Command

use anyhow::Result;
use clap::{Args, Subcommand};
use ghrest_client::endpoints::ListBranchesOptions;
use ghrest_client::{BranchName, Pagination};
use owo_colors::OwoColorize;

use super::{GlobalArgs, RepoArgs};
use crate::clients::create_client;
use crate::output::{emit, format_name, print_info};

/// Command for repository branches
#[derive(Args)]
pub struct BranchesArgs {
  #[command(flatten)]
  pub repo: RepoArgs,

  #[command(subcommand)]
  pub subcommand: BranchesSubcommands,
}

#[derive(Subcommand)]
pub enum BranchesSubcommands {
  /// List branches
  #[command(alias = "ls")]
  List {
    /// Only protected branches
    #[arg(long)]
    protected: bool,

    /// Results per page
    #[arg(long, short = 'n')]
    limit: Option<u32>,
  },

  /// Show one branch with its tip commit
  Get { branch: BranchName },
}

pub(crate) fn handle_branches_command(global: &GlobalArgs, args: BranchesArgs) -> Result<()> {
  let client = create_client(global)?;
  let branches = client.branches();
  let repo = &args.repo.repo;

  match args.subcommand {
    BranchesSubcommands::List { protected, limit } => {
      let options = ListBranchesOptions {
        protected: protected.then_some(true),
        pagination: Pagination {
          per_page: limit,
          page: None,
        },
      };
      emit(branches.list(repo, &options)?, global.format, |list| {
        if list.is_empty() {
          print_info(&format!("No branches found in {repo}"));
        }
        for branch in &list {
          let marker = if branch.protected { " (protected)" } else { "" };
          println!(
            "{}{} {}",
            format_name(&branch.name),
            marker.yellow(),
            short_sha(&branch.commit.sha).bright_black()
          );
        }
      })
    }
    BranchesSubcommands::Get { branch } => emit(branches.get(repo, branch)?, global.format, |branch| {
      println!("{} {}", format_name(&branch.name), short_sha(&branch.commit.sha).bright_black());
      if let Some(detail) = &branch.commit.commit {
        println!("  {}", detail.summary());
      }
      println!("  Protected: {}", if branch.protected { "yes" } else { "no" });
    }),
  }
}

fn short_sha(sha: &str) -> &str {
  &sha[..sha.len().min(7)]
}
