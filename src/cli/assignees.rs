//! # Assignees Command

use anyhow::Result;
use clap::{Args, Subcommand};
use ghrest_client::models::Issue;
use ghrest_client::{IssueNumber, Pagination, Username};

use super::{GlobalArgs, RepoArgs};
use crate::clients::create_client;
use crate::output::{emit, format_name, report};

/// Command for issue assignees
#[derive(Args)]
pub struct AssigneesArgs {
  #[command(flatten)]
  pub repo: RepoArgs,

  #[command(subcommand)]
  pub subcommand: AssigneesSubcommands,
}

#[derive(Subcommand)]
pub enum AssigneesSubcommands {
  /// List users that can be assigned to issues
  #[command(alias = "ls")]
  List,

  /// Check whether a user can be assigned
  Check {
    user: Username,

    /// Check against one issue instead of the repository
    #[arg(long)]
    issue: Option<IssueNumber>,
  },

  /// Assign users to an issue
  Add {
    issue: IssueNumber,
    #[arg(required = true)]
    users: Vec<String>,
  },

  /// Remove assignees from an issue
  Remove {
    issue: IssueNumber,
    #[arg(required = true)]
    users: Vec<String>,
  },
}

pub(crate) fn handle_assignees_command(global: &GlobalArgs, args: AssigneesArgs) -> Result<()> {
  let client = create_client(global)?;
  let assignees = client.assignees();
  let repo = &args.repo.repo;

  match args.subcommand {
    AssigneesSubcommands::List => emit(assignees.list(repo, Pagination::default())?, global.format, |users| {
      for user in &users {
        println!("{}", format_name(&user.login));
      }
    }),
    AssigneesSubcommands::Check { user, issue } => {
      let message = format!("{user} can be assigned");
      let outcome = match issue {
        Some(issue) => assignees.check_for_issue(repo, issue, user),
        None => assignees.check(repo, user),
      };
      report(outcome, &message)
    }
    AssigneesSubcommands::Add { issue, users } => {
      let logins: Vec<&str> = users.iter().map(String::as_str).collect();
      emit(assignees.add(repo, issue, &logins)?, global.format, print_assignees)
    }
    AssigneesSubcommands::Remove { issue, users } => {
      let logins: Vec<&str> = users.iter().map(String::as_str).collect();
      emit(assignees.remove(repo, issue, &logins)?, global.format, print_assignees)
    }
  }
}

fn print_assignees(issue: Issue) {
  let logins: Vec<&str> = issue.assignees.iter().map(|u| u.login.as_str()).collect();
  println!("#{} {}", issue.number, issue.title);
  println!("  Assignees: {}", if logins.is_empty() { "none".to_string() } else { logins.join(", ") });
}
