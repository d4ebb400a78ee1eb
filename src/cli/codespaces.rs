//! # Codespaces Command

use anyhow::Result;
use clap::{Args, Subcommand};
use ghrest_client::models::Codespace;
use ghrest_client::{CodespaceName, Pagination, RepoRef};
use owo_colors::OwoColorize;

use super::{GlobalArgs, parse_repo};
use crate::clients::create_client;
use crate::output::{emit, format_name, format_timestamp, print_info, report};

/// Command for codespaces
#[derive(Args)]
pub struct CodespacesArgs {
  #[command(subcommand)]
  pub subcommand: CodespacesSubcommands,
}

#[derive(Subcommand)]
pub enum CodespacesSubcommands {
  /// List your codespaces
  #[command(alias = "ls")]
  List {
    /// Only codespaces of this repository
    #[arg(long, short = 'R', value_name = "OWNER/NAME", value_parser = parse_repo)]
    repo: Option<RepoRef>,
  },

  /// Start a codespace
  Start { name: CodespaceName },

  /// Stop a running codespace
  Stop { name: CodespaceName },

  /// Delete a codespace
  #[command(alias = "rm")]
  Delete { name: CodespaceName },
}

pub(crate) fn handle_codespaces_command(global: &GlobalArgs, args: CodespacesArgs) -> Result<()> {
  let client = create_client(global)?;
  let codespaces = client.codespaces();

  match args.subcommand {
    CodespacesSubcommands::List { repo } => {
      let response = match &repo {
        Some(repo) => codespaces.list_for_repository(repo, Pagination::default())?,
        None => codespaces.list(Pagination::default())?,
      };
      emit(response, global.format, |page| {
        if page.is_empty() {
          print_info("No codespaces");
        }
        for codespace in &page {
          print_codespace(codespace);
        }
      })
    }
    CodespacesSubcommands::Start { name } => {
      emit(codespaces.start(name)?, global.format, |codespace| print_codespace(&codespace))
    }
    CodespacesSubcommands::Stop { name } => {
      emit(codespaces.stop(name)?, global.format, |codespace| print_codespace(&codespace))
    }
    CodespacesSubcommands::Delete { name } => {
      let message = format!("Deletion of {name} requested");
      report(codespaces.delete(name), &message)
    }
  }
}

fn print_codespace(codespace: &Codespace) {
  println!(
    "{} {} {} {}",
    format_name(&codespace.name),
    codespace.state.yellow(),
    codespace.repository.full_name,
    format_timestamp(&codespace.last_used_at)
  );
  if let Some(display_name) = &codespace.display_name {
    println!("  {}", display_name.bright_black());
  }
}
