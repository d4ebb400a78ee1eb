//! # Notifications Command
//!
//! Reads and clears the notification inbox of the authenticated user.

use anyhow::Result;
use clap::{Args, Subcommand};
use ghrest_client::endpoints::ListNotificationsOptions;
use ghrest_client::{Pagination, RepoRef, ThreadId};
use owo_colors::OwoColorize;

use super::{GlobalArgs, parse_repo};
use crate::clients::create_client;
use crate::output::{emit, format_name, format_timestamp, print_info, report};

/// Command for notifications
#[derive(Args)]
pub struct NotificationsArgs {
  #[command(subcommand)]
  pub subcommand: NotificationsSubcommands,
}

#[derive(Subcommand)]
pub enum NotificationsSubcommands {
  /// List notification threads
  #[command(alias = "ls")]
  List {
    /// Include threads already marked as read
    #[arg(long)]
    all: bool,

    /// Only threads you participate in or are mentioned in
    #[arg(long)]
    participating: bool,

    /// Only threads of this repository
    #[arg(long, short = 'R', value_name = "OWNER/NAME", value_parser = parse_repo)]
    repo: Option<RepoRef>,

    /// Results per page
    #[arg(long, short = 'n')]
    limit: Option<u32>,
  },

  /// Mark every notification (or every one in a repository) as read
  Read {
    #[arg(long, short = 'R', value_name = "OWNER/NAME", value_parser = parse_repo)]
    repo: Option<RepoRef>,

    /// Only mark notifications last updated before this ISO 8601 timestamp
    #[arg(long, value_name = "TIMESTAMP")]
    before: Option<String>,
  },

  /// Mark one thread as read
  ReadThread { thread: ThreadId },

  /// Mark one thread as done
  Done { thread: ThreadId },
}

pub(crate) fn handle_notifications_command(global: &GlobalArgs, args: NotificationsArgs) -> Result<()> {
  let client = create_client(global)?;
  let notifications = client.notifications();

  match args.subcommand {
    NotificationsSubcommands::List {
      all,
      participating,
      repo,
      limit,
    } => {
      let options = ListNotificationsOptions {
        all,
        participating,
        pagination: Pagination {
          per_page: limit,
          page: None,
        },
        ..ListNotificationsOptions::default()
      };
      let response = match &repo {
        Some(repo) => notifications.list_for_repository(repo, &options)?,
        None => notifications.list(&options)?,
      };
      emit(response, global.format, |threads| {
        if threads.is_empty() {
          print_info("No notifications");
        }
        for thread in &threads {
          let dot = if thread.unread { "●".blue().to_string() } else { " ".to_string() };
          println!(
            "{} {} {} {} {}",
            dot,
            format!("#{}", thread.id).bright_black(),
            format_name(&thread.repository.full_name),
            thread.subject.title,
            format_timestamp(&thread.updated_at)
          );
          println!("    {} · {}", thread.subject.kind, thread.reason.bright_black());
        }
      })
    }
    NotificationsSubcommands::Read { repo, before } => match &repo {
      Some(repo) => report(
        notifications.mark_repository_as_read(repo, before.as_deref()),
        &format!("Marked notifications in {repo} as read"),
      ),
      None => report(
        notifications.mark_as_read(before.as_deref()),
        "Marked all notifications as read",
      ),
    },
    NotificationsSubcommands::ReadThread { thread } => {
      let message = format!("Marked thread {thread} as read");
      report(notifications.mark_thread_as_read(thread), &message)
    }
    NotificationsSubcommands::Done { thread } => {
      let message = format!("Marked thread {thread} as done");
      report(notifications.mark_thread_as_done(thread), &message)
    }
  }
}
