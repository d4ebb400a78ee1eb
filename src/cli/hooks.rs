//! # Webhooks Command

use anyhow::Result;
use clap::{Args, Subcommand};
use ghrest_client::{DeliveryId, HookId, Pagination};
use owo_colors::OwoColorize;

use super::{GlobalArgs, RepoArgs};
use crate::clients::create_client;
use crate::output::{emit, format_timestamp, format_url, print_info, report};

/// Command for repository webhooks
#[derive(Args)]
pub struct HooksArgs {
  #[command(flatten)]
  pub repo: RepoArgs,

  #[command(subcommand)]
  pub subcommand: HooksSubcommands,
}

#[derive(Subcommand)]
pub enum HooksSubcommands {
  /// List webhooks
  #[command(alias = "ls")]
  List,

  /// Send a ping event to a webhook
  Ping { hook: HookId },

  /// Show recent deliveries of a webhook
  Deliveries {
    hook: HookId,

    #[arg(long, short = 'n')]
    limit: Option<u32>,
  },

  /// Redeliver one delivery
  Redeliver { hook: HookId, delivery: DeliveryId },
}

pub(crate) fn handle_hooks_command(global: &GlobalArgs, args: HooksArgs) -> Result<()> {
  let client = create_client(global)?;
  let hooks = client.webhooks();
  let repo = &args.repo.repo;

  match args.subcommand {
    HooksSubcommands::List => emit(hooks.list(repo, Pagination::default())?, global.format, |list| {
      if list.is_empty() {
        print_info(&format!("No webhooks configured in {repo}"));
      }
      for hook in &list {
        let state = if hook.active { "active".green().to_string() } else { "inactive".yellow().to_string() };
        println!(
          "{} {} {} [{}]",
          format!("#{}", hook.id).bright_black(),
          format_url(&hook.config.url),
          state,
          hook.events.join(", ")
        );
      }
    }),
    HooksSubcommands::Ping { hook } => report(hooks.ping(repo, hook), &format!("Pinged webhook {hook}")),
    HooksSubcommands::Deliveries { hook, limit } => {
      let pagination = Pagination {
        per_page: limit,
        page: None,
      };
      emit(hooks.list_deliveries(repo, hook, pagination)?, global.format, |deliveries| {
        for delivery in &deliveries {
          let code = if (200..300).contains(&delivery.status_code) {
            delivery.status_code.green().to_string()
          } else {
            delivery.status_code.red().to_string()
          };
          println!(
            "{} {} {} {} {:.2}s",
            format!("#{}", delivery.id).bright_black(),
            code,
            delivery.event,
            format_timestamp(&delivery.delivered_at),
            delivery.duration
          );
        }
      })
    }
    HooksSubcommands::Redeliver { hook, delivery } => report(
      hooks.redeliver(repo, hook, delivery),
      &format!("Queued redelivery of {delivery} for webhook {hook}"),
    ),
  }
}
