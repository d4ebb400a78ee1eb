//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the ghrest tool. Every
//! API command honours the global `--format` flag.

mod assignees;
mod branches;
mod codespaces;
mod config;
mod deployments;
mod hooks;
mod notifications;
mod runs;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};
use ghrest_client::{RepoRef, ReturnFormat};
use owo_colors::OwoColorize;

use crate::clients::create_client;
use crate::output::{ColorMode, emit, format_name, format_url};

/// Top-level CLI command for the ghrest tool
#[derive(Parser)]
#[command(name = "ghrest")]
#[command(display_name = "🐙 ghrest")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "A typed command-line client for the GitHub REST API")]
#[command(long_about = "ghrest talks to the GitHub REST API and prints responses as text, JSON or\n\
        mapped objects.\n\n\
        It covers workflow runs, branches, notifications, deployments, webhooks,\n\
        assignees and codespaces. Tokens are read from --token, the config file,\n\
        GITHUB_TOKEN/GH_TOKEN or ~/.netrc, in that order.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  #[command(flatten)]
  pub global: GlobalArgs,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
  /// Controls when colored output is used
  #[arg(long, value_enum, ignore_case = true, default_value_t = ColorMode::Auto, global = true)]
  pub colors: ColorMode,

  /// Output format: text (body as received), json or object
  #[arg(long, short = 'f', default_value_t = ReturnFormat::Object, global = true)]
  pub format: ReturnFormat,

  /// GitHub access token (overrides config, environment and .netrc)
  #[arg(long, global = true)]
  pub token: Option<String>,

  /// Root of the REST API, e.g. https://ghe.example.com/api/v3
  #[arg(long, value_name = "URL", global = true)]
  pub base_url: Option<String>,

  /// Request timeout in seconds
  #[arg(long, value_name = "SECONDS", global = true, value_parser = clap::value_parser!(u64).range(1..))]
  pub timeout: Option<u64>,

  /// Directory holding config.toml
  #[arg(long, value_name = "PATH", global = true)]
  pub config_dir: Option<PathBuf>,
}

/// `--repo owner/name`
#[derive(Args, Debug, Clone)]
pub struct RepoArgs {
  /// Repository as owner/name or a GitHub URL
  #[arg(long, short = 'R', value_name = "OWNER/NAME", value_parser = parse_repo)]
  pub repo: RepoRef,
}

/// Accept `owner/name` or any GitHub URL pointing into the repository
fn parse_repo(value: &str) -> Result<RepoRef, String> {
  value
    .parse::<RepoRef>()
    .or_else(|_| RepoRef::from_url(value))
    .map_err(|e| e.to_string())
}

/// Subcommands for the ghrest tool
#[derive(Subcommand)]
pub enum Commands {
  /// Show the authenticated user
  #[command(long_about = "Fetches the user the configured token belongs to.\n\n\
            Use this to verify that your credentials are picked up correctly.")]
  Whoami,

  /// GitHub Actions workflow runs
  #[command(alias = "run")]
  Runs(runs::RunsArgs),

  /// Repository branches
  #[command(alias = "br")]
  Branches(branches::BranchesArgs),

  /// Notification inbox
  #[command(alias = "notif")]
  Notifications(notifications::NotificationsArgs),

  /// Deployments and environments
  #[command(alias = "deploy")]
  Deployments(deployments::DeploymentsArgs),

  /// Repository webhooks
  #[command(alias = "hook")]
  Hooks(hooks::HooksArgs),

  /// Issue assignees
  Assignees(assignees::AssigneesArgs),

  /// Codespaces of the authenticated user
  #[command(alias = "cs")]
  Codespaces(codespaces::CodespacesArgs),

  /// Show or create the configuration file
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),

  /// Show version and build information
  Version,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.global.colors.apply();

  let global = &cli.global;
  match cli.command {
    Commands::Whoami => handle_whoami(global),
    Commands::Runs(runs) => runs::handle_runs_command(global, runs),
    Commands::Branches(branches) => branches::handle_branches_command(global, branches),
    Commands::Notifications(notifications) => notifications::handle_notifications_command(global, notifications),
    Commands::Deployments(deployments) => deployments::handle_deployments_command(global, deployments),
    Commands::Hooks(hooks) => hooks::handle_hooks_command(global, hooks),
    Commands::Assignees(assignees) => assignees::handle_assignees_command(global, assignees),
    Commands::Codespaces(codespaces) => codespaces::handle_codespaces_command(global, codespaces),
    Commands::Config(config) => config::handle_config_command(global, config),
    Commands::Version => {
      handle_version();
      Ok(())
    }
  }
}

fn handle_whoami(global: &GlobalArgs) -> Result<()> {
  let client = create_client(global)?;
  let response = client.users().current_user()?;

  emit(response, global.format, |user| {
    println!("{} {}", format_name(&user.login), format!("#{}", user.id).bright_black());
    if let Some(name) = &user.name {
      println!("  Name: {name}");
    }
    if let Some(company) = &user.company {
      println!("  Company: {company}");
    }
    println!("  Public repos: {}", user.public_repos);
    println!("  Followers: {} / Following: {}", user.followers, user.following);
    println!("  {}", format_url(&user.html_url));
  })
}

fn handle_version() {
  println!("ghrest {}", env!("CARGO_PKG_VERSION"));
  println!("  commit: {}", option_env!("GIT_HASH").filter(|h| !h.is_empty()).unwrap_or("unknown"));
  println!("  target: {}", option_env!("TARGET").unwrap_or("unknown"));
  if let Some(timestamp) = option_env!("BUILD_TIMESTAMP") {
    println!("  built: {timestamp}");
  }
}
