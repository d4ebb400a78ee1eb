//! # Workflow Runs Command
//!
//! Lists, inspects and controls GitHub Actions workflow runs.

use anyhow::Result;
use clap::{Args, Subcommand};
use ghrest_client::endpoints::{ListJobsOptions, ListRunsOptions};
use ghrest_client::models::{RunnerEnvironment, WorkflowRun};
use ghrest_client::{Pagination, RunId, WorkflowRef};
use owo_colors::OwoColorize;

use super::{GlobalArgs, RepoArgs};
use crate::clients::create_client;
use crate::output::{
  emit, format_duration_ms, format_name, format_run_status, format_timestamp, print_header, print_info, report,
};

/// Command for workflow runs
#[derive(Args)]
pub struct RunsArgs {
  #[command(flatten)]
  pub repo: RepoArgs,

  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: RunsSubcommands,
}

/// Subcommands for the runs command
#[derive(Subcommand)]
pub enum RunsSubcommands {
  /// List recent workflow runs
  #[command(alias = "ls")]
  List {
    /// Only runs of this workflow (id or file name such as ci.yml)
    #[arg(long, short = 'w')]
    workflow: Option<WorkflowRef>,

    /// Only runs on this branch
    #[arg(long, short = 'b')]
    branch: Option<String>,

    /// Only runs with this status or conclusion
    #[arg(long, short = 's')]
    status: Option<String>,

    /// Only runs triggered by this user
    #[arg(long)]
    actor: Option<String>,

    /// Only runs triggered by this event
    #[arg(long)]
    event: Option<String>,

    /// Results per page
    #[arg(long, short = 'n', default_value_t = 20)]
    limit: u32,

    /// Page number
    #[arg(long)]
    page: Option<u32>,
  },

  /// Show one workflow run
  Get {
    /// Run id
    run: RunId,
  },

  /// List the jobs of a run with their steps
  Jobs {
    run: RunId,

    /// Include jobs from every attempt, not just the latest
    #[arg(long)]
    all: bool,
  },

  /// Show billable time of a run
  Usage { run: RunId },

  /// Cancel a run
  Cancel { run: RunId },

  /// Re-run a run
  Rerun {
    run: RunId,

    /// Only re-run failed jobs
    #[arg(long)]
    failed: bool,
  },
}

/// Handle the runs command
pub(crate) fn handle_runs_command(global: &GlobalArgs, args: RunsArgs) -> Result<()> {
  let client = create_client(global)?;
  let runs = client.workflow_runs();
  let repo = &args.repo.repo;

  match args.subcommand {
    RunsSubcommands::List {
      workflow,
      branch,
      status,
      actor,
      event,
      limit,
      page,
    } => {
      let options = ListRunsOptions {
        actor,
        branch,
        event,
        status,
        pagination: Pagination {
          per_page: Some(limit),
          page,
        },
        ..ListRunsOptions::default()
      };
      let response = match workflow {
        Some(workflow) => runs.list_for_workflow(repo, workflow, &options)?,
        None => runs.list(repo, &options)?,
      };
      emit(response, global.format, |page| {
        if page.is_empty() {
          print_info(&format!("No workflow runs found in {repo}"));
          return;
        }
        for run in &page {
          print_run_line(run);
        }
        if page.has_more() {
          println!("{}", format!("Showing {} of {} runs", page.len(), page.total_count).bright_black());
        }
      })
    }
    RunsSubcommands::Get { run } => emit(runs.get(repo, run)?, global.format, |details| {
      print_run_line(&details);
      println!("  Title: {}", details.display_title);
      println!("  Event: {} by {}", details.event, format_name(&details.actor.login));
      println!("  Commit: {}", &details.head_sha[..details.head_sha.len().min(7)]);
      println!("  Started: {}", format_timestamp(&details.run_started_at));
      for pr in &details.pull_requests {
        println!("  Pull request: #{}", pr.number);
      }
      println!("  {}", details.html_url.bright_black());
    }),
    RunsSubcommands::Jobs { run, all } => {
      let options = ListJobsOptions {
        filter: all.then(|| "all".to_string()),
        ..ListJobsOptions::default()
      };
      emit(runs.list_jobs(repo, run, &options)?, global.format, |page| {
        for job in &page {
          println!(
            "{} {} {}",
            format_run_status(&job.status, job.conclusion.as_deref()),
            job.name.bold(),
            format!("#{}", job.id).bright_black()
          );
          for step in &job.steps {
            println!(
              "  {:>2}. {} {}",
              step.number,
              step.name,
              format_run_status(&step.status, step.conclusion.as_deref())
            );
          }
        }
      })
    }
    RunsSubcommands::Usage { run } => emit(runs.usage(repo, run)?, global.format, |usage| {
      print_header(&format!("Run {run}"));
      println!("  Duration: {}", format_duration_ms(usage.run_duration_ms));
      for environment in RunnerEnvironment::ALL {
        if let Some(billable) = usage.for_environment(environment) {
          println!(
            "  {}: {} across {} job(s)",
            environment,
            format_duration_ms(billable.total_ms),
            billable.jobs
          );
        }
      }
      println!("  Billable: {}", format_duration_ms(usage.total_billable_ms()));
    }),
    RunsSubcommands::Cancel { run } => report(runs.cancel(repo, run), &format!("Cancellation requested for run {run}")),
    RunsSubcommands::Rerun { run, failed } => {
      let outcome = if failed {
        runs.rerun_failed_jobs(repo, run)
      } else {
        runs.rerun(repo, run)
      };
      report(outcome, &format!("Re-run requested for run {run}"))
    }
  }
}

fn print_run_line(run: &WorkflowRun) {
  println!(
    "{} {} {} {} {}",
    format!("#{}", run.id).bright_black(),
    format_run_status(&run.status, run.conclusion.as_deref()),
    run.name.as_deref().unwrap_or("(unnamed)").bold(),
    run.head_branch.as_deref().unwrap_or("-").cyan(),
    format_timestamp(&run.created_at)
  );
}
