//! # Output Formatting
//!
//! Colored, emoji-prefixed messages for the terminal and the printer that
//! turns an API response into text, pretty JSON or one-line summaries
//! depending on `--format`.

use anyhow::{Result, anyhow};
use ghrest_client::{ActionOutcome, ApiResponse, Materialized, ReturnFormat};
use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Install the global owo-colors override for this mode
  pub fn apply(self) {
    match self {
      Self::Always | Self::Yes => owo_colors::set_override(true),
      Self::Never | Self::No => owo_colors::set_override(false),
      // Leave terminal detection to owo-colors
      Self::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format a repository or account name
pub fn format_name(name: &str) -> String {
  name.bright_cyan().bold().to_string()
}

/// Format a timestamp
pub fn format_timestamp(timestamp: &str) -> String {
  timestamp.yellow().to_string()
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.purple().to_string()
}

/// Format a URL
pub fn format_url(url: &str) -> String {
  url.bright_black().to_string()
}

/// Format a workflow run, job or step status
pub fn format_run_status(status: &str, conclusion: Option<&str>) -> String {
  match status {
    "completed" => match conclusion {
      Some("success") => "Success".green().to_string(),
      Some("failure") => "Failure".red().to_string(),
      Some("neutral") => "Neutral".yellow().to_string(),
      Some("cancelled") => "Cancelled".yellow().to_string(),
      Some("skipped") => "Skipped".bright_black().to_string(),
      Some("timed_out") => "Timed Out".red().to_string(),
      Some("action_required") => "Action Required".yellow().to_string(),
      Some(other) => other.to_string(),
      None => "Completed".to_string(),
    },
    "in_progress" => "In Progress".yellow().to_string(),
    "queued" | "waiting" | "pending" | "requested" => "Queued".cyan().to_string(),
    _ => status.to_string(),
  }
}

/// Format a duration given in milliseconds as `1h 2m 3s`
pub fn format_duration_ms(ms: u64) -> String {
  let total = ms / 1000;
  let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
  if hours > 0 {
    format!("{hours}h {minutes}m {seconds}s")
  } else if minutes > 0 {
    format!("{minutes}m {seconds}s")
  } else {
    format!("{seconds}s")
  }
}

/// Print a response in the requested format. `show` renders the mapped
/// entity and only runs for [`ReturnFormat::Object`].
pub fn emit<T>(response: ApiResponse<T>, format: ReturnFormat, show: impl FnOnce(T)) -> Result<()> {
  match response.materialize(format)? {
    Materialized::Text(text) => println!("{text}"),
    Materialized::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
    Materialized::Object(object) => show(object),
  }
  Ok(())
}

/// Report an action outcome. Failures become an error so the process exits
/// non-zero.
pub fn report(outcome: ActionOutcome, success: &str) -> Result<()> {
  match outcome.into_result() {
    Ok(status) => {
      print_success(&format!("{success} (HTTP {status})"));
      Ok(())
    }
    Err(failure) => {
      print_error(&failure.to_string());
      Err(anyhow!("{}", failure.reason))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(999), "0s");
    assert_eq!(format_duration_ms(180_000), "3m 0s");
    assert_eq!(format_duration_ms(3_723_000), "1h 2m 3s");
  }

  #[test]
  fn test_format_run_status_without_colors() {
    owo_colors::set_override(false);
    assert_eq!(format_run_status("completed", Some("success")), "Success");
    assert_eq!(format_run_status("completed", None), "Completed");
    assert_eq!(format_run_status("waiting", None), "Queued");
    assert_eq!(format_run_status("mystery", None), "mystery");
  }
}
