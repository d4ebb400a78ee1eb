//! # Config Command
//!
//! Shows the settings a command would run with and writes a starter
//! `config.toml`.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ghrest_client::ClientSettings;

use super::GlobalArgs;
use crate::clients::{config_dirs, effective_settings};
use crate::output::{format_command, print_info, print_success, print_warning};

/// Command for configuration
#[derive(Args)]
pub struct ConfigArgs {
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Show the effective settings with the token masked
  Show,

  /// Write a config.toml with default settings
  Init {
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
  },

  /// Print the path of the config file
  Path,
}

pub(crate) fn handle_config_command(global: &GlobalArgs, args: ConfigArgs) -> Result<()> {
  match args.subcommand {
    ConfigSubcommands::Show => {
      let mut settings = effective_settings(global)?;
      settings.token = settings.token.as_deref().map(mask_token);
      let rendered = toml::to_string_pretty(&settings).context("Failed to render settings")?;
      print!("{rendered}");
      Ok(())
    }
    ConfigSubcommands::Init { force } => {
      let dirs = config_dirs(global)?;
      let path = dirs.settings_path();
      if path.exists() && !force {
        print_warning(&format!("{} already exists", path.display()));
        print_info(&format!("Use {} to overwrite it", format_command("ghrest config init --force")));
        return Ok(());
      }
      let path = dirs.save_settings(&ClientSettings::default())?;
      print_success(&format!("Wrote {}", path.display()));
      Ok(())
    }
    ConfigSubcommands::Path => {
      println!("{}", config_dirs(global)?.settings_path().display());
      Ok(())
    }
  }
}

/// Keep the last four characters of a token
fn mask_token(token: &str) -> String {
  let count = token.chars().count();
  if count <= 4 {
    return "****".to_string();
  }
  let tail: String = token.chars().skip(count - 4).collect();
  format!("****{tail}")
}
