//! Config command - manage configuration

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use worklog_cli::config::{Config, CONFIG_KEYS};

#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    worklog config                                  Show current configuration\n    \
    worklog config get pre_commit_buffer_minutes    Print one value\n    \
    worklog config set repo_path ~/src/project      Set the default repository\n    \
    worklog config set default_timezone Europe/London")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print the configuration file path
    Path,
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(),
        Some(ConfigCommand::Get { key }) => get_config(&key),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value),
        Some(ConfigCommand::Path) => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

fn show_config() -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load()?;

    println!("{}", "Worklog Configuration".bold());
    println!();
    println!("  {}  {}", "File:".dimmed(), path.display());
    if !path.exists() {
        println!("  {}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    for key in CONFIG_KEYS {
        let value = config.get(key)?;
        let value = if value.is_empty() {
            "(current directory)".dimmed().to_string()
        } else {
            value
        };
        println!("  {:<28}  {}", key.cyan(), value);
    }

    Ok(())
}

fn get_config(key: &str) -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.get(key)?);
    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!("{} {} = {}", "Set".green(), key.cyan(), config.get(key)?);
    Ok(())
}
