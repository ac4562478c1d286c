//! Timing command - reconstruct session times.
//!
//! Parses journal files, then fills in each session's start and end from
//! its time annotation or, failing that, from the timestamps of the commits
//! it references. Sessions whose timing cannot be resolved are listed with
//! no time unless `--resolved-only` drops them.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use super::sessions::print_sessions;
use crate::cli::OutputFormat;
use worklog_cli::capture::{find_journal_files, load_sessions};
use worklog_cli::config::Config;
use worklog_cli::timing::{reconstruct_all, TimingConfig};

/// Arguments for the timing command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    worklog timing journal/                        Resolve against the current repo\n    \
    worklog timing journal/ --repo ~/src/project   Resolve against another repo\n    \
    worklog timing journal/ --pre-buffer 30        Start 30 minutes before first commit\n    \
    worklog timing journal/ --resolved-only -f json  Only sessions with times, as JSON")]
pub struct Args {
    /// Journal files, directories, or glob patterns
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Repository to resolve commit references in
    #[arg(short, long, value_name = "PATH")]
    #[arg(
        long_help = "Git repository used to look up commits mentioned in the\n\
        journals. Overrides WORKLOG_REPO and the repo_path config setting.\n\
        Defaults to the current directory."
    )]
    pub repo: Option<PathBuf>,

    /// Minutes to start before the earliest commit
    #[arg(long, value_name = "MINUTES")]
    pub pre_buffer: Option<u32>,

    /// Minutes to end after the latest commit
    #[arg(long, value_name = "MINUTES")]
    pub post_buffer: Option<u32>,

    /// Omit sessions whose timing could not be resolved
    #[arg(long)]
    pub resolved_only: bool,

    /// Output format: text (default), json, or markdown
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the timing command.
pub fn run(args: Args) -> Result<()> {
    let mut config = Config::load()?;
    config.apply_env_overrides();

    let timing_config = apply_flags(config.timing_config(), &args);

    let files = find_journal_files(&args.paths)?;
    let sessions = load_sessions(&files, config.timezone());
    let total = sessions.len();

    let mut sessions = reconstruct_all(sessions, &timing_config);
    let resolved = sessions.iter().filter(|s| s.has_timing()).count();

    if args.resolved_only {
        sessions.retain(|s| s.has_timing());
    }

    print_sessions(&sessions, args.format)?;

    if args.format == OutputFormat::Text && total > 0 {
        println!();
        println!(
            "Resolved timing for {} of {} session(s)",
            resolved.to_string().green(),
            total
        );
    }

    Ok(())
}

/// Layers command-line flags over the configured settings.
fn apply_flags(mut config: TimingConfig, args: &Args) -> TimingConfig {
    if let Some(repo) = &args.repo {
        config.repo_path = Some(repo.clone());
    }
    if let Some(minutes) = args.pre_buffer {
        config.pre_commit_buffer_minutes = minutes;
    }
    if let Some(minutes) = args.post_buffer {
        config.post_commit_buffer_minutes = minutes;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            paths: vec!["journal".to_string()],
            repo: None,
            pre_buffer: None,
            post_buffer: None,
            resolved_only: false,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_apply_flags_without_flags_keeps_config() {
        let config = TimingConfig::default();
        assert_eq!(apply_flags(config.clone(), &args()), config);
    }

    #[test]
    fn test_apply_flags_overrides() {
        let mut args = args();
        args.repo = Some(PathBuf::from("/work/repo"));
        args.pre_buffer = Some(30);
        args.post_buffer = Some(0);

        let config = apply_flags(TimingConfig::default(), &args);
        assert_eq!(config.repo_path, Some(PathBuf::from("/work/repo")));
        assert_eq!(config.pre_commit_buffer_minutes, 30);
        assert_eq!(config.post_commit_buffer_minutes, 0);
        assert_eq!(config.default_timezone, "America/New_York");
    }
}
