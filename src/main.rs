use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "worklog")]
#[command(version)]
#[command(about = "Extract work sessions from markdown journals and work out when they happened")]
#[command(long_about = "Worklog reads markdown work journals, extracts each '## Session N'\n\
    block, and reconstructs its start and end time from an explicit\n\
    <!-- session-time: HH:MM-HH:MM --> annotation or, failing that, from\n\
    the timestamps of the git commits the session mentions.")]
#[command(after_help = "EXAMPLES:\n    \
    worklog sessions journal/              List sessions in a journal directory\n    \
    worklog timing journal/ --repo .       Resolve session times from git history\n    \
    worklog timing journal/ -f json        Emit sessions as JSON\n    \
    worklog config set repo_path ~/src/x   Set the default repository\n\n\
    For more information about a command, run 'worklog <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List sessions parsed from journal files
    #[command(long_about = "Parses journal files and lists their sessions with project,\n\
        theme, annotated time, and referenced commits.")]
    Sessions(commands::sessions::Args),

    /// Reconstruct session start and end times
    #[command(long_about = "Parses journal files and resolves each session's timing, using\n\
        explicit time annotations first and commit timestamps from the\n\
        configured git repository second.")]
    Timing(commands::timing::Args),

    /// View and manage configuration settings
    #[command(long_about = "Provides subcommands to show, get, and set configuration values.\n\
        Configuration is stored in ~/.worklog/config.yaml.")]
    Config(commands::config::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "worklog=debug,worklog_cli=debug"
    } else {
        "worklog=info,worklog_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Sessions(args) => commands::sessions::run(args),
        Commands::Timing(args) => commands::timing::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Completions(args) => {
            commands::completions::generate_completions(&mut Cli::command(), args.shell);
            Ok(())
        }
    }
}
