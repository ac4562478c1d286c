//! Sessions command - list sessions parsed from journal files.
//!
//! Discovers journal files from the given paths, parses them, and prints
//! the sessions in text, JSON, or markdown format. Timing shown here is
//! only what the journals annotate; use `worklog timing` to fill in the
//! rest from git history.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::{format_duration, format_window, truncate_to_width};
use crate::cli::OutputFormat;
use worklog_cli::capture::{find_journal_files, load_sessions};
use worklog_cli::config::Config;
use worklog_cli::journal::{Session, TimingSource};

/// Arguments for the sessions command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    worklog sessions journal/                  All journals under a directory\n    \
    worklog sessions 2026-01-15.md             A single journal\n    \
    worklog sessions 'journal/2026-01-*.md'    Journals matching a pattern\n    \
    worklog sessions journal/ --format json    Output as JSON")]
pub struct Args {
    /// Journal files, directories, or glob patterns
    #[arg(value_name = "PATH", required = true)]
    #[arg(
        long_help = "Journal files to parse. Directories are searched recursively\n\
        for *.md files. Quoted glob patterns are expanded."
    )]
    pub paths: Vec<String>,

    /// Output format: text (default), json, or markdown
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the sessions command.
pub fn run(args: Args) -> Result<()> {
    let mut config = Config::load()?;
    config.apply_env_overrides();

    let files = find_journal_files(&args.paths)?;
    let sessions = load_sessions(&files, config.timezone());

    print_sessions(&sessions, args.format)
}

/// Prints sessions in the requested format.
pub fn print_sessions(sessions: &[Session], format: OutputFormat) -> Result<()> {
    if sessions.is_empty() && format != OutputFormat::Json {
        println!("{}", "No sessions found.".dimmed());
        println!();
        println!("Journal sessions start with a '## Session N: Theme' heading.");
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(sessions)?;
            println!("{json}");
        }
        OutputFormat::Markdown => print_markdown(sessions),
        OutputFormat::Text => print_table(sessions),
    }

    Ok(())
}

fn print_table(sessions: &[Session]) {
    const DATE_WIDTH: usize = 10;
    const NUMBER_WIDTH: usize = 3;
    const PROJECT_WIDTH: usize = 20;
    const THEME_WIDTH: usize = 32;
    const TIME_WIDTH: usize = 11;
    const SOURCE_WIDTH: usize = 10;

    println!(
        "{}",
        format!(
            "{:<DATE_WIDTH$}  {:>NUMBER_WIDTH$}  {:<PROJECT_WIDTH$}  {:<THEME_WIDTH$}  {:<TIME_WIDTH$}  {:<SOURCE_WIDTH$}  {}",
            "DATE", "#", "PROJECT", "THEME", "TIME", "SOURCE", "COMMITS"
        )
        .bold()
    );

    for session in sessions {
        let source = session.timing_source.to_string();
        let source = match session.timing_source {
            TimingSource::Annotation => source.green(),
            TimingSource::Commits => source.cyan(),
            TimingSource::Inferred => source.dimmed(),
        };

        println!(
            "{:<DATE_WIDTH$}  {:>NUMBER_WIDTH$}  {:<PROJECT_WIDTH$}  {:<THEME_WIDTH$}  {:<TIME_WIDTH$}  {:<SOURCE_WIDTH$}  {}",
            session.date.dimmed(),
            session.session_number,
            truncate_to_width(&session.project, PROJECT_WIDTH).yellow(),
            truncate_to_width(&session.theme, THEME_WIDTH),
            format_window(session),
            source,
            session.commits.len()
        );
    }
}

fn print_markdown(sessions: &[Session]) {
    println!("# Sessions");

    for session in sessions {
        println!();
        println!(
            "## {} - Session {}: {}",
            session.date, session.session_number, session.theme
        );
        println!();
        println!("- **Project:** {}", session.project);
        println!(
            "- **Time:** {} ({}, {})",
            format_window(session),
            session.timezone,
            session.timing_source
        );
        println!("- **Duration:** {}", format_duration(session));
        if !session.commits.is_empty() {
            let commits: Vec<String> = session.commits.iter().map(|c| format!("`{c}`")).collect();
            println!("- **Commits:** {}", commits.join(", "));
        }
        println!("- **Source:** {}", session.source_file);

        print_markdown_list("Outcomes", &session.outcomes);
        print_markdown_list("Learnings", &session.learnings);
    }
}

fn print_markdown_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("### {title}");
    println!();
    for item in items {
        println!("- {item}");
    }
}
