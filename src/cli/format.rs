//! Output formatting utilities for CLI commands.
//!
//! Provides a unified `OutputFormat` enum plus the small helpers the
//! session listings share.

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use clap::ValueEnum;

use worklog_cli::journal::Session;

/// Output format options for CLI commands.
///
/// - `Text` for a human-readable table (default)
/// - `Json` for calendar tooling and scripting
/// - `Markdown` for pasting into notes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default).
    #[default]
    Text,
    /// Machine-readable JSON output.
    Json,
    /// Markdown-formatted output.
    Markdown,
}

/// Truncates a string to at most `max_width` characters, ending in "..."
/// when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    }
}

/// Formats a session's window as `HH:MM-HH:MM` in the session's timezone.
///
/// Returns "-" when timing is unresolved.
pub fn format_window(session: &Session) -> String {
    let Some(window) = session.window else {
        return "-".to_string();
    };

    let zone = session.timezone.parse::<Tz>().ok();
    let clock = |t: DateTime<FixedOffset>| match zone {
        Some(tz) => t.with_timezone(&tz).format("%H:%M").to_string(),
        None => t.format("%H:%M").to_string(),
    };

    format!("{}-{}", clock(window.start), clock(window.end))
}

/// Formats a session's duration as `1h 05m`, or "-" when unresolved.
pub fn format_duration(session: &Session) -> String {
    match session.duration() {
        Some(d) => {
            let minutes = d.num_minutes();
            format!("{}h {:02}m", minutes / 60, minutes % 60)
        }
        None => "-".to_string(),
    }
}
