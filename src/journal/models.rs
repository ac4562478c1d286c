//! Core data models for worklog
//!
//! These are the interchange records handed to display and calendar
//! collaborators. They carry no knowledge of how they were produced.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// Zone used for annotation wall-clock times and as the fallback for
/// commit offsets that have no known zone.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Date placeholder when neither the file name nor the heading carries one.
pub const UNKNOWN_DATE: &str = "unknown";

/// Project placeholder when the top heading has no project segment.
pub const DEFAULT_PROJECT: &str = "General";

/// Theme placeholder when the session heading has no colon.
pub const NO_THEME: &str = "(no theme)";

/// A Session is one unit of recorded work inside a journal document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Calendar date (YYYY-MM-DD) or "unknown"
    pub date: String,

    /// Number from the `## Session N` heading, or the block position
    pub session_number: u32,

    /// Project label from the document heading
    pub project: String,

    /// Text after `Session N:` on the heading line
    pub theme: String,

    /// Start and end of the session, when known
    pub window: Option<SessionWindow>,

    /// IANA zone the window should be displayed in
    pub timezone: String,

    /// How the window was determined
    pub timing_source: TimingSource,

    /// Commit references in first-seen order, without duplicates
    pub commits: Vec<String>,

    /// Items from the "What I Worked On" section
    pub outcomes: Vec<String>,

    /// Items from the "Learnings" section
    pub learnings: Vec<String>,

    /// Journal file the session came from
    pub source_file: String,
}

impl Session {
    /// Start of the session, if timing has been resolved.
    pub fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        self.window.map(|w| w.start)
    }

    /// End of the session, if timing has been resolved.
    pub fn end_time(&self) -> Option<DateTime<FixedOffset>> {
        self.window.map(|w| w.end)
    }

    pub fn has_timing(&self) -> bool {
        self.window.is_some()
    }

    /// Length of the session, if timing has been resolved.
    pub fn duration(&self) -> Option<Duration> {
        self.window.map(|w| w.end - w.start)
    }
}

/// A resolved start/end pair.
///
/// Keeping both instants in one value means a session can never carry a
/// start without an end or the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// Provenance of a session's timing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingSource {
    /// Explicit `<!-- session-time: ... -->` marker in the journal.
    Annotation,
    /// Derived from the timestamps of referenced commits.
    Commits,
    /// Nothing resolved yet.
    #[default]
    Inferred,
}

impl std::fmt::Display for TimingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingSource::Annotation => write!(f, "annotation"),
            TimingSource::Commits => write!(f, "commits"),
            TimingSource::Inferred => write!(f, "inferred"),
        }
    }
}

/// Resolution result for one requested commit reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTimestamp {
    /// The reference as it was requested (possibly abbreviated)
    pub hash: String,

    /// Commit time, carrying the commit's own UTC offset
    pub timestamp: DateTime<FixedOffset>,

    /// Best-effort IANA zone for the offset
    pub timezone: String,
}
