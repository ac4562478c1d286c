//! Session record assembly.
//!
//! Turns one session block into a [`Session`]. Everything here is a pure
//! function of the block text and the document metadata.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use super::grammar;
use super::models::{Session, SessionWindow, TimingSource, NO_THEME};
use super::sections::section_items;
use super::splitter::SplitDocument;

/// Section whose items become a session's outcomes.
pub const OUTCOMES_SECTION: &str = "What I Worked On";

/// Section whose items become a session's learnings.
pub const LEARNINGS_SECTION: &str = "Learnings";

/// Builds one session from a block.
///
/// `position` is the 1-based index of the block within its document and
/// stands in for the session number when the heading's number cannot be
/// parsed or is zero. Annotation times are read as wall-clock times in `zone`.
pub fn build_session(
    block: &str,
    position: usize,
    document: &SplitDocument<'_>,
    source_file: &str,
    zone: Tz,
) -> Session {
    let heading = grammar::SESSION_HEADING.captures(block);

    let session_number = heading
        .as_ref()
        .and_then(|caps| caps["number"].parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));

    let theme = heading
        .as_ref()
        .and_then(|caps| caps.name("theme"))
        .map(|m| m.as_str().trim().to_string())
        .filter(|theme| !theme.is_empty())
        .unwrap_or_else(|| NO_THEME.to_string());

    let window = annotation_window(block, &document.date, zone);
    let timing_source = if window.is_some() {
        TimingSource::Annotation
    } else {
        TimingSource::Inferred
    };

    Session {
        date: document.date.clone(),
        session_number,
        project: document.project.clone(),
        theme,
        window,
        timezone: zone.name().to_string(),
        timing_source,
        commits: extract_commits(block),
        outcomes: section_items(block, OUTCOMES_SECTION),
        learnings: section_items(block, LEARNINGS_SECTION),
        source_file: source_file.to_string(),
    }
}

/// Reads the first `session-time` marker in a block as a window on `date`.
///
/// Returns `None` when there is no marker, the date is not a real date, a
/// clock value is out of range, or a wall-clock time does not exist in
/// `zone`. An end earlier than the start is taken to be on the next day.
pub fn annotation_window(block: &str, date: &str, zone: Tz) -> Option<SessionWindow> {
    let caps = grammar::TIME_ANNOTATION.captures(block)?;
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;

    let start_clock = clock_time(&caps["start_h"], &caps["start_m"])?;
    let end_clock = clock_time(&caps["end_h"], &caps["end_m"])?;

    let start_local = day.and_time(start_clock);
    let mut end_local = day.and_time(end_clock);
    if end_local < start_local {
        end_local += Duration::days(1);
    }

    let start = zone.from_local_datetime(&start_local).earliest()?;
    let end = zone.from_local_datetime(&end_local).earliest()?;

    Some(SessionWindow {
        start: start.fixed_offset(),
        end: end.fixed_offset(),
    })
}

/// Hex tokens in single backticks, in first-seen order, without duplicates.
///
/// Tokens inside double-backtick code spans are not references.
pub fn extract_commits(block: &str) -> Vec<String> {
    let bytes = block.as_bytes();
    let mut commits: Vec<String> = Vec::new();
    for caps in grammar::COMMIT_REF.captures_iter(block) {
        let Some(span) = caps.get(0) else { continue };
        let before = span.start().checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(span.end()).copied();
        if before == Some(b'`') || after == Some(b'`') {
            continue;
        }

        let hash = &caps["hash"];
        if !commits.iter().any(|c| c == hash) {
            commits.push(hash.to_string());
        }
    }
    commits
}

fn clock_time(hour: &str, minute: &str) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}
