//! Markdown grammar for journal documents.
//!
//! Every structural element the parser recognizes is a named pattern here,
//! compiled once on first use. Precedence between elements (which heading
//! closes a section, which list markers count as items) lives in the
//! extractors; this module only says what each element looks like.

use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("journal grammar patterns are valid")
}

/// A `YYYY-MM-DD` date anywhere in a string (used on file names).
pub static DATE: LazyLock<Regex> = LazyLock::new(|| compile(r"(\d{4}-\d{2}-\d{2})"));

/// Top-level heading that starts with a date: `# 2026-01-15...`
pub static DATED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^#[ \t]+(?P<date>\d{4}-\d{2}-\d{2})"));

/// Project segment of the top-level heading: `# 2026-01-15: <project> - ...`
pub static TITLE_PROJECT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^#[ \t]+\d{4}-\d{2}-\d{2}:(?P<project>[^\-\n]*)"));

/// Start of a session block: `## Session 3`
pub static SESSION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^##[ \t]+Session[ \t]+\d+"));

/// A full session heading line with optional theme.
pub static SESSION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^##[ \t]+Session[ \t]+(?P<number>\d+)(?:[^:\n]*:(?P<theme>[^\n]*))?")
});

/// Explicit timing marker: `<!-- session-time: 10:30-12:45 -->`
pub static TIME_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"<!--[ \t]*session-time:[ \t]*(?P<start_h>\d{1,2}):(?P<start_m>\d{2})[ \t]*-[ \t]*(?P<end_h>\d{1,2}):(?P<end_m>\d{2})[ \t]*-->",
    )
});

/// A commit reference in single backticks: `` `0ba4e91` ``
pub static COMMIT_REF: LazyLock<Regex> =
    LazyLock::new(|| compile(r"`(?P<hash>[0-9a-fA-F]{7,40})`"));

/// Level-3 heading that opens a named section.
pub static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^###[ \t]+(?P<name>[^\n]+)$"));

/// Any level-2 or level-3 heading; closes the current section.
pub static SECTION_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^#{2,3}[ \t]"));

/// Numbered list item: `1. text`
pub static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^[ \t]*\d+\.[ \t]+(?P<text>[^\n]+)$"));

/// Bulleted list item: `- text` or `* text`
pub static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^[ \t]*[-*][ \t]+(?P<text>[^\n]+)$"));

/// A line that is nothing but bold text: `**text**`
pub static BOLD_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^[ \t]*\*\*(?P<text>[^*\n]+)\*\*[ \t]*\r?$"));
