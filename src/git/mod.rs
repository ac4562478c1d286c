//! Git integration.
//!
//! Resolves commit references mentioned in journals to commit timestamps.
//! History is read in-process with `git2`: every commit reachable from
//! `HEAD` or any ref under `refs/` is enumerated with its full hash and
//! author time (the same set `git log --all` would list).
//!
//! Resolution is best effort. A repository that cannot be read yields an
//! empty result and a logged warning rather than an error.
//!
//! Abbreviated references resolve to the first enumerated commit whose hash
//! starts with them. Enumeration order is revwalk order, so a prefix shared
//! by several commits resolves to whichever is walked first.

pub mod zones;

use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use std::path::Path;

use crate::journal::CommitTimestamp;

pub use zones::{CommonZones, ZoneLookup};

/// Errors reading commit history.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The path is missing or not inside a git repository.
    #[error("Not a git repository: {path}")]
    NotARepository {
        /// The path that was searched.
        path: String,
        #[source]
        source: git2::Error,
    },

    /// The repository was found but its history could not be walked.
    #[error("Failed to read commit history: {0}")]
    History(#[from] git2::Error),
}

/// One enumerated commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedCommit {
    /// Full lowercase hash.
    pub hash: String,
    /// Author time with the author's UTC offset.
    pub timestamp: DateTime<FixedOffset>,
}

/// All commits of a repository, in enumeration order.
#[derive(Debug, Clone, Default)]
pub struct CommitIndex {
    commits: Vec<LoggedCommit>,
}

impl CommitIndex {
    /// Enumerates every commit reachable from `HEAD` or any ref.
    ///
    /// The repository is discovered from `repo_path`, so any directory
    /// inside a working tree works. Commits whose objects cannot be read are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found or the walk cannot start.
    pub fn load(repo_path: &Path) -> Result<Self, GitError> {
        let repo =
            git2::Repository::discover(repo_path).map_err(|source| GitError::NotARepository {
                path: repo_path.display().to_string(),
                source,
            })?;

        let mut walk = repo.revwalk()?;

        if let Err(e) = walk.push_head() {
            tracing::debug!("HEAD has no commits to walk: {}", e);
        }

        for reference in repo.references()? {
            let reference = match reference {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!("Skipping unreadable ref: {}", e);
                    continue;
                }
            };
            // Refs pointing at trees or blobs have no history to walk
            if let Ok(commit) = reference.peel_to_commit() {
                walk.push(commit.id())?;
            }
        }

        let mut commits = Vec::new();
        for oid in walk {
            let commit = match oid.and_then(|oid| repo.find_commit(oid)) {
                Ok(c) => c,
                Err(e) => {
                    tracing::debug!("Skipping unreadable commit: {}", e);
                    continue;
                }
            };

            let when = commit.author().when();
            if let Some(timestamp) = commit_time(when) {
                commits.push(LoggedCommit {
                    hash: commit.id().to_string(),
                    timestamp,
                });
            }
        }

        tracing::debug!(
            "Enumerated {} commits from {}",
            commits.len(),
            repo_path.display()
        );

        Ok(Self { commits })
    }

    /// Builds an index from `git log --format="%H %aI"` output.
    ///
    /// Lines that do not parse are skipped.
    pub fn from_log_output(output: &str) -> Self {
        let commits = output
            .lines()
            .filter_map(|line| {
                let parsed = parse_log_line(line);
                if parsed.is_none() && !line.trim().is_empty() {
                    tracing::debug!("Skipping malformed log line: {}", line);
                }
                parsed
            })
            .collect();

        Self { commits }
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Resolves references against this index.
    ///
    /// The result is keyed by each reference exactly as given and holds only
    /// the references that matched. Prefix matching ignores case. Offsets
    /// without a zone in `zones` get `default_zone`.
    pub fn resolve(
        &self,
        refs: &[String],
        zones: &dyn ZoneLookup,
        default_zone: &str,
    ) -> HashMap<String, CommitTimestamp> {
        let mut resolved = HashMap::new();

        for reference in refs {
            if !is_commit_ref(reference) {
                tracing::debug!("Ignoring invalid commit reference: {}", reference);
                continue;
            }

            let prefix = reference.to_ascii_lowercase();
            let Some(commit) = self.commits.iter().find(|c| c.hash.starts_with(&prefix)) else {
                tracing::debug!("No commit matches {}", reference);
                continue;
            };

            let timezone = zones
                .zone_for_offset(*commit.timestamp.offset())
                .unwrap_or(default_zone)
                .to_string();

            resolved.insert(
                reference.clone(),
                CommitTimestamp {
                    hash: reference.clone(),
                    timestamp: commit.timestamp,
                    timezone,
                },
            );
        }

        resolved
    }
}

/// Resolves commit references against the repository at `repo_path`.
///
/// Never fails: if the repository cannot be read, a warning is logged and
/// the result is empty.
pub fn resolve_commit_timestamps(
    refs: &[String],
    repo_path: &Path,
    zones: &dyn ZoneLookup,
    default_zone: &str,
) -> HashMap<String, CommitTimestamp> {
    if refs.is_empty() {
        return HashMap::new();
    }

    match CommitIndex::load(repo_path) {
        Ok(index) => index.resolve(refs, zones, default_zone),
        Err(e) => {
            tracing::warn!(
                "Could not resolve commits in {}: {}",
                repo_path.display(),
                e
            );
            HashMap::new()
        }
    }
}

/// Earliest and latest resolved commit times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// `(earliest, latest)`, or `None` when nothing resolved.
    pub bounds: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>,
    /// Zone of the earliest commit, or the default zone.
    pub timezone: String,
}

impl CommitRange {
    pub fn earliest(&self) -> Option<DateTime<FixedOffset>> {
        self.bounds.map(|(earliest, _)| earliest)
    }

    pub fn latest(&self) -> Option<DateTime<FixedOffset>> {
        self.bounds.map(|(_, latest)| latest)
    }
}

/// Computes the span covered by a set of resolved commits.
///
/// The reported zone is the earliest commit's; ties on the earliest instant
/// go to the lowest hash so the result does not depend on map order.
pub fn session_time_range(
    timestamps: &HashMap<String, CommitTimestamp>,
    default_zone: &str,
) -> CommitRange {
    let earliest = timestamps.values().min_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.hash.cmp(&b.hash))
    });
    let latest = timestamps.values().map(|c| c.timestamp).max();

    match (earliest, latest) {
        (Some(first), Some(last)) => CommitRange {
            bounds: Some((first.timestamp, last)),
            timezone: first.timezone.clone(),
        },
        _ => CommitRange {
            bounds: None,
            timezone: default_zone.to_string(),
        },
    }
}

/// Parses one `<full-hash> <ISO-8601 timestamp>` line.
pub fn parse_log_line(line: &str) -> Option<LoggedCommit> {
    let mut parts = line.split_whitespace();
    let hash = parts.next()?;
    let timestamp = parts.next()?;

    if parts.next().is_some() || !is_full_hash(hash) {
        return None;
    }

    let timestamp = DateTime::parse_from_rfc3339(timestamp).ok()?;

    Some(LoggedCommit {
        hash: hash.to_ascii_lowercase(),
        timestamp,
    })
}

/// Whether a string looks like a (possibly abbreviated) commit hash.
pub fn is_commit_ref(s: &str) -> bool {
    (7..=40).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_full_hash(s: &str) -> bool {
    matches!(s.len(), 40 | 64) && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn commit_time(time: git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    DateTime::from_timestamp(time.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "0ba4e91c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f70";
    const SECOND: &str = "7f3c2a1b0e9d8c7b6a5f4e3d2c1b0a9f8e7d6c5b";

    fn log_output() -> String {
        format!(
            "{FIRST} 2026-01-15T10:00:00-05:00\n\
             garbage line\n\
             \n\
             {SECOND} 2026-01-15T16:30:00+00:00\n"
        )
    }

    fn refs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_log_line_valid() {
        let commit = parse_log_line(&format!("{FIRST} 2026-01-15T10:00:00-05:00")).unwrap();
        assert_eq!(commit.hash, FIRST);
        assert_eq!(commit.timestamp.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_parse_log_line_lowercases_hash() {
        let upper = FIRST.to_uppercase();
        let commit = parse_log_line(&format!("{upper} 2026-01-15T10:00:00Z")).unwrap();
        assert_eq!(commit.hash, FIRST);
    }

    #[test]
    fn test_parse_log_line_malformed() {
        assert!(parse_log_line("").is_none());
        assert!(parse_log_line(FIRST).is_none());
        assert!(parse_log_line(&format!("{FIRST} yesterday")).is_none());
        assert!(parse_log_line("0ba4e91 2026-01-15T10:00:00Z").is_none());
        assert!(parse_log_line(&format!("{FIRST} 2026-01-15T10:00:00Z extra")).is_none());
    }

    #[test]
    fn test_from_log_output_skips_bad_lines() {
        let index = CommitIndex::from_log_output(&log_output());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_resolve_abbreviated_and_case_insensitive() {
        let index = CommitIndex::from_log_output(&log_output());
        let resolved = index.resolve(&refs(&["0BA4E91", "7f3c2a1b0e"]), &CommonZones, "UTC");

        assert_eq!(resolved.len(), 2);
        let first = &resolved["0BA4E91"];
        assert_eq!(first.hash, "0BA4E91");
        assert_eq!(first.timezone, "America/New_York");
        assert_eq!(resolved["7f3c2a1b0e"].timezone, "Europe/London");
    }

    #[test]
    fn test_resolve_drops_unknown_and_invalid_refs() {
        let index = CommitIndex::from_log_output(&log_output());
        let resolved = index.resolve(&refs(&["deadbee", "xyz", ""]), &CommonZones, "UTC");
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_resolve_unknown_offset_uses_default_zone() {
        let index =
            CommitIndex::from_log_output(&format!("{FIRST} 2026-01-15T10:00:00+09:00\n"));
        let resolved = index.resolve(&refs(&["0ba4e91"]), &CommonZones, "America/New_York");
        assert_eq!(resolved["0ba4e91"].timezone, "America/New_York");
    }

    #[test]
    fn test_resolve_does_not_touch_input() {
        let index = CommitIndex::from_log_output(&log_output());
        let input = refs(&["0ba4e91", "0ba4e91"]);
        let before = input.clone();
        let resolved = index.resolve(&input, &CommonZones, "UTC");
        assert_eq!(input, before);
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_resolve_commit_timestamps_missing_repo() {
        let resolved = resolve_commit_timestamps(
            &refs(&["0ba4e91"]),
            Path::new("/nonexistent/path/for/worklog/tests"),
            &CommonZones,
            "UTC",
        );
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_load_missing_repo_is_error() {
        let result = CommitIndex::load(Path::new("/nonexistent/path/for/worklog/tests"));
        assert!(matches!(result, Err(GitError::NotARepository { .. })));
    }

    #[test]
    fn test_session_time_range() {
        let index = CommitIndex::from_log_output(&log_output());
        let resolved = index.resolve(&refs(&["7f3c2a1", "0ba4e91"]), &CommonZones, "UTC");
        let range = session_time_range(&resolved, "UTC");

        assert_eq!(
            range.earliest(),
            Some(DateTime::parse_from_rfc3339("2026-01-15T10:00:00-05:00").unwrap())
        );
        assert_eq!(
            range.latest(),
            Some(DateTime::parse_from_rfc3339("2026-01-15T16:30:00+00:00").unwrap())
        );
        assert_eq!(range.timezone, "America/New_York");
    }

    #[test]
    fn test_session_time_range_empty() {
        let range = session_time_range(&HashMap::new(), "America/New_York");
        assert!(range.bounds.is_none());
        assert!(range.earliest().is_none());
        assert!(range.latest().is_none());
        assert_eq!(range.timezone, "America/New_York");
    }

    #[test]
    fn test_session_time_range_tie_is_deterministic() {
        let instant = DateTime::parse_from_rfc3339("2026-01-15T15:00:00+00:00").unwrap();
        let mut resolved = HashMap::new();
        for (hash, zone) in [("bbbbbbb", "Europe/London"), ("aaaaaaa", "UTC")] {
            resolved.insert(
                hash.to_string(),
                CommitTimestamp {
                    hash: hash.to_string(),
                    timestamp: instant,
                    timezone: zone.to_string(),
                },
            );
        }
        assert_eq!(session_time_range(&resolved, "X").timezone, "UTC");
    }

    #[test]
    fn test_is_commit_ref() {
        assert!(is_commit_ref("0ba4e91"));
        assert!(is_commit_ref(FIRST));
        assert!(!is_commit_ref("0ba4e9"));
        assert!(!is_commit_ref("0ba4e9g"));
    }
}
