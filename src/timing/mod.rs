//! Timing reconstruction.
//!
//! Decides where each session's start and end come from. Sources are tried
//! in priority order:
//!
//! 1. An explicit annotation already on the session is kept as is.
//! 2. Otherwise the session's commit references are resolved against the
//!    configured repository and the window spans the earliest to latest
//!    commit, widened by the configured buffers.
//! 3. Otherwise the session is left without timing.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::git::{resolve_commit_timestamps, session_time_range, CommonZones, ZoneLookup};
use crate::journal::{Session, SessionWindow, TimingSource, DEFAULT_TIMEZONE};

/// Default minutes added before the earliest commit.
pub const DEFAULT_PRE_COMMIT_BUFFER_MINUTES: u32 = 15;

/// Default minutes added after the latest commit.
pub const DEFAULT_POST_COMMIT_BUFFER_MINUTES: u32 = 5;

/// Default session length in minutes.
pub const DEFAULT_SESSION_DURATION_MINUTES: u32 = 60;

/// Settings for one reconstruction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Repository to resolve commits in; `None` means the current directory.
    pub repo_path: Option<PathBuf>,

    /// Session length for sessions with no other timing source.
    ///
    /// Not consulted by [`reconstruct_timing`] yet; reserved for a
    /// fixed-length fallback.
    pub default_duration_minutes: u32,

    /// Minutes before the earliest commit that the session is taken to start.
    pub pre_commit_buffer_minutes: u32,

    /// Minutes after the latest commit that the session is taken to end.
    pub post_commit_buffer_minutes: u32,

    /// Zone for commits whose offset has no known zone.
    pub default_timezone: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            repo_path: None,
            default_duration_minutes: DEFAULT_SESSION_DURATION_MINUTES,
            pre_commit_buffer_minutes: DEFAULT_PRE_COMMIT_BUFFER_MINUTES,
            post_commit_buffer_minutes: DEFAULT_POST_COMMIT_BUFFER_MINUTES,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl TimingConfig {
    /// The repository location to query.
    pub fn repo_location(&self) -> PathBuf {
        self.repo_path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Resolves timing for one session using the common US/UK zone table.
pub fn reconstruct_timing(session: Session, config: &TimingConfig) -> Session {
    reconstruct_timing_with(session, config, &CommonZones)
}

/// Resolves timing for one session with a custom offset-to-zone lookup.
pub fn reconstruct_timing_with(
    mut session: Session,
    config: &TimingConfig,
    zones: &dyn ZoneLookup,
) -> Session {
    if session.window.is_some() || session.commits.is_empty() {
        return session;
    }

    let resolved = resolve_commit_timestamps(
        &session.commits,
        &config.repo_location(),
        zones,
        &config.default_timezone,
    );
    let range = session_time_range(&resolved, &config.default_timezone);

    let Some((earliest, latest)) = range.bounds else {
        tracing::debug!(
            "No commits resolved for session {} on {}",
            session.session_number,
            session.date
        );
        return session;
    };

    session.window = Some(SessionWindow {
        start: earliest - Duration::minutes(i64::from(config.pre_commit_buffer_minutes)),
        end: latest + Duration::minutes(i64::from(config.post_commit_buffer_minutes)),
    });
    session.timezone = range.timezone;
    session.timing_source = TimingSource::Commits;

    session
}

/// Resolves timing for every session, each with its own repository query.
pub fn reconstruct_all(sessions: Vec<Session>, config: &TimingConfig) -> Vec<Session> {
    sessions
        .into_iter()
        .map(|session| reconstruct_timing(session, config))
        .collect()
}
