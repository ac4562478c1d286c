//! Worklog - timing for journaled work sessions
//!
//! Worklog reads markdown work journals, extracts one record per
//! `## Session N` block, and works out when each session happened: from an
//! explicit `<!-- session-time: HH:MM-HH:MM -->` annotation if present,
//! otherwise from the timestamps of the commits the session mentions.

pub mod capture;
pub mod config;
pub mod git;
pub mod journal;
pub mod timing;
