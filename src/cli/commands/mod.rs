//! CLI commands for worklog.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Shell completion script generation.
pub mod completions;

/// Configuration viewing and management.
pub mod config;

/// List sessions parsed from journal files.
pub mod sessions;

/// Reconstruct session timing from annotations and git history.
pub mod timing;
