//! Command-line interface for worklog.
//!
//! Provides the CLI commands for listing journal sessions, reconstructing
//! their timing, and managing configuration.

/// Individual CLI command implementations.
pub mod commands;

/// Output formatting utilities.
pub mod format;

pub use format::OutputFormat;
