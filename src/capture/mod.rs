//! Journal file discovery and loading.
//!
//! Inputs given on the command line may be files, directories, or glob
//! patterns. Directories are searched recursively for `*.md` files. The
//! resulting list is sorted and free of duplicates so sessions come out in a
//! stable order.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::fs;
use std::path::{Path, PathBuf};

use crate::journal::{parse_in_zone, Session};

/// Extension of journal files picked up from directories.
pub const JOURNAL_EXTENSION: &str = "md";

/// Expands inputs into a sorted list of journal files.
///
/// Inputs that match nothing are logged and skipped.
///
/// # Errors
///
/// Returns an error if an input is neither an existing path nor a valid
/// glob pattern.
pub fn find_journal_files(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(journals_in_dir(path)?);
        } else {
            let matches = expand_glob(input)?;
            if matches.is_empty() {
                tracing::warn!("No journal files match {}", input);
            }
            files.extend(matches);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Parses every file, skipping (and logging) files that cannot be read.
pub fn load_sessions(files: &[PathBuf], zone: Tz) -> Vec<Session> {
    let mut sessions = Vec::new();

    for path in files {
        match fs::read_to_string(path) {
            Ok(content) => {
                let parsed = parse_in_zone(&content, &path.to_string_lossy(), zone);
                tracing::debug!("Parsed {} sessions from {:?}", parsed.len(), path);
                sessions.extend(parsed);
            }
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
            }
        }
    }

    sessions
}

fn journals_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("**").join(format!("*.{JOURNAL_EXTENSION}"));
    expand_glob(&pattern.to_string_lossy())
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries =
        glob::glob(pattern).with_context(|| format!("Invalid path or pattern: {pattern}"))?;

    Ok(entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect())
}
