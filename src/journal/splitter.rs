//! Document-level splitting.
//!
//! A journal document is one file holding a dated title and any number of
//! `## Session N` blocks. This module pulls out the document metadata and
//! slices the text into one block per session.

use std::path::Path;

use super::grammar;
use super::models::{DEFAULT_PROJECT, UNKNOWN_DATE};

/// A journal document cut into session blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Date from the file name or title, or "unknown"
    pub date: String,
    /// Project from the title, or "General"
    pub project: String,
    /// One slice per `## Session N` heading, heading line included
    pub blocks: Vec<&'a str>,
}

/// Splits a document into its metadata and session blocks.
///
/// Text before the first session heading is not part of any block, and a
/// document without session headings produces no blocks at all.
pub fn split_document<'a>(text: &'a str, file_name: &str) -> SplitDocument<'a> {
    SplitDocument {
        date: document_date(text, file_name),
        project: document_project(text),
        blocks: session_blocks(text),
    }
}

/// Date from the file name, falling back to the first dated title.
pub fn document_date(text: &str, file_name: &str) -> String {
    let base_name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);

    grammar::DATE
        .captures(base_name)
        .map(|caps| caps[1].to_string())
        .or_else(|| {
            grammar::DATED_TITLE
                .captures(text)
                .map(|caps| caps["date"].to_string())
        })
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Project segment of the dated title, up to the first hyphen.
pub fn document_project(text: &str) -> String {
    grammar::TITLE_PROJECT
        .captures(text)
        .map(|caps| caps["project"].trim().to_string())
        .filter(|project| !project.is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECT.to_string())
}

fn session_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = grammar::SESSION_MARKER
        .find_iter(text)
        .map(|m| m.start())
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}
