//! Journal parsing.
//!
//! Turns a markdown work journal into [`Session`] records. Parsing is total:
//! any text produces a (possibly empty) list of sessions, with missing
//! pieces replaced by documented defaults instead of errors.
//!
//! # Document shape
//!
//! ```text
//! # 2026-01-15: Project Name - Subtitle
//!
//! ## Session 1: Theme
//! <!-- session-time: 10:30-12:45 -->
//! ### What I Worked On
//! 1. Landed `0ba4e91`
//! ### Learnings
//! - Something learned
//! ```

pub mod builder;
pub mod grammar;
pub mod models;
pub mod sections;
pub mod splitter;

use chrono_tz::Tz;

pub use models::*;
pub use sections::{extract_list_items, extract_section};
pub use splitter::{split_document, SplitDocument};

/// The default zone as a [`Tz`].
pub fn default_zone() -> Tz {
    chrono_tz::America::New_York
}

/// Parses a journal document using the default timezone for annotations.
pub fn parse(text: &str, file_name: &str) -> Vec<Session> {
    parse_in_zone(text, file_name, default_zone())
}

/// Parses a journal document, reading annotation times in `zone`.
pub fn parse_in_zone(text: &str, file_name: &str, zone: Tz) -> Vec<Session> {
    let document = split_document(text, file_name);

    document
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| builder::build_session(block, i + 1, &document, file_name, zone))
        .collect()
}
