//! UTC offset to timezone lookup.
//!
//! A commit only records its UTC offset, not the zone it was made in. The
//! mapping back to a zone name is lossy (-05:00 is both New York in winter
//! and Chicago in summer), so it sits behind a trait that a fuller lookup
//! can replace.

use chrono::FixedOffset;

/// Strategy for turning a UTC offset into IANA zone candidates.
pub trait ZoneLookup {
    /// Zones that use `offset` at some point of the year, most likely first.
    fn candidates(&self, offset: FixedOffset) -> Vec<&'static str>;

    /// The representative zone for `offset`, if any.
    fn zone_for_offset(&self, offset: FixedOffset) -> Option<&'static str> {
        self.candidates(offset).into_iter().next()
    }
}

/// Lookup table covering common US and UK offsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonZones;

const HOUR: i32 = 3600;

impl ZoneLookup for CommonZones {
    fn candidates(&self, offset: FixedOffset) -> Vec<&'static str> {
        match offset.local_minus_utc() {
            s if s == -4 * HOUR => vec!["America/New_York"],
            s if s == -5 * HOUR => vec!["America/New_York", "America/Chicago"],
            s if s == -6 * HOUR => vec!["America/Chicago", "America/Denver"],
            s if s == -7 * HOUR => vec!["America/Denver", "America/Los_Angeles", "America/Phoenix"],
            s if s == -8 * HOUR => vec!["America/Los_Angeles"],
            0 => vec!["Europe/London", "UTC"],
            s if s == HOUR => vec!["Europe/London"],
            _ => vec![],
        }
    }
}
