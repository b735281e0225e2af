//! Date and time display utilities.
//!
//! This module provides wrapper types for formatting timestamps and civil
//! dates in a consistent, human-readable format.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that provides system timezone formatting via
/// the `Display` trait.
///
/// # Format
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A wrapper around a civil `Date` for short human-readable formatting,
/// e.g. `Mon, Sep 14, 2026`.
pub struct ShortDate<'a>(pub &'a Date);

impl fmt::Display for ShortDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a, %b %d, %Y"))
    }
}
