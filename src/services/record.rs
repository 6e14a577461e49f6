//! Shared pieces of the idea and feedback logs: submission validation and
//! second-precision UTC timestamps.

use std::fmt;

use serde::{Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const ISO_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("submission text is empty")]
    Empty,
}

/// Trim submitted text, rejecting whitespace-only input.
///
/// # Errors
///
/// Returns [`SubmitError::Empty`] if nothing is left after trimming.
pub fn normalize_text(raw: &str) -> Result<String, SubmitError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SubmitError::Empty);
    }
    Ok(trimmed.to_owned())
}

/// UTC instant truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(OffsetDateTime::now_utc())
    }

    #[must_use]
    pub fn from_datetime(dt: OffsetDateTime) -> Self {
        let utc = dt.to_offset(UtcOffset::UTC);
        Self(utc.replace_nanosecond(0).unwrap_or(utc))
    }

    /// Timestamp for the next record of a log whose latest record is `last`.
    /// Never earlier than `last`, so logs stay ordered if the clock steps back.
    #[must_use]
    pub fn next_after(last: Option<Self>, now: Self) -> Self {
        last.map_or(now, |last| last.max(now))
    }

    #[must_use]
    pub fn datetime(self) -> OffsetDateTime {
        self.0
    }
}

/// ISO-8601 `YYYY-MM-DDTHH:MM:SS`, implicitly UTC.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(ISO_SECONDS).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
