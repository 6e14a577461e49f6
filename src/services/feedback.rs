//! Feedback for the developers. Same lifecycle as ideas, without a
//! reference.

use serde::Serialize;
use tracing::debug;

use super::record::{SubmitError, Timestamp, normalize_text};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackEntry {
    pub text: String,
    pub submitted_at: Timestamp,
}

/// Append-only feedback log, stored oldest first.
#[derive(Debug, Clone, Default)]
pub struct FeedbackLog {
    entries: Vec<FeedbackEntry>,
}

impl FeedbackLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a feedback entry.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Empty`] for blank text; the log is unchanged.
    pub fn submit(&mut self, text: &str, now: Timestamp) -> Result<&FeedbackEntry, SubmitError> {
        let text = normalize_text(text)?;
        let submitted_at = Timestamp::next_after(self.entries.last().map(|e| e.submitted_at), now);
        self.entries.push(FeedbackEntry { text, submitted_at });
        debug!(entries = self.entries.len(), "feedback recorded");
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Entries, most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &FeedbackEntry> {
        self.entries.iter().rev()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "feedback_test.rs"]
mod tests;
