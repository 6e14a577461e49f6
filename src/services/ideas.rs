//! Improvement ideas submitted from the side panel.
//!
//! Each idea remembers the reference that was selected when it was
//! submitted; later selection changes do not touch it.

use serde::Serialize;
use tracing::debug;

use super::record::{SubmitError, Timestamp, normalize_text};
use super::reference::Reference;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Idea {
    pub text: String,
    pub reference: Option<Reference>,
    pub submitted_at: Timestamp,
}

/// Append-only idea log, stored oldest first.
#[derive(Debug, Clone, Default)]
pub struct IdeaLog {
    ideas: Vec<Idea>,
}

impl IdeaLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record an idea.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Empty`] for blank text; the log is unchanged.
    pub fn submit(&mut self, text: &str, reference: Option<Reference>, now: Timestamp) -> Result<&Idea, SubmitError> {
        let text = normalize_text(text)?;
        let submitted_at = Timestamp::next_after(self.ideas.last().map(|i| i.submitted_at), now);
        self.ideas.push(Idea { text, reference, submitted_at });
        debug!(ideas = self.ideas.len(), "idea recorded");
        Ok(&self.ideas[self.ideas.len() - 1])
    }

    /// Ideas, most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Idea> {
        self.ideas.iter().rev()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }
}

#[cfg(test)]
#[path = "ideas_test.rs"]
mod tests;
