//! Placeholder answer generator.
//!
//! Stands in for a retrieval-backed model: the output only echoes the
//! question and the consulted reference. Total over every input, including
//! the empty string; callers filter empty questions themselves.

use super::reference::{self, Reference};

/// Fixed suffix appended to every placeholder answer.
pub const PLACEHOLDER_SUFFIX: &str =
    "-> Connect a real model here to generate a grounded answer from the selected reference.";

/// Build the placeholder answer for `question` given the current selection.
#[must_use]
pub fn placeholder_answer(question: &str, reference: Option<Reference>) -> String {
    format!(
        "Question summary: {question}\n\nReference consulted: {}\n{PLACEHOLDER_SUFFIX}",
        reference::label(reference)
    )
}

#[cfg(test)]
#[path = "answer_test.rs"]
mod tests;
