//! Reference materials the tutor claims to consult.
//!
//! The set is closed and static. "No selection" is modeled as
//! `Option<Reference>::None` rather than a fourth variant.

use serde::Serialize;

/// Marker shown wherever no reference was selected.
pub const NO_REFERENCE_LABEL: &str = "No reference selected";

/// Label of the empty option in the reference picker.
pub const PICKER_PLACEHOLDER: &str = "Choose a textbook";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    Serway,
    Halliday,
    Mechanics,
}

impl Reference {
    /// Every reference, in picker order.
    pub const ALL: [Reference; 3] = [Self::Serway, Self::Halliday, Self::Mechanics];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Serway => "Serway",
            Self::Halliday => "Halliday",
            Self::Mechanics => "Mechanics",
        }
    }

    /// Parse a picker value. Empty or unknown values select nothing.
    #[must_use]
    pub fn parse_selection(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|r| r.name() == raw)
    }
}

/// Display label for an optional selection.
#[must_use]
pub fn label(reference: Option<Reference>) -> &'static str {
    reference.map_or(NO_REFERENCE_LABEL, Reference::name)
}

#[cfg(test)]
#[path = "reference_test.rs"]
mod tests;
