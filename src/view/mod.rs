//! Page rendering.
//!
//! DESIGN
//! ======
//! Handlers never hand session state to the templates directly. A session
//! snapshot is first flattened into a `ViewModel` (plain display rows, lists
//! already in display order), which is then rendered to HTML on the server
//! with Leptos components. The same view model is served as JSON.

pub mod components;

use leptos::prelude::*;
use serde::Serialize;

use crate::config::{AppConfig, LayoutMode, PAGE_CAPTION};
use crate::services::chat::ChatMessage;
use crate::services::record::Timestamp;
use crate::services::reference::{self, PICKER_PLACEHOLDER, Reference};
use crate::services::session::{Notice, SessionState};

use self::components::TutorPage;

/// One entry of the reference picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceOption {
    /// Form value; empty for "no selection".
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaRow {
    pub text: String,
    pub reference: &'static str,
    pub submitted_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRow {
    pub text: String,
    pub submitted_at: Timestamp,
}

/// `(YYYY-MM-DDTHH:MM:SS UTC) text`
#[must_use]
pub fn stamped_line(submitted_at: Timestamp, text: &str) -> String {
    format!("({submitted_at} UTC) {text}")
}

/// Everything the page needs, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub title: &'static str,
    pub caption: &'static str,
    pub layout: LayoutMode,
    pub selected_reference: Option<Reference>,
    pub references: Vec<ReferenceOption>,
    /// Oldest first.
    pub chat: Vec<ChatMessage>,
    /// Newest first.
    pub ideas: Vec<IdeaRow>,
    /// Newest first.
    pub feedback: Vec<FeedbackRow>,
    pub notice: Option<Notice>,
}

impl ViewModel {
    #[must_use]
    pub fn build(config: &AppConfig, session: &SessionState, notice: Option<Notice>) -> Self {
        let selected = session.reference;

        let references = std::iter::once(ReferenceOption {
            value: "",
            label: PICKER_PLACEHOLDER,
            selected: selected.is_none(),
        })
        .chain(Reference::ALL.into_iter().map(|r| ReferenceOption {
            value: r.name(),
            label: r.name(),
            selected: selected == Some(r),
        }))
        .collect();

        let ideas = session
            .ideas
            .newest_first()
            .map(|idea| IdeaRow {
                text: idea.text.clone(),
                reference: reference::label(idea.reference),
                submitted_at: idea.submitted_at,
            })
            .collect();

        let feedback = session
            .feedback
            .newest_first()
            .map(|entry| FeedbackRow { text: entry.text.clone(), submitted_at: entry.submitted_at })
            .collect();

        Self {
            title: config.page_title,
            caption: PAGE_CAPTION,
            layout: config.layout,
            selected_reference: selected,
            references,
            chat: session.chat.messages().to_vec(),
            ideas,
            feedback,
            notice,
        }
    }
}

/// Render the full HTML document for a view model.
#[must_use]
pub fn render_page(vm: ViewModel) -> String {
    let owner = Owner::new();
    owner.with(move || view! { <TutorPage vm=vm/> }.to_html())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
