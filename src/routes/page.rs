//! Page routes: render the tutor page and apply form posts.
//!
//! Each POST handler mutates the caller's session inside a single
//! `with_session` call and answers `303 See Other` back to `/`, so a
//! browser refresh never re-submits a form.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use serde::Deserialize;
use tracing::{debug, info};

use super::session::SessionCookie;
use crate::services::record::{SubmitError, Timestamp};
use crate::services::reference::Reference;
use crate::services::session::{Notice, SessionState};
use crate::state::AppState;
use crate::view::{ViewModel, render_page};

pub const EMPTY_SUBMISSION_WARNING: &str = "Please enter some text.";
pub const IDEA_SAVED: &str = "Your idea has been saved.";
pub const FEEDBACK_SENT: &str = "Your feedback has been sent.";

/// Store the picker value posted alongside a submission, if any.
fn apply_posted_reference(session: &mut SessionState, raw: Option<&str>) {
    if let Some(raw) = raw {
        session.reference = Reference::parse_selection(raw);
    }
}

fn submission_notice(result: Result<(), SubmitError>, success: &str) -> Notice {
    match result {
        Ok(()) => Notice::success(success),
        Err(SubmitError::Empty) => Notice::warning(EMPTY_SUBMISSION_WARNING),
    }
}

// =============================================================================
// FORMS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ReferenceForm {
    #[serde(default)]
    reference: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    question: String,
    /// Picker value from the same form; absent leaves the selection as is.
    #[serde(default)]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdeaForm {
    #[serde(default)]
    text: String,
    #[serde(default)]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    text: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /`: render the page, consuming any pending notice. Reads never
/// create a session; without one the empty page is rendered and the first
/// form post creates it.
pub async fn index(State(state): State<AppState>, session: SessionCookie) -> Response {
    let config = Arc::clone(&state.config);
    let vm = state
        .sessions
        .with_existing(session.token(), |s| {
            let notice = s.take_notice();
            ViewModel::build(&config, s, notice)
        })
        .await
        .unwrap_or_else(|| ViewModel::build(&config, &SessionState::new(), None));

    Html(render_page(vm)).into_response()
}

/// `GET /api/session`: the caller's view model as JSON. Leaves any pending
/// notice in place for the next page render. Like `GET /`, never creates a
/// session.
pub async fn session_json(State(state): State<AppState>, session: SessionCookie) -> Response {
    let config = Arc::clone(&state.config);
    let vm = state
        .sessions
        .with_existing(session.token(), |s| {
            let notice = s.notice().cloned();
            ViewModel::build(&config, s, notice)
        })
        .await
        .unwrap_or_else(|| ViewModel::build(&config, &SessionState::new(), None));

    Json(vm).into_response()
}

/// `POST /reference`: change the selected textbook. Applies to later chat
/// answers and ideas only.
pub async fn select_reference(
    State(state): State<AppState>,
    session: SessionCookie,
    Form(form): Form<ReferenceForm>,
) -> Response {
    let reference = Reference::parse_selection(&form.reference);
    let (resolved, ()) = state
        .sessions
        .with_session(session.token(), |s| s.reference = reference)
        .await;
    debug!(reference = ?reference, "reference selected");

    (session.remember(&resolved), Redirect::to("/")).into_response()
}

/// `POST /chat`: ask a question with the picker value posted alongside it.
/// Blank questions are dropped without a notice, but the posted selection
/// is still stored.
pub async fn submit_chat(
    State(state): State<AppState>,
    session: SessionCookie,
    Form(form): Form<ChatForm>,
) -> Response {
    let (resolved, accepted) = state
        .sessions
        .with_session(session.token(), |s| {
            apply_posted_reference(s, form.reference.as_deref());
            let reference = s.reference;
            s.chat.submit(&form.question, reference)
        })
        .await;
    if !accepted {
        debug!("blank chat input ignored");
    }

    (session.remember(&resolved), Redirect::to("/")).into_response()
}

/// `POST /ideas`: submit an improvement idea tagged with the current reference.
pub async fn submit_idea(
    State(state): State<AppState>,
    session: SessionCookie,
    Form(form): Form<IdeaForm>,
) -> Response {
    let now = Timestamp::now();
    let (resolved, ()) = state
        .sessions
        .with_session(session.token(), |s| {
            apply_posted_reference(s, form.reference.as_deref());
            let reference = s.reference;
            let result = s.ideas.submit(&form.text, reference, now).map(|_| ());
            s.set_notice(submission_notice(result, IDEA_SAVED));
        })
        .await;

    (session.remember(&resolved), Redirect::to("/")).into_response()
}

/// `POST /feedback`: send feedback to the developers.
pub async fn submit_feedback(
    State(state): State<AppState>,
    session: SessionCookie,
    Form(form): Form<TextForm>,
) -> Response {
    let now = Timestamp::now();
    let (resolved, ()) = state
        .sessions
        .with_session(session.token(), |s| {
            let result = s.feedback.submit(&form.text, now).map(|_| ());
            s.set_notice(submission_notice(result, FEEDBACK_SENT));
        })
        .await;

    (session.remember(&resolved), Redirect::to("/")).into_response()
}

/// `POST /session/end`: dispose the caller's session and clear the cookie.
pub async fn end_session(State(state): State<AppState>, session: SessionCookie) -> Response {
    if let Some(token) = session.token() {
        let ended = state.sessions.end(token).await;
        info!(ended, "session end requested");
    }

    (session.forget(), Redirect::to("/")).into_response()
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
