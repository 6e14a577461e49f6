//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One server-rendered page at `/`. Every interaction is an HTML form post
//! that mutates the caller's session and redirects back to the page
//! (post/redirect/get). `/api/session` exposes the same view model as JSON.

pub mod page;
pub mod session;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/reference", post(page::select_reference))
        .route("/chat", post(page::submit_chat))
        .route("/ideas", post(page::submit_idea))
        .route("/feedback", post(page::submit_feedback))
        .route("/session/end", post(page::end_session))
        .route("/api/session", get(page::session_json))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
