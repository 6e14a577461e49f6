use super::*;
use crate::services::answer::PLACEHOLDER_SUFFIX;
use crate::services::reference::Reference;
use crate::state::test_helpers::test_app_state;
use axum::body::Body;
use axum::http::{Request, Response, header};
use tower::ServiceExt;

// =============================================================================
// HELPERS
// =============================================================================

async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("router is infallible")
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{}={token}", session::COOKIE_NAME));
    }
    builder.body(Body::empty()).unwrap()
}

fn form_post(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{}={token}", session::COOKIE_NAME));
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

fn set_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(session::COOKIE_NAME))
        .map(str::to_owned)
}

fn token_from(resp: &Response<Body>) -> String {
    let cookie = set_cookie(resp).expect("session cookie should be set");
    let pair = cookie.split(';').next().unwrap();
    pair.split_once('=').unwrap().1.to_owned()
}

async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn session_view(app: &Router, token: &str) -> serde_json::Value {
    let resp = send(app, get("/api/session", Some(token))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    serde_json::from_str(&body_string(resp).await).unwrap()
}

/// Open a session with a first form post and return its token.
async fn open_session(app: &Router) -> String {
    let resp = send(app, form_post("/reference", None, "reference=")).await;
    token_from(&resp)
}

fn assert_redirects_home(resp: &Response<Body>) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

// =============================================================================
// PAGE + SESSION COOKIE
// =============================================================================

#[tokio::test]
async fn healthz_ok() {
    let app = app(test_app_state());
    let resp = send(&app, get("/healthz", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn first_visit_renders_empty_page_without_session() {
    let state = test_app_state();
    let app = app(state.clone());

    let resp = send(&app, get("/", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookie(&resp).is_none());
    assert!(state.sessions.is_empty().await);

    let html = body_string(resp).await;
    assert!(html.contains("Custom-Level Tutor"));
    assert!(html.contains("No messages yet"));
    assert!(html.contains(r#"action="/session/end""#));
}

#[tokio::test]
async fn cookieless_reads_never_grow_the_store() {
    let state = test_app_state();
    let app = app(state.clone());

    for _ in 0..3 {
        send(&app, get("/", None)).await;
        let resp = send(&app, get("/api/session", Some("crawler-token"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(set_cookie(&resp).is_none());
    }
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn first_post_creates_session_and_sets_cookie() {
    let state = test_app_state();
    let app = app(state.clone());

    let resp = send(&app, form_post("/feedback", None, "text=hello")).await;
    assert_redirects_home(&resp);
    let cookie = set_cookie(&resp).unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));

    let token = token_from(&resp);
    assert!(state.sessions.contains(&token).await);
    assert_eq!(session_view(&app, &token).await["feedback"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn returning_visit_keeps_session_without_new_cookie() {
    let state = test_app_state();
    let app = app(state.clone());
    let token = open_session(&app).await;

    let resp = send(&app, get("/", Some(&token))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookie(&resp).is_none());
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn unknown_cookie_gets_fresh_session() {
    let app = app(test_app_state());
    let resp = send(&app, form_post("/chat", Some("not-a-real-session"), "question=hi")).await;
    let token = token_from(&resp);
    assert_ne!(token, "not-a-real-session");
}

#[tokio::test]
async fn separate_sessions_do_not_share_state() {
    let app = app(test_app_state());
    let a = open_session(&app).await;
    let b = open_session(&app).await;

    send(&app, form_post("/feedback", Some(&a), "text=hello")).await;

    assert_eq!(session_view(&app, &a).await["feedback"].as_array().unwrap().len(), 1);
    assert!(session_view(&app, &b).await["feedback"].as_array().unwrap().is_empty());
}

// =============================================================================
// CHAT
// =============================================================================

#[tokio::test]
async fn chat_with_halliday_appends_question_and_answer() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    let resp = send(&app, form_post("/reference", Some(&token), "reference=Halliday")).await;
    assert_redirects_home(&resp);

    let resp = send(
        &app,
        form_post("/chat", Some(&token), "question=What+is+Newton%27s+second+law%3F"),
    )
    .await;
    assert_redirects_home(&resp);

    let view = session_view(&app, &token).await;
    let chat = view["chat"].as_array().unwrap();
    assert_eq!(chat.len(), 2);
    assert_eq!(chat[0]["role"], "user");
    assert_eq!(chat[0]["content"], "What is Newton's second law?");
    assert_eq!(chat[1]["role"], "assistant");
    let answer = chat[1]["content"].as_str().unwrap();
    assert!(answer.contains("What is Newton's second law?"));
    assert!(answer.contains("Halliday"));
    assert!(answer.contains(PLACEHOLDER_SUFFIX));
}

#[tokio::test]
async fn chat_form_posts_reference_with_question() {
    let state = test_app_state();
    let app = app(state.clone());

    let resp = send(&app, form_post("/chat", None, "question=Q&reference=Halliday")).await;
    assert_redirects_home(&resp);
    let token = token_from(&resp);

    let view = session_view(&app, &token).await;
    let chat = view["chat"].as_array().unwrap();
    assert_eq!(chat.len(), 2);
    assert!(chat[1]["content"].as_str().unwrap().contains("Reference consulted: Halliday"));
    assert_eq!(view["selected_reference"], "Halliday");
}

#[tokio::test]
async fn blank_question_still_stores_posted_reference() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    send(&app, form_post("/chat", Some(&token), "question=&reference=Mechanics")).await;

    let view = session_view(&app, &token).await;
    assert!(view["chat"].as_array().unwrap().is_empty());
    assert_eq!(view["selected_reference"], "Mechanics");
}

#[tokio::test]
async fn blank_chat_is_silently_ignored() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    let resp = send(&app, form_post("/chat", Some(&token), "question=+++")).await;
    assert_redirects_home(&resp);

    let view = session_view(&app, &token).await;
    assert!(view["chat"].as_array().unwrap().is_empty());
    assert!(view["notice"].is_null());
}

#[tokio::test]
async fn chat_history_grows_by_two_per_question() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    for q in ["alpha-question", "beta-question", "gamma-question"] {
        send(&app, form_post("/chat", Some(&token), &format!("question={q}"))).await;
    }

    let view = session_view(&app, &token).await;
    let chat = view["chat"].as_array().unwrap();
    assert_eq!(chat.len(), 6);
    assert_eq!(chat[0]["content"], "alpha-question");
    assert_eq!(chat[2]["content"], "beta-question");
    assert_eq!(chat[4]["content"], "gamma-question");

    let html = body_string(send(&app, get("/", Some(&token))).await).await;
    let alpha = html.find("alpha-question").unwrap();
    let beta = html.find("beta-question").unwrap();
    let gamma = html.find("gamma-question").unwrap();
    assert!(alpha < beta && beta < gamma);
}

// =============================================================================
// REFERENCE
// =============================================================================

#[tokio::test]
async fn reference_selection_round_trip() {
    let state = test_app_state();
    let app = app(state.clone());
    let token = open_session(&app).await;

    send(&app, form_post("/reference", Some(&token), "reference=Mechanics")).await;
    assert_eq!(session_view(&app, &token).await["selected_reference"], "Mechanics");

    send(&app, form_post("/reference", Some(&token), "reference=")).await;
    assert!(session_view(&app, &token).await["selected_reference"].is_null());

    let (_, reference) = state.sessions.with_session(Some(&token), |s| s.reference).await;
    assert_eq!(reference, None::<Reference>);
}

// =============================================================================
// IDEAS
// =============================================================================

#[tokio::test]
async fn whitespace_idea_shows_warning_and_changes_nothing() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    let resp = send(&app, form_post("/ideas", Some(&token), "text=++")).await;
    assert_redirects_home(&resp);

    let view = session_view(&app, &token).await;
    assert!(view["ideas"].as_array().unwrap().is_empty());
    assert_eq!(view["notice"]["level"], "warning");

    let html = body_string(send(&app, get("/", Some(&token))).await).await;
    assert!(html.contains(page::EMPTY_SUBMISSION_WARNING));

    let html = body_string(send(&app, get("/", Some(&token))).await).await;
    assert!(!html.contains(page::EMPTY_SUBMISSION_WARNING));
}

#[tokio::test]
async fn idea_captures_reference_at_submission() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    send(&app, form_post("/reference", Some(&token), "reference=Serway")).await;
    send(&app, form_post("/ideas", Some(&token), "text=Debate+homework")).await;
    send(&app, form_post("/reference", Some(&token), "reference=Halliday")).await;
    send(&app, form_post("/ideas", Some(&token), "text=Lab+videos")).await;

    let view = session_view(&app, &token).await;
    let ideas = view["ideas"].as_array().unwrap();
    assert_eq!(ideas.len(), 2);
    assert_eq!(ideas[0]["text"], "Lab videos");
    assert_eq!(ideas[0]["reference"], "Halliday");
    assert_eq!(ideas[1]["text"], "Debate homework");
    assert_eq!(ideas[1]["reference"], "Serway");
    assert_eq!(view["notice"]["message"], page::IDEA_SAVED);
}

#[tokio::test]
async fn idea_form_posts_reference_with_text() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    send(&app, form_post("/ideas", Some(&token), "text=Worked+examples&reference=Serway")).await;
    send(&app, form_post("/ideas", Some(&token), "text=Fewer+symbols&reference=")).await;

    let view = session_view(&app, &token).await;
    let ideas = view["ideas"].as_array().unwrap();
    assert_eq!(ideas[0]["text"], "Fewer symbols");
    assert_eq!(ideas[0]["reference"], "No reference selected");
    assert_eq!(ideas[1]["reference"], "Serway");
    assert!(view["selected_reference"].is_null());
}

// =============================================================================
// FEEDBACK
// =============================================================================

#[tokio::test]
async fn first_feedback_is_listed_with_utc_timestamp() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    let resp = send(&app, form_post("/feedback", Some(&token), "text=Add+dark+mode")).await;
    assert_redirects_home(&resp);

    let view = session_view(&app, &token).await;
    let feedback = view["feedback"].as_array().unwrap();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0]["text"], "Add dark mode");

    let html = body_string(send(&app, get("/", Some(&token))).await).await;
    assert!(html.contains(page::FEEDBACK_SENT));
    assert!(html.contains(" UTC) Add dark mode"));
}

#[tokio::test]
async fn empty_feedback_shows_warning() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    send(&app, form_post("/feedback", Some(&token), "text=")).await;

    let view = session_view(&app, &token).await;
    assert!(view["feedback"].as_array().unwrap().is_empty());
    assert_eq!(view["notice"]["message"], page::EMPTY_SUBMISSION_WARNING);
}

#[tokio::test]
async fn feedback_lists_newest_first() {
    let app = app(test_app_state());
    let token = open_session(&app).await;

    send(&app, form_post("/feedback", Some(&token), "text=older")).await;
    send(&app, form_post("/feedback", Some(&token), "text=newer")).await;

    let view = session_view(&app, &token).await;
    let feedback = view["feedback"].as_array().unwrap();
    assert_eq!(feedback[0]["text"], "newer");
    assert_eq!(feedback[1]["text"], "older");
}

// =============================================================================
// SESSION END
// =============================================================================

#[tokio::test]
async fn end_session_disposes_state_and_clears_cookie() {
    let state = test_app_state();
    let app = app(state.clone());
    let token = open_session(&app).await;
    send(&app, form_post("/chat", Some(&token), "question=hi")).await;

    let resp = send(&app, form_post("/session/end", Some(&token), "")).await;
    assert_redirects_home(&resp);
    let cookie = set_cookie(&resp).unwrap();
    assert!(cookie.contains("Max-Age=0"));
    assert!(!state.sessions.contains(&token).await);

    let resp = send(&app, get("/api/session", Some(&token))).await;
    assert!(set_cookie(&resp).is_none());
    let view: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert!(view["chat"].as_array().unwrap().is_empty());
    assert!(state.sessions.is_empty().await);
}
