//! Session cookie plumbing.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::services::session::ResolvedSession;
use crate::state::AppState;

pub const COOKIE_NAME: &str = "tutor_session";

// =============================================================================
// SESSION EXTRACTOR
// =============================================================================

/// Session token carried by the request, if any, plus the cookie jar used to
/// answer with a fresh cookie. The token is not validated here; unknown
/// tokens resolve to a new session in the store.
pub struct SessionCookie {
    pub token: Option<String>,
    pub jar: CookieJar,
    secure: bool,
}

impl<S> FromRequestParts<S> for SessionCookie
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(COOKIE_NAME)
            .map(Cookie::value)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);
        let secure = AppState::from_ref(state).config.cookie_secure;
        Ok(Self { token, jar, secure })
    }
}

impl SessionCookie {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Jar to send back: sets the cookie when the session was just created.
    #[must_use]
    pub fn remember(self, resolved: &ResolvedSession) -> CookieJar {
        if resolved.created {
            self.jar.add(session_cookie(resolved.token.clone(), self.secure, None))
        } else {
            self.jar
        }
    }

    /// Jar to send back after the session was disposed.
    #[must_use]
    pub fn forget(self) -> CookieJar {
        self.jar.add(session_cookie(String::new(), self.secure, Some(Duration::ZERO)))
    }
}

fn session_cookie(token: String, secure: bool, max_age: Option<Duration>) -> Cookie<'static> {
    let mut cookie = Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build();
    if let Some(max_age) = max_age {
        cookie.set_max_age(max_age);
    }
    cookie
}
