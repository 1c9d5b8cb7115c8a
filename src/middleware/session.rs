use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use std::convert::Infallible;
use time::Duration;

pub const SESSION_COOKIE: &str = "quotegate_session";
const SESSION_TTL_HOURS: i64 = 12;

/// Per-browser login state, carried in an encrypted cookie.
///
/// A request without a valid cookie is anonymous; there is no server-side
/// session table, and nothing is shared between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    username: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn from_jar(jar: &PrivateCookieJar) -> Self {
        jar.get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|name| !name.is_empty())
            .map(Self::authenticated)
            .unwrap_or_default()
    }

    /// Add the session cookie for `username` to the jar.
    pub fn login(jar: PrivateCookieJar, username: &str, secure: bool) -> PrivateCookieJar {
        jar.add(build_cookie(username.to_string(), secure))
    }

    pub fn logout(jar: PrivateCookieJar) -> PrivateCookieJar {
        jar.remove(clear_cookie())
    }
}

fn build_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(SESSION_TTL_HOURS))
        .build()
}

fn clear_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self::from_jar(&jar))
    }
}
