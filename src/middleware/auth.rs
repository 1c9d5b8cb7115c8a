use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::Key;

use crate::error::GateError;
use crate::middleware::session::Session;

pub const LOGIN_REQUIRED: &str = "Please login to access the scraper.";

/// Extractor that admits only requests carrying a logged-in session.
/// Yields the username.
#[derive(Debug, Clone)]
pub struct RequireSession(pub String);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await;
        match session.username() {
            Some(username) => Ok(Self(username.to_owned())),
            None => Err(GateError::Unauthorized(LOGIN_REQUIRED.to_string()).into_response()),
        }
    }
}
