use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::info;

use super::Message;
use crate::db::AccountCreation;
use crate::error::GateError;
use crate::middleware::Session;
use crate::router::GateState;

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /signup -> create an account.
pub async fn signup_handler(
    State(state): State<GateState>,
    Json(form): Json<SignupForm>,
) -> Result<Response, GateError> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(GateError::BadRequest(
            "Username and Password cannot be empty!".to_string(),
        ));
    }
    if !bool::from(form.password.as_bytes().ct_eq(form.confirm_password.as_bytes())) {
        return Err(GateError::BadRequest("Passwords do not match!".to_string()));
    }

    match state
        .accounts
        .create_account(&form.username, &form.password)
        .await?
    {
        AccountCreation::Created => Ok((
            StatusCode::CREATED,
            Json(Message::new("Account created successfully!")),
        )
            .into_response()),
        AccountCreation::Duplicate => Err(GateError::Conflict("Username already exists.".to_string())),
    }
}

/// POST /login -> verify credentials and start a session.
pub async fn login_handler(
    State(state): State<GateState>,
    jar: PrivateCookieJar,
    Json(form): Json<LoginForm>,
) -> Result<Response, GateError> {
    let session = Session::from_jar(&jar);
    if let Some(current) = session.username() {
        return Ok(Json(Message::new(format!("You are logged in as {current}"))).into_response());
    }

    if !state
        .accounts
        .authenticate(&form.username, &form.password)
        .await?
    {
        return Err(GateError::Unauthorized(
            "Invalid username or password.".to_string(),
        ));
    }

    info!(username = %form.username, "login succeeded");
    let jar = Session::login(jar, &form.username, state.secure_cookie);
    Ok((
        jar,
        Json(Message::new(format!("Welcome back, {}!", form.username))),
    )
        .into_response())
}

/// POST /logout -> drop the session cookie.
pub async fn logout_handler(jar: PrivateCookieJar) -> impl IntoResponse {
    if let Some(username) = Session::from_jar(&jar).username() {
        info!(username, "logout");
    }
    (
        Session::logout(jar),
        Json(Message::new("You have been logged out.")),
    )
}
