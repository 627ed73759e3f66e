//! Authentication route handlers.
//!
//! Browser-facing login, registration, and logout. These are form posts with
//! redirect outcomes rather than a JSON API: failed logins always land back
//! on `/login` with the same generic outcome regardless of cause, so login
//! names cannot be enumerated.

use axum::{
    Extension, Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use pet_hospital::auth::{RegisterRequest, User};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use super::middleware::{
    LOGIN_PATH, SessionIdentity, clear_session_cookie, redirect, session_cookie, session_token,
};
use crate::logging::log_security_event;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Serve the login form.
pub async fn login_page() -> Html<&'static str> {
    Html(
        r#"<form method="post" action="/login">
  <input name="username" placeholder="Username">
  <input name="password" type="password" placeholder="Password">
  <button type="submit">Log in</button>
</form>"#,
    )
}

/// Serve the registration form.
pub async fn register_page() -> Html<&'static str> {
    Html(
        r#"<form method="post" action="/register">
  <input name="username" placeholder="Username">
  <input name="password" type="password" placeholder="Password">
  <input name="email" placeholder="Email">
  <input name="first_name" placeholder="First name">
  <input name="last_name" placeholder="Last name">
  <button type="submit">Register</button>
</form>"#,
    )
}

/// Handle a login submission.
///
/// On success, establishes a session (replacing any session the client
/// already carried), sets the session cookie, and redirects to `/`. Every
/// failure redirects back to `/login` with no distinguishing detail; the
/// unknown-user vs. wrong-password distinction only reaches the security log.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let user = match state
        .auth
        .verify_credentials(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e) if e.is_credential_failure() => {
            log_security_event("failed_login", Some(form.username.as_str()), &e.to_string());
            return redirect(LOGIN_PATH);
        }
        Err(e) => {
            tracing::error!(error = %e, "credential lookup failed");
            return redirect(LOGIN_PATH);
        }
    };

    // One active identity per client: replace whatever session the browser
    // carried before this login.
    let previous = session_token(&headers);
    match state.sessions.establish(user.id, previous.as_deref()).await {
        Ok(token) => {
            let cookie = session_cookie(&token, state.session_ttl_secs);
            (
                StatusCode::FOUND,
                [
                    (header::LOCATION, "/".to_string()),
                    (header::SET_COOKIE, cookie),
                ],
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = user.id, "failed to establish session");
            redirect(LOGIN_PATH)
        }
    }
}

/// Handle a registration submission.
///
/// Hashes the password, creates the user, and redirects to `/login`; any
/// failure redirects back to `/register`.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let request = RegisterRequest {
        username: form.username,
        password: form.password,
        email: form.email,
        first_name: form.first_name,
        last_name: form.last_name,
    };

    match state.auth.register(request).await {
        Ok(_user) => redirect(LOGIN_PATH),
        Err(e) => {
            tracing::warn!(reason = %e, "registration failed");
            redirect("/register")
        }
    }
}

/// Terminate the current session and redirect to `/`.
///
/// The one hard-error path: a session that cannot be destroyed should be
/// visible, so a terminate failure returns 500 instead of redirecting.
pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> Response {
    match state.sessions.terminate(&identity.token).await {
        Ok(()) => (
            StatusCode::FOUND,
            [
                (header::LOCATION, "/".to_string()),
                (header::SET_COOKIE, clear_session_cookie()),
            ],
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = identity.user.id, "logout failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": e.client_message() })),
            )
                .into_response()
        }
    }
}

/// Return the identity the authorization gate resolved for this request.
pub async fn profile(Extension(identity): Extension<SessionIdentity>) -> Json<User> {
    Json(identity.user)
}
