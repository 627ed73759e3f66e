//! Authorization gate for protected routes.
//!
//! Resolves the session cookie on each request. On success the resolved
//! identity is injected into request extensions so downstream handlers never
//! re-resolve it; otherwise the request is redirected to the login page
//! (302, never a 401/403 body).

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use pet_hospital::auth::User;

use super::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "ph_session";

/// Redirect target for unauthenticated requests.
pub const LOGIN_PATH: &str = "/login";

/// The identity resolved by the authorization gate, available to protected
/// handlers via `Extension<SessionIdentity>`.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    /// The session token the client presented.
    pub token: String,
    /// The user the session resolved to.
    pub user: User,
}

/// Authorization gate middleware.
///
/// # Behavior
///
/// - **Allow**: Valid session cookie → injects [`SessionIdentity`] into
///   request extensions → calls the next handler
/// - **Deny**: Missing cookie, unknown/expired token, or dangling user →
///   302 redirect to `/login`
///
/// A store error during resolution is logged and treated as Deny; no detail
/// reaches the client.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = session_token(request.headers()) {
        match state.sessions.resolve(&token).await {
            Ok(Some(user)) => {
                request
                    .extensions_mut()
                    .insert(SessionIdentity { token, user });
                return next.run(request).await;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "session resolution failed");
            }
        }
    }

    redirect(LOGIN_PATH)
}

/// Extract the session token from the request's cookie headers, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, token) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then(|| token.to_string())
        })
        .next()
}

/// `Set-Cookie` value delivering a session token to the client.
///
/// HttpOnly keeps the token away from scripts; the token itself is opaque
/// 128-bit CSPRNG output, resolvable only server-side.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// 302 redirect response.
pub fn redirect(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("other=1; ph_session=abc123; theme=dark"),
        );
        assert_eq!(session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_session_token_ignores_unrelated_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("ph_session_old=zzz; theme=dark"),
        );
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", 60);
        assert!(cookie.starts_with("ph_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=60"));

        assert!(clear_session_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn test_redirect_is_302() {
        let response = redirect("/login");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }
}
