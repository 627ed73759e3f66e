//! HTTP API for the owner registry.
//!
//! # Modules
//!
//! - [`auth`]: Login, registration, logout, and the profile page
//! - [`owners`]: Owner registry CRUD (JSON REST)
//! - [`middleware`]: Authorization gate for protected routes
//!
//! # Endpoints Overview
//!
//! ## Public
//! - `GET  /`                 - Index page
//! - `GET  /health`           - Health check
//! - `GET  /login`            - Login form
//! - `POST /login`            - Authenticate, establish session, redirect to `/`
//! - `GET  /register`         - Registration form
//! - `POST /register`         - Create account, redirect to `/login`
//! - `GET  /api/owners`       - List owners
//! - `POST /api/owners`       - Create owner
//! - `GET/PUT/DELETE /api/owners/{id}` - Single-owner operations
//!
//! ## Protected (authorization gate; unauthenticated → 302 `/login`)
//! - `GET /profile`           - Resolved identity for the session
//! - `GET /logout`            - Terminate session, redirect to `/`

pub mod auth;
pub mod middleware;
pub mod owners;

use axum::{
    Router,
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
};
use pet_hospital::auth::{AuthManager, SessionManager};
use pet_hospital::db::OwnerRepository;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap due to Arc wrappers). The stores behind the
/// managers are explicitly constructed at startup and injected here; nothing
/// reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthManager>,
    pub sessions: Arc<SessionManager>,
    pub owners: Arc<dyn OwnerRepository>,
    /// Session TTL, also used as the session cookie's Max-Age.
    pub session_ttl_secs: i64,
}

/// Create the complete router with all endpoints and middleware.
///
/// The protected routes sit behind the authorization gate
/// ([`middleware::require_session`]); everything else is public.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(index_page))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route(
            "/api/owners",
            get(owners::list_owners).post(owners::create_owner),
        )
        .route(
            "/api/owners/{owner_id}",
            get(owners::get_owner)
                .put(owners::update_owner)
                .delete(owners::delete_owner),
        );

    let protected_routes = Router::new()
        .route("/profile", get(auth::profile))
        .route("/logout", get(auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ));

    // Cross-origin callers get uncredentialed reads only; everything that
    // rides the session cookie stays same-origin.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .with_state(state)
}

async fn index_page() -> Html<&'static str> {
    Html(r#"<h1>Pet Hospital</h1><p><a href="/login">Log in</a> or <a href="/register">register</a>.</p>"#)
}

/// Health check endpoint for monitoring and load balancers.
async fn health_check() -> impl IntoResponse {
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
