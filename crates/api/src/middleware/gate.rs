//! Route-gating middleware.
//!
//! Enforces the access policy before any handler runs: every route requires
//! a valid bearer token except the public set (health, the auth endpoints,
//! and the public video listing). Handlers that need the caller's identity
//! still use the [`AuthUser`](crate::middleware::auth::AuthUser) extractor;
//! this gate only decides whether the request gets through at all.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use scrollit_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Returns `true` for routes reachable without a session.
pub fn is_public(method: &Method, path: &str) -> bool {
    // Health probe.
    if path == "/health" {
        return true;
    }
    // Registration, login, and the session probe must work logged out.
    if path == "/api/auth" || path.starts_with("/api/auth/") {
        return true;
    }
    // The feed listing is world-readable; posting a video is not.
    if *method == Method::GET && path == "/api/video" {
        return true;
    }
    false
}

/// Reject non-public requests that lack a valid bearer token.
pub async fn route_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if is_public(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if validate_token(token, &state.config.jwt).is_ok() => {
            next.run(request).await
        }
        _ => AppError::Core(CoreError::Unauthorized(
            "Authentication required".into(),
        ))
        .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_public() {
        assert!(is_public(&Method::GET, "/health"));
    }

    #[test]
    fn auth_endpoints_are_public() {
        assert!(is_public(&Method::POST, "/api/auth/register"));
        assert!(is_public(&Method::POST, "/api/auth/login"));
        assert!(is_public(&Method::GET, "/api/auth/session"));
    }

    #[test]
    fn video_listing_is_public_but_posting_is_not() {
        assert!(is_public(&Method::GET, "/api/video"));
        assert!(!is_public(&Method::POST, "/api/video"));
    }

    #[test]
    fn media_auth_is_gated() {
        assert!(!is_public(&Method::GET, "/api/media/auth"));
    }

    #[test]
    fn unknown_paths_are_gated() {
        assert!(!is_public(&Method::GET, "/api/admin"));
        assert!(!is_public(&Method::GET, "/api/authx"));
    }
}
