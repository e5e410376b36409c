pub mod auth;
pub mod health;
pub mod media;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register   register (public)
/// /auth/login      login (public)
/// /auth/session    current identity or none (public, optional bearer)
///
/// /video           GET list (public), POST create (requires auth)
///
/// /media/auth      GET upload credentials (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(video::router())
        .merge(media::router())
}
