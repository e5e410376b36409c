//! Route definitions for media-host upload authorization.
//!
//! ```text
//! GET /media/auth   media_auth (requires auth)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/media/auth", get(media::media_auth))
}
