//! Route definitions for the `/video` resource.
//!
//! ```text
//! GET  /video   list_videos (public, newest first)
//! POST /video   create_video (requires auth)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/video", get(video::list_videos).post(video::create_video))
}
