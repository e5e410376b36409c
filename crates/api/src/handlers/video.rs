//! Handlers for the `/video` resource: the public feed listing and
//! authenticated video creation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use scrollit_core::video::{self, VideoTransform};
use scrollit_db::models::video::{CreateVideo, Video};
use scrollit_db::repositories::VideoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/video`.
///
/// The media file itself never passes through this service; the client
/// uploads it to the media host first and posts the returned URLs here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub transform: Option<TransformRequest>,
}

/// Caller-supplied transform. Only the quality override is honored; the
/// stored dimensions are fixed server-side.
#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    #[serde(default)]
    pub quality: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct VideoListResponse {
    pub videos: Vec<Video>,
}

#[derive(Debug, Serialize)]
pub struct CreateVideoResponse {
    pub success: bool,
    pub video: Video,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/video
///
/// The public feed listing, most recent first. Zero videos is a distinct
/// 404 response (`code = "NOT_FOUND"`), which clients render as the
/// empty-feed state rather than an error.
pub async fn list_videos(State(state): State<AppState>) -> AppResult<Json<VideoListResponse>> {
    let videos = VideoRepo::list_newest_first(&state.pool).await?;

    if videos.is_empty() {
        return Err(AppError::NotFound("No videos found".into()));
    }

    tracing::debug!(count = videos.len(), "Listing feed videos");
    Ok(Json(VideoListResponse { videos }))
}

/// POST /api/video
///
/// Record an uploaded video. Requires a session; rejects missing
/// title/videoUrl before any persistence call.
pub async fn create_video(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateVideoRequest>,
) -> AppResult<(StatusCode, Json<CreateVideoResponse>)> {
    video::validate_title(&input.title)?;
    video::validate_video_url(&input.video_url)?;

    let description = input
        .description
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_string();
    video::validate_description(&description)?;

    // The media host can generate thumbnails; when it did not, the video URL
    // doubles as the thumbnail source.
    let video_url = input.video_url.trim().to_string();
    let thumbnail_url = input
        .thumbnail_url
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| video_url.clone());

    let transform = VideoTransform::stored_default(input.transform.and_then(|t| t.quality));

    let record = CreateVideo {
        user_id: user.user_id,
        video_url,
        title: input.title.trim().to_string(),
        description,
        thumbnail_url,
        transform: Some(transform),
    };

    let video = VideoRepo::create(&state.pool, &record).await?;
    tracing::info!(video_id = video.id, user_id = user.user_id, "Video created");

    Ok((
        StatusCode::CREATED,
        Json(CreateVideoResponse {
            success: true,
            video,
        }),
    ))
}
