//! Video entity model and DTOs.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use scrollit_core::types::{DbId, Timestamp};
use scrollit_core::video::VideoTransform;

/// A video row from the `videos` table.
///
/// Serializes in the camelCase wire shape the feed clients consume:
/// `{ id, userId, videoUrl, title, description, thumbnailUrl, transform?,
/// createdAt, updatedAt }`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: DbId,
    pub user_id: DbId,
    pub video_url: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Json<VideoTransform>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new video record.
#[derive(Debug, Clone)]
pub struct CreateVideo {
    pub user_id: DbId,
    pub video_url: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub transform: Option<VideoTransform>,
}
