//! Video record rules: display transform defaults and field validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of a video description in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2200;

/// Transform applied to a stored video record when the uploader supplies none.
pub const DEFAULT_TRANSFORM_WIDTH: i32 = 1920;
pub const DEFAULT_TRANSFORM_HEIGHT: i32 = 1080;
pub const DEFAULT_TRANSFORM_QUALITY: i32 = 100;

/// Portrait rendition requested by the feed player.
pub const FEED_DISPLAY_WIDTH: i32 = 1080;
pub const FEED_DISPLAY_HEIGHT: i32 = 1920;
pub const FEED_DISPLAY_QUALITY: i32 = 80;

/// Display transform attached to a video record.
///
/// Stored verbatim and echoed back to clients; the media host interprets it
/// when serving renditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoTransform {
    pub width: i32,
    pub height: i32,
    pub quality: i32,
}

impl VideoTransform {
    /// The transform stored when the uploader supplies none, with an
    /// optional caller-provided quality override.
    pub fn stored_default(quality: Option<i32>) -> Self {
        Self {
            width: DEFAULT_TRANSFORM_WIDTH,
            height: DEFAULT_TRANSFORM_HEIGHT,
            quality: quality.unwrap_or(DEFAULT_TRANSFORM_QUALITY),
        }
    }

    /// The portrait rendition the feed player asks the media host for.
    pub fn feed_display() -> Self {
        Self {
            width: FEED_DISPLAY_WIDTH,
            height: FEED_DISPLAY_HEIGHT,
            quality: FEED_DISPLAY_QUALITY,
        }
    }
}

/// Validate that a video title is non-empty after trimming.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    Ok(())
}

/// Validate that a video URL is non-empty and uses an http(s) scheme.
pub fn validate_video_url(url: &str) -> Result<(), CoreError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Video URL is required".to_string()));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(CoreError::Validation(format!(
            "Video URL must start with http:// or https://, got: '{trimmed}'"
        )));
    }
    Ok(())
}

/// Validate that a description fits within [`MAX_DESCRIPTION_LEN`].
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn nonempty_title_accepted() {
        assert!(validate_title("My first clip").is_ok());
    }

    #[test]
    fn video_url_requires_http_scheme() {
        assert!(validate_video_url("https://media.example/v/abc.mp4").is_ok());
        assert!(validate_video_url("http://media.example/v/abc.mp4").is_ok());
        assert!(validate_video_url("ftp://media.example/v/abc.mp4").is_err());
        assert!(validate_video_url("").is_err());
        assert!(validate_video_url("   ").is_err());
    }

    #[test]
    fn description_cap_is_inclusive() {
        let at_cap = "x".repeat(MAX_DESCRIPTION_LEN);
        assert!(validate_description(&at_cap).is_ok());

        let over_cap = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(validate_description(&over_cap).is_err());
    }

    #[test]
    fn stored_default_keeps_quality_override() {
        let t = VideoTransform::stored_default(Some(80));
        assert_eq!(t.width, 1920);
        assert_eq!(t.height, 1080);
        assert_eq!(t.quality, 80);

        let t = VideoTransform::stored_default(None);
        assert_eq!(t.quality, DEFAULT_TRANSFORM_QUALITY);
    }

    #[test]
    fn feed_display_is_portrait() {
        let t = VideoTransform::feed_display();
        assert!(t.height > t.width);
    }
}
