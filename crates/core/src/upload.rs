//! Pre-flight validation for video uploads.
//!
//! A file is checked against the media-type allow-list and the size ceiling
//! before a single byte is sent to the media host. Each failure category
//! carries exactly one human-readable message; callers display
//! `error.to_string()` as-is.

/// Maximum accepted upload size: 100 MB.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// MIME types accepted for upload.
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "video/mp4",
    "video/webm",
    "video/quicktime",
    "video/x-matroska",
    "video/x-msvideo",
];

/// Upload failure categories, one human-readable message each.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid file type '{media_type}'. Please upload an MP4, WebM, MOV, MKV, or AVI video")]
    UnsupportedType { media_type: String },

    #[error("File size exceeds the 100 MB limit (got {size_mb:.1} MB)")]
    TooLarge { size_mb: f64 },

    #[error("Network error. Please check your connection and try again")]
    Network(String),

    #[error("The media host rejected the upload. Please try again later")]
    Server(String),

    #[error("Upload was cancelled")]
    Cancelled,
}

/// Returns `true` if the declared media type is on the allow-list.
pub fn is_allowed_media_type(media_type: &str) -> bool {
    ALLOWED_MEDIA_TYPES.contains(&media_type)
}

/// Validate a file's declared media type and size before upload.
///
/// The ceiling is inclusive: a file of exactly [`MAX_UPLOAD_BYTES`] passes.
pub fn validate_upload(media_type: &str, size_bytes: u64) -> Result<(), UploadError> {
    if !is_allowed_media_type(media_type) {
        return Err(UploadError::UnsupportedType {
            media_type: media_type.to_string(),
        });
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size_mb: size_bytes as f64 / (1024.0 * 1024.0),
        });
    }
    Ok(())
}
