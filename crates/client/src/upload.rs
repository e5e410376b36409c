//! Upload orchestration.
//!
//! Three steps, mirroring the product flow: validate the file locally,
//! push it to the media host with signed credentials and incremental
//! progress callbacks, then record the returned URL as a video. There is no
//! cancellation token; a transfer the host environment aborts surfaces as
//! the cancelled failure category like any other failure.

use futures::stream;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use scrollit_core::upload::{validate_upload, UploadError};
use scrollit_core::video::VideoTransform;

use crate::api::{ApiClient, ClientError, NewVideo, VideoRecord};

/// Quality requested for uploaded renditions.
const UPLOAD_QUALITY: i32 = 80;

/// Granularity of the progress-counting body stream.
const PROGRESS_CHUNK_BYTES: usize = 64 * 1024;

/// A selected file plus the user-entered metadata.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    /// Declared MIME type, checked against the allow-list before upload.
    pub media_type: String,
    pub bytes: Vec<u8>,
    pub title: String,
    pub description: Option<String>,
}

/// What the media host returns after a successful upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaHostResponse {
    url: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

/// Upload a video end to end.
///
/// `on_progress` receives the transferred fraction in `[0, 1]` as body
/// chunks are handed to the transport; it is a lossy signal, not an exact
/// byte counter.
pub async fn upload_video<F>(
    api: &ApiClient,
    request: UploadRequest,
    mut on_progress: F,
) -> Result<VideoRecord, UploadError>
where
    F: FnMut(f32) + Send + 'static,
{
    // Step 1: pre-flight validation, before a single byte leaves the device.
    validate_upload(&request.media_type, request.bytes.len() as u64)?;

    // Step 2: fetch signed credentials and push the file to the media host.
    let auth = api.media_auth().await.map_err(map_client_error)?;

    let file_name = format!(
        "{}-{}",
        chrono::Utc::now().timestamp_millis(),
        request.file_name
    );

    let total = request.bytes.len();
    on_progress(0.0);

    let mut sent = 0usize;
    let chunks: Vec<Vec<u8>> = request
        .bytes
        .chunks(PROGRESS_CHUNK_BYTES)
        .map(<[u8]>::to_vec)
        .collect();
    let body_stream = stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len();
        on_progress(sent as f32 / total as f32);
        Ok::<Vec<u8>, std::io::Error>(chunk)
    }));

    let part = Part::stream_with_length(reqwest::Body::wrap_stream(body_stream), total as u64)
        .file_name(file_name.clone())
        .mime_str(&request.media_type)
        .map_err(|e| UploadError::Server(e.to_string()))?;

    let form = Form::new()
        .text("token", auth.token)
        .text("expire", auth.expire.to_string())
        .text("signature", auth.signature)
        .text("publicKey", auth.public_key)
        .text("folder", auth.folder)
        .text("fileName", file_name)
        .part("file", part);

    let response = reqwest::Client::new()
        .post(&auth.upload_url)
        .multipart(form)
        .send()
        .await
        .map_err(map_transport_error)?;

    if !response.status().is_success() {
        return Err(UploadError::Server(format!(
            "media host returned {}",
            response.status()
        )));
    }

    let uploaded: MediaHostResponse = response
        .json()
        .await
        .map_err(|e| UploadError::Server(e.to_string()))?;

    tracing::info!(url = %uploaded.url, "Media host accepted upload");

    // Step 3: record the video. The host can generate thumbnails; when it
    // did not, the video URL doubles as the thumbnail source.
    let thumbnail_url = uploaded
        .thumbnail_url
        .unwrap_or_else(|| uploaded.url.clone());

    let new_video = NewVideo {
        title: request.title.trim().to_string(),
        video_url: uploaded.url,
        description: request.description.map(|d| d.trim().to_string()),
        thumbnail_url: Some(thumbnail_url),
        transform: Some(VideoTransform::stored_default(Some(UPLOAD_QUALITY))),
    };

    api.create_video(&new_video).await.map_err(map_client_error)
}

/// Map API-client failures onto the upload failure categories.
fn map_client_error(err: ClientError) -> UploadError {
    match err {
        ClientError::Network(e) => UploadError::Network(e.to_string()),
        ClientError::Api { status, message } => {
            UploadError::Server(format!("{status}: {message}"))
        }
        ClientError::Unauthenticated => {
            UploadError::Server("You must be logged in to upload videos".to_string())
        }
    }
}

/// Map transport failures from the media-host request itself.
///
/// A body error means the transfer was cut off mid-stream (the host
/// environment's abort signal); everything before a response is network.
fn map_transport_error(err: reqwest::Error) -> UploadError {
    if err.is_body() {
        UploadError::Cancelled
    } else if err.is_connect() || err.is_timeout() || err.is_request() {
        UploadError::Network(err.to_string())
    } else {
        UploadError::Server(err.to_string())
    }
}
