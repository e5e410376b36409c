//! Typed HTTP client for the SCROLLIT API.
//!
//! [`ApiClient`] holds the base URL and, after login, the bearer token used
//! for authenticated calls. No call is retried automatically; failures
//! surface as [`ClientError`] and retry is the caller's explicit decision.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use scrollit_core::types::{DbId, Timestamp};
use scrollit_core::video::VideoTransform;

/// Errors surfaced by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    /// An authenticated call was made before logging in.
    #[error("Not authenticated")]
    Unauthenticated,
}

/// A video record in the documented camelCase wire shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub video_url: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    #[serde(default)]
    pub transform: Option<VideoTransform>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public user info returned by login and the session endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// Request body for creating a video record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<VideoTransform>,
}

/// Short-lived upload credentials issued by `GET /api/media/auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUploadAuth {
    pub token: String,
    pub expire: i64,
    pub signature: String,
    pub upload_url: String,
    pub public_key: String,
    pub folder: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListBody {
    videos: Vec<VideoRecord>,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    access_token: String,
    user: UserInfo,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    user: Option<UserInfo>,
}

#[derive(Debug, Deserialize)]
struct CreateVideoBody {
    video: VideoRecord,
}

/// HTTP client for one SCROLLIT deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
        }
    }

    /// The bearer token captured by the last successful login, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Base API URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::Unauthenticated)
    }

    /// POST /api/auth/register
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// POST /api/auth/login
    ///
    /// On success the session token is stored for subsequent calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserInfo, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: LoginBody = response.json().await?;
        self.token = Some(body.access_token);
        Ok(body.user)
    }

    /// GET /api/auth/session -- the current identity, or none.
    pub async fn session(&self) -> Result<Option<UserInfo>, ClientError> {
        let mut request = self.http.get(self.url("/api/auth/session"));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: SessionBody = response.json().await?;
        Ok(body.user)
    }

    /// GET /api/video -- the feed listing, newest first.
    ///
    /// The server reports an empty feed as a distinct structured 404; this
    /// is the one place that maps it back to an empty list, so callers see
    /// zero results as a state, never as an error.
    pub async fn get_videos(&self) -> Result<Vec<VideoRecord>, ClientError> {
        let response = self.http.get(self.url("/api/video")).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: VideoListBody = response.json().await?;
        Ok(body.videos)
    }

    /// POST /api/video -- record an uploaded video. Requires login.
    pub async fn create_video(&self, video: &NewVideo) -> Result<VideoRecord, ClientError> {
        let token = self.bearer()?;
        let response = self
            .http
            .post(self.url("/api/video"))
            .bearer_auth(token)
            .json(video)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: CreateVideoBody = response.json().await?;
        Ok(body.video)
    }

    /// GET /api/media/auth -- signed upload credentials. Requires login.
    pub async fn media_auth(&self) -> Result<MediaUploadAuth, ClientError> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.url("/api/media/auth"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }
}

/// Turn an error response into a [`ClientError::Api`], preferring the
/// server's structured message when the body parses.
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ApiErrorBody>().await {
        Ok(body) => {
            tracing::debug!(code = ?body.code, %status, "API error response");
            body.error
        }
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    ClientError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/api/video"), "http://localhost:3000/api/video");
    }

    #[test]
    fn authenticated_calls_require_login_first() {
        let client = ApiClient::new("http://localhost:3000");
        assert!(matches!(
            client.bearer(),
            Err(ClientError::Unauthenticated)
        ));
    }

    #[test]
    fn video_record_parses_wire_shape() {
        let json = serde_json::json!({
            "id": 7,
            "userId": 3,
            "videoUrl": "https://media.test/v.mp4",
            "title": "clip",
            "description": "",
            "thumbnailUrl": "https://media.test/v.jpg",
            "transform": { "width": 1920, "height": 1080, "quality": 80 },
            "createdAt": "2025-06-01T12:00:00Z",
            "updatedAt": "2025-06-01T12:00:00Z",
        });
        let record: VideoRecord = serde_json::from_value(json).expect("record should parse");
        assert_eq!(record.id, 7);
        assert_eq!(record.user_id, 3);
        assert_eq!(record.transform.expect("transform present").quality, 80);
    }

    #[test]
    fn video_record_transform_is_optional() {
        let json = serde_json::json!({
            "id": 1,
            "userId": 1,
            "videoUrl": "https://media.test/v.mp4",
            "title": "clip",
            "description": "d",
            "thumbnailUrl": "https://media.test/v.jpg",
            "createdAt": "2025-06-01T12:00:00Z",
            "updatedAt": "2025-06-01T12:00:00Z",
        });
        let record: VideoRecord = serde_json::from_value(json).expect("record should parse");
        assert!(record.transform.is_none());
    }
}
