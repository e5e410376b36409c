//! Handlers for media-host upload authorization.
//!
//! The media host accepts direct client uploads signed with our private key:
//! the client asks this endpoint for short-lived credentials, uploads the
//! file straight to the host, then records the returned URL via
//! `POST /api/video`. File bytes never pass through this service.

use axum::extract::State;
use axum::Json;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Short-lived upload credentials for the media host.
#[derive(Debug, Serialize)]
pub struct MediaAuthResponse {
    /// Opaque one-time token (UUID v4).
    pub token: String,
    /// Credential expiry (UTC Unix timestamp).
    pub expire: i64,
    /// `HMAC-SHA256(private_key, token + expire)`, hex-encoded.
    pub signature: String,
    /// Where the client should upload the file.
    pub upload_url: String,
    /// Public API key, safe to embed client-side.
    pub public_key: String,
    /// Target folder on the media host.
    pub folder: String,
}

/// Compute the hex-encoded upload signature over `token + expire`.
pub fn sign_upload(
    private_key: &str,
    token: &str,
    expire: i64,
) -> Result<String, hmac::digest::InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(private_key.as_bytes())?;
    mac.update(token.as_bytes());
    mac.update(expire.to_string().as_bytes());
    let bytes = mac.finalize().into_bytes();
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// GET /api/media/auth
///
/// Issue signed upload credentials for the authenticated user.
pub async fn media_auth(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<MediaAuthResponse>> {
    let media = &state.config.media;

    let token = Uuid::new_v4().to_string();
    let expire = chrono::Utc::now().timestamp() + media.auth_expiry_secs;

    let signature = sign_upload(&media.private_key, &token, expire)
        .map_err(|e| AppError::InternalError(format!("Upload signing error: {e}")))?;

    tracing::debug!(user_id = user.user_id, "Issued media upload credentials");

    Ok(Json(MediaAuthResponse {
        token,
        expire,
        signature,
        upload_url: media.upload_url.clone(),
        public_key: media.public_key.clone(),
        folder: media.folder.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_deterministic() {
        let a = sign_upload("private", "token-1", 1_700_000_000).unwrap();
        let b = sign_upload("private", "token-1", 1_700_000_000).unwrap();
        assert_eq!(a, b);
        // SHA-256 output, hex-encoded.
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_varies_with_inputs() {
        let base = sign_upload("private", "token-1", 1_700_000_000).unwrap();
        assert_ne!(base, sign_upload("other-key", "token-1", 1_700_000_000).unwrap());
        assert_ne!(base, sign_upload("private", "token-2", 1_700_000_000).unwrap());
        assert_ne!(base, sign_upload("private", "token-1", 1_700_000_001).unwrap());
    }
}
