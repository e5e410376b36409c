use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Media host credentials for signed uploads.
    pub media: MediaConfig,
}

/// Credentials and endpoints for the external media host.
///
/// The host stores the actual video bytes; this service only signs upload
/// requests and records the durable URLs the host returns.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// URL clients upload files to.
    pub upload_url: String,
    /// Public API key, safe to hand to clients.
    pub public_key: String,
    /// Private key used to sign upload credentials. Never leaves the server.
    pub private_key: String,
    /// Folder on the media host where uploads land.
    pub folder: String,
    /// Lifetime of issued upload credentials in seconds (default: `1800`).
    pub auth_expiry_secs: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            media: MediaConfig::from_env(),
        }
    }
}

impl MediaConfig {
    /// Load media host configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default                |
    /// |--------------------------|----------|------------------------|
    /// | `MEDIA_UPLOAD_URL`       | **yes**  | --                     |
    /// | `MEDIA_PUBLIC_KEY`       | **yes**  | --                     |
    /// | `MEDIA_PRIVATE_KEY`      | **yes**  | --                     |
    /// | `MEDIA_FOLDER`           | no       | `/scrollit-videos/`    |
    /// | `MEDIA_AUTH_EXPIRY_SECS` | no       | `1800`                 |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is not set.
    pub fn from_env() -> Self {
        let upload_url =
            std::env::var("MEDIA_UPLOAD_URL").expect("MEDIA_UPLOAD_URL must be set");
        let public_key =
            std::env::var("MEDIA_PUBLIC_KEY").expect("MEDIA_PUBLIC_KEY must be set");
        let private_key =
            std::env::var("MEDIA_PRIVATE_KEY").expect("MEDIA_PRIVATE_KEY must be set");

        let folder =
            std::env::var("MEDIA_FOLDER").unwrap_or_else(|_| "/scrollit-videos/".into());

        let auth_expiry_secs: i64 = std::env::var("MEDIA_AUTH_EXPIRY_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("MEDIA_AUTH_EXPIRY_SECS must be a valid i64");

        Self {
            upload_url,
            public_key,
            private_key,
            folder,
            auth_expiry_secs,
        }
    }
}
