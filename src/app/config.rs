use std::time::Duration;

/// Centralized environment configuration.
/// All env vars and defaults are defined here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL. Required.
    pub database_url: String,

    /// Address the HTTP server binds to.
    /// Default: 0.0.0.0:5000
    pub bind_addr: String,

    /// Media adapter: "console" or "cloudinary".
    /// Default: console
    pub media_adapter: String,

    /// Cloudinary API root.
    /// Default: https://api.cloudinary.com/v1_1
    pub cloudinary_api_base: String,

    /// Cloudinary cloud name. Required when media_adapter=cloudinary.
    pub cloudinary_cloud_name: Option<String>,

    /// Cloudinary API key. Required when media_adapter=cloudinary.
    pub cloudinary_api_key: Option<String>,

    /// Cloudinary API secret. Required when media_adapter=cloudinary.
    pub cloudinary_api_secret: Option<String>,

    /// Hash Cloudinary signatures use: "sha1" or "sha256". Must match the account setting.
    /// Default: sha1
    pub cloudinary_signature_algorithm: String,

    /// Timeout for each media store request.
    /// Default: 10 seconds
    pub media_timeout: Duration,
}

impl Config {
    /// Build config from environment variables.
    /// Returns an error if required vars are missing.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env")?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let media_adapter = std::env::var("MEDIA_ADAPTER")
            .unwrap_or_else(|_| "console".to_string());

        let cloudinary_api_base = std::env::var("CLOUDINARY_API_BASE")
            .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string());
        let cloudinary_cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME").ok();
        let cloudinary_api_key = std::env::var("CLOUDINARY_API_KEY").ok();
        let cloudinary_api_secret = std::env::var("CLOUDINARY_API_SECRET").ok();
        let cloudinary_signature_algorithm = std::env::var("CLOUDINARY_SIGNATURE_ALGORITHM")
            .unwrap_or_else(|_| "sha1".to_string());

        let media_timeout = std::env::var("MEDIA_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| "MEDIA_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            database_url,
            bind_addr,
            media_adapter,
            cloudinary_api_base,
            cloudinary_cloud_name,
            cloudinary_api_key,
            cloudinary_api_secret,
            cloudinary_signature_algorithm,
            media_timeout,
        })
    }

    /// Config for tests. Uses in-memory database URL and console media store.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            media_adapter: "console".to_string(),
            cloudinary_api_base: "https://api.cloudinary.com/v1_1".to_string(),
            cloudinary_cloud_name: None,
            cloudinary_api_key: None,
            cloudinary_api_secret: None,
            cloudinary_signature_algorithm: "sha1".to_string(),
            media_timeout: Duration::from_secs(10),
        }
    }
}
