use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use super::{Destroyed, MediaError, MediaStore};
use crate::app::domain::MediaKind;

/// Hash used to sign API requests. Must match the account's signature setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl SignatureAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1 => "sha1",
            SignatureAlgorithm::Sha256 => "sha256",
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" => Ok(SignatureAlgorithm::Sha1),
            "sha256" => Ok(SignatureAlgorithm::Sha256),
            other => Err(MediaError::Config(format!(
                "Unknown CLOUDINARY_SIGNATURE_ALGORITHM: {}",
                other
            ))),
        }
    }
}

/// Cloudinary-compatible media store using the signed `destroy` upload API.
#[derive(Debug)]
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    signature_algorithm: SignatureAlgorithm,
}

/// Body returned by `destroy`. Errors come back as `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: Option<String>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryMediaStore {
    /// Create a new Cloudinary client.
    ///
    /// # Arguments
    /// * `api_base` - API root, e.g. `https://api.cloudinary.com/v1_1`
    /// * `cloud_name` - Account cloud name
    /// * `api_key` / `api_secret` - Signing credentials
    /// * `signature_algorithm` - Hash the account expects (sha1 unless changed in the console)
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_base: String,
        cloud_name: String,
        api_key: String,
        api_secret: String,
        signature_algorithm: SignatureAlgorithm,
        timeout: Duration,
    ) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MediaError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            cloud_name,
            api_key,
            api_secret,
            signature_algorithm,
        })
    }

    fn destroy_url(&self, kind: MediaKind) -> String {
        format!(
            "{}/{}/{}/destroy",
            self.api_base,
            self.cloud_name,
            kind.resource_type()
        )
    }
}

/// Hex digest over the sorted signed parameters followed by the API secret.
fn sign(public_id: &str, timestamp: i64, api_secret: &str, algorithm: SignatureAlgorithm) -> String {
    let payload = format!("public_id={}&timestamp={}{}", public_id, timestamp, api_secret);
    match algorithm {
        SignatureAlgorithm::Sha1 => hex::encode(sha1::Sha1::digest(payload.as_bytes())),
        SignatureAlgorithm::Sha256 => hex::encode(Sha256::digest(payload.as_bytes())),
    }
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn destroy(&self, public_id: &str, kind: MediaKind) -> Result<Destroyed, MediaError> {
        let timestamp = OffsetDateTime::now_utc().unix_timestamp();
        let signature = sign(public_id, timestamp, &self.api_secret, self.signature_algorithm);
        let timestamp = timestamp.to_string();

        let response = self
            .client
            .post(self.destroy_url(kind))
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.api_key.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", self.signature_algorithm.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MediaError::Http(format!("destroy request failed: {}", e)))?;

        let status = response.status();
        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Http(format!("unreadable destroy response ({}): {}", status, e)))?;

        if let Some(error) = body.error {
            return Err(MediaError::Rejected(format!("{}: {}", status, error.message)));
        }

        match body.result.as_deref() {
            Some("ok") => Ok(Destroyed::Deleted),
            Some("not found") => Ok(Destroyed::NotFound),
            other => Err(MediaError::Rejected(format!(
                "unexpected destroy result: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::app::{
        domain::MediaRef,
        media::{release, ReleaseOutcome},
    };

    fn store(api_base: String, timeout: Duration) -> CloudinaryMediaStore {
        CloudinaryMediaStore::new(
            api_base,
            "demo".to_string(),
            "key-123".to_string(),
            "secret".to_string(),
            SignatureAlgorithm::Sha1,
            timeout,
        )
        .unwrap()
    }

    #[test]
    fn sha1_signature_is_hex_of_params_and_secret() {
        let sig = sign("portfolio/cover_1", 1_700_000_000, "s3cr3t", SignatureAlgorithm::Sha1);
        assert_eq!(sig, "5e2b72ea9131cd06e1351492383b9f8d9184537c");
    }

    #[test]
    fn sha256_signature_is_hex_of_params_and_secret() {
        let sig = sign("portfolio/cover_1", 1_700_000_000, "s3cr3t", SignatureAlgorithm::Sha256);
        assert_eq!(
            sig,
            "84ac93a9b4b40c017bbbf4d3b1898261c3f100b6a5f52d4a87873e3ff8755617"
        );
    }

    #[test]
    fn signature_algorithm_parses_case_insensitively() {
        assert_eq!("SHA256".parse::<SignatureAlgorithm>().unwrap(), SignatureAlgorithm::Sha256);
        assert_eq!("sha1".parse::<SignatureAlgorithm>().unwrap(), SignatureAlgorithm::Sha1);
        assert!("md5".parse::<SignatureAlgorithm>().is_err());
    }

    #[test]
    fn destroy_url_is_scoped_by_kind() {
        let store = store("https://api.cloudinary.com/v1_1/".to_string(), Duration::from_secs(5));

        assert_eq!(
            store.destroy_url(MediaKind::Image),
            "https://api.cloudinary.com/v1_1/demo/image/destroy"
        );
        assert_eq!(
            store.destroy_url(MediaKind::Video),
            "https://api.cloudinary.com/v1_1/demo/video/destroy"
        );
    }

    #[tokio::test]
    async fn destroy_posts_signed_form_and_maps_ok_to_deleted() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/demo/image/destroy")
                    .x_www_form_urlencoded_tuple("public_id", "portfolio/p1")
                    .x_www_form_urlencoded_tuple("api_key", "key-123")
                    .x_www_form_urlencoded_tuple("signature_algorithm", "sha1")
                    .x_www_form_urlencoded_key_exists("timestamp")
                    .x_www_form_urlencoded_key_exists("signature");
                then.status(200).json_body(json!({ "result": "ok" }));
            })
            .await;

        let result = store(server.base_url(), Duration::from_secs(5))
            .destroy("portfolio/p1", MediaKind::Image)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, Destroyed::Deleted);
    }

    #[tokio::test]
    async fn destroy_maps_not_found_result() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/demo/video/destroy");
                then.status(200).json_body(json!({ "result": "not found" }));
            })
            .await;

        let result = store(server.base_url(), Duration::from_secs(5))
            .destroy("portfolio/v1", MediaKind::Video)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, Destroyed::NotFound);
    }

    #[tokio::test]
    async fn destroy_maps_error_body_to_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/demo/image/destroy");
                then.status(401)
                    .json_body(json!({ "error": { "message": "Invalid Signature" } }));
            })
            .await;

        let err = store(server.base_url(), Duration::from_secs(5))
            .destroy("portfolio/p1", MediaKind::Image)
            .await
            .unwrap_err();

        match err {
            MediaError::Rejected(msg) => assert!(msg.contains("Invalid Signature")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn destroy_maps_non_json_server_error_to_http() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/demo/image/destroy");
                then.status(502).body("<html>Bad Gateway</html>");
            })
            .await;

        let err = store(server.base_url(), Duration::from_secs(5))
            .destroy("portfolio/p1", MediaKind::Image)
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Http(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn slow_destroy_times_out_as_failed_release() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/demo/image/destroy");
                then.status(200)
                    .delay(Duration::from_secs(2))
                    .json_body(json!({ "result": "ok" }));
            })
            .await;

        let store = store(server.base_url(), Duration::from_millis(200));
        let outcome = release(&store, &MediaRef::new("portfolio/p1", "", MediaKind::Image)).await;

        assert!(matches!(outcome, ReleaseOutcome::Failed(_)), "got {:?}", outcome);
    }

    #[test]
    fn destroy_response_parses_result_and_error_shapes() {
        let ok: DestroyResponse = serde_json::from_str(r#"{"result":"ok"}"#).unwrap();
        assert_eq!(ok.result.as_deref(), Some("ok"));

        let err: DestroyResponse =
            serde_json::from_str(r#"{"error":{"message":"Invalid Signature"}}"#).unwrap();
        assert_eq!(err.error.unwrap().message, "Invalid Signature");
    }
}
