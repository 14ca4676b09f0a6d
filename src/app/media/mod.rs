use std::sync::Arc;

use crate::app::domain::{MediaKind, MediaRef};

/// Result of a destroy call the media store accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destroyed {
    /// The asset existed and was removed.
    Deleted,
    /// The store had no asset under that id.
    NotFound,
}

/// Abstract interface for the media host. Swappable per environment.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    async fn destroy(&self, public_id: &str, kind: MediaKind) -> Result<Destroyed, MediaError>;
}

/// Errors that can occur while talking to the media store.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Media store rejected request: {0}")]
    Rejected(String),
}

/// Outcome of releasing one media reference. Never surfaced to API callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released,
    NotFound,
    Failed(String),
}

/// One attempted release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub public_id: String,
    pub kind: MediaKind,
    pub outcome: ReleaseOutcome,
}

/// Per-request record of every release attempted against the media store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    pub entries: Vec<ReleaseEntry>,
}

impl ReleaseReport {
    pub fn failures(&self) -> impl Iterator<Item = &ReleaseEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, ReleaseOutcome::Failed(_)))
    }

    pub fn released_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == ReleaseOutcome::Released)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Release a single reference. Store errors become `Failed` and are logged, never returned.
pub async fn release(store: &dyn MediaStore, media: &MediaRef) -> ReleaseOutcome {
    match store.destroy(&media.public_id, media.kind).await {
        Ok(Destroyed::Deleted) => ReleaseOutcome::Released,
        Ok(Destroyed::NotFound) => {
            tracing::debug!(public_id = %media.public_id, kind = ?media.kind, "media already absent");
            ReleaseOutcome::NotFound
        }
        Err(err) => {
            tracing::warn!(public_id = %media.public_id, kind = ?media.kind, %err, "media release failed");
            ReleaseOutcome::Failed(err.to_string())
        }
    }
}

/// Release references one at a time, in order. A failure never stops the remaining releases.
/// References without a public id are skipped.
pub async fn release_all(store: &dyn MediaStore, media: &[MediaRef]) -> ReleaseReport {
    let mut report = ReleaseReport::default();
    for item in media.iter().filter(|m| m.is_releasable()) {
        let outcome = release(store, item).await;
        report.entries.push(ReleaseEntry {
            public_id: item.public_id.clone(),
            kind: item.kind,
            outcome,
        });
    }

    tracing::info!(
        attempted = report.entries.len(),
        released = report.released_count(),
        failed = report.failures().count(),
        "media release finished"
    );
    report
}

// Re-export implementations
pub use cloudinary::{CloudinaryMediaStore, SignatureAlgorithm};
pub use console::ConsoleMediaStore;

mod cloudinary;
mod console;

/// Build the media store from config.
pub fn from_config(config: &crate::app::config::Config) -> Result<Arc<dyn MediaStore>, MediaError> {
    match config.media_adapter.as_str() {
        "console" => Ok(Arc::new(ConsoleMediaStore)),
        "cloudinary" => {
            let cloud_name = config.cloudinary_cloud_name.clone().ok_or_else(|| {
                MediaError::Config("CLOUDINARY_CLOUD_NAME is required for cloudinary adapter".to_string())
            })?;
            let api_key = config.cloudinary_api_key.clone().ok_or_else(|| {
                MediaError::Config("CLOUDINARY_API_KEY is required for cloudinary adapter".to_string())
            })?;
            let api_secret = config.cloudinary_api_secret.clone().ok_or_else(|| {
                MediaError::Config("CLOUDINARY_API_SECRET is required for cloudinary adapter".to_string())
            })?;
            let signature_algorithm = config.cloudinary_signature_algorithm.parse::<SignatureAlgorithm>()?;

            Ok(Arc::new(CloudinaryMediaStore::new(
                config.cloudinary_api_base.clone(),
                cloud_name,
                api_key,
                api_secret,
                signature_algorithm,
                config.media_timeout,
            )?))
        }
        _ => Err(MediaError::Config(format!(
            "Unknown MEDIA_ADAPTER: {}",
            config.media_adapter
        ))),
    }
}
