use async_trait::async_trait;

use super::{Destroyed, MediaError, MediaStore};
use crate::app::domain::MediaKind;

/// Console media store for local development.
/// Logs each destroy using tracing::info! and reports it as deleted.
#[derive(Debug)]
pub struct ConsoleMediaStore;

#[async_trait]
impl MediaStore for ConsoleMediaStore {
    async fn destroy(&self, public_id: &str, kind: MediaKind) -> Result<Destroyed, MediaError> {
        tracing::info!(
            public_id = %public_id,
            resource_type = kind.resource_type(),
            "Media destroyed (console)"
        );
        Ok(Destroyed::Deleted)
    }
}
