use std::sync::Arc;

use tracing::{instrument, warn};

use super::domain::{build_gallery, GalleryImage};
use super::lister::ObjectLister;
use crate::errors::ServiceError;

/// Per-request gallery listing. No caching, no retries.
pub struct GalleryService<L: ObjectLister + ?Sized> {
    lister: Option<Arc<L>>,
    public_base_url: String,
}

impl<L: ObjectLister + ?Sized> GalleryService<L> {
    pub fn new(lister: Arc<L>, public_base_url: impl Into<String>) -> Self {
        Self { lister: Some(lister), public_base_url: public_base_url.into() }
    }

    /// Storage not configured; every listing reports `StorageUnavailable`.
    pub fn unconfigured() -> Self {
        Self { lister: None, public_base_url: String::new() }
    }

    #[instrument(skip(self))]
    pub async fn list_images(&self) -> Result<Vec<GalleryImage>, ServiceError> {
        let lister = match &self.lister {
            Some(l) if !self.public_base_url.trim().is_empty() => l,
            _ => return Err(ServiceError::StorageUnavailable("object storage is not configured".into())),
        };
        let objects = lister.list_all().await.map_err(|e| {
            warn!(error = %e, "gallery listing failed");
            e
        })?;
        Ok(build_gallery(objects, &self.public_base_url))
    }
}
