use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

/// Image as presented to viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImage {
    pub url: String,
    pub filename: String,
    pub last_modified: DateTime<Utc>,
}

pub fn is_jpeg_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    lower.ends_with(".jpg") || lower.ends_with(".jpeg")
}

/// Keep JPEG objects, newest first, mapped onto `public_base_url`.
/// Objects with equal timestamps keep their listing order.
pub fn build_gallery(objects: Vec<StoredObject>, public_base_url: &str) -> Vec<GalleryImage> {
    let base = public_base_url.trim_end_matches('/');
    let mut images: Vec<StoredObject> = objects.into_iter().filter(|o| is_jpeg_key(&o.key)).collect();
    images.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    images
        .into_iter()
        .map(|o| GalleryImage { url: format!("{}/{}", base, o.key), filename: o.key, last_modified: o.last_modified })
        .collect()
}
