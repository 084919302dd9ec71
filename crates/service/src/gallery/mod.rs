//! Photo gallery backed by an S3-compatible bucket.

pub mod domain;
pub mod lister;
pub mod s3;
pub mod service;

pub use service::GalleryService;
