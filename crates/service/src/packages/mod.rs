//! Pricelist packages: form coercion, repository abstraction and CRUD service.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::PackageService;
