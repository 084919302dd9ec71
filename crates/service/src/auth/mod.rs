//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Admin accounts are provisioned out of band; this module only verifies
//! credentials and opens a session on success.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
