//! Server-side login sessions: domain types, store abstraction and the TTL-aware service.

pub mod domain;
pub mod store;
pub mod service;
pub mod repo;

pub use service::SessionService;
