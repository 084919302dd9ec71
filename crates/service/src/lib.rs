//! Service layer for the studio site: pricelist CRUD, admin authentication,
//! login sessions, the object-storage gallery and the new-photo broadcaster.
//! - Separates business logic from data access (repository traits with SeaORM and in-memory impls).
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod auth;
pub mod packages;
pub mod session;
pub mod gallery;
pub mod events;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
