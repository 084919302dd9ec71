//! Shared helpers for every crate of the site: logging setup, startup
//! environment checks and small wire types.

pub mod types;
pub mod utils;
pub mod env;
