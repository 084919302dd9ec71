//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Warn when the static asset directory is missing.
pub async fn ensure_env(static_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(static_dir).await
}

/// Fail fast when a configured file (such as the database CA certificate) is absent.
pub fn require_file(path: &str) -> anyhow::Result<()> {
    common::env::require_file(path)
}
