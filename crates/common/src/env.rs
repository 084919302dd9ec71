//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the listener is bound.

use std::path::Path;

use tracing::warn;

/// Warn when the static assets directory is missing; the site still serves
/// its JSON routes without it.
pub async fn ensure_env(static_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static assets directory not found; frontend files will 404");
    }
    Ok(())
}

/// Fail fast when a required file (e.g. the database CA certificate) is absent.
pub fn require_file(path: &str) -> anyhow::Result<()> {
    if !Path::new(path).is_file() {
        return Err(anyhow::anyhow!("required file not found: {path}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_file_rejects_missing_path() {
        let missing = std::env::temp_dir().join("portrait-site-definitely-missing.pem");
        assert!(require_file(missing.to_str().unwrap()).is_err());
    }

    #[test]
    fn require_file_accepts_existing_file() {
        let path = std::env::temp_dir().join(format!("portrait-site-ca-{}.pem", std::process::id()));
        std::fs::write(&path, b"-----BEGIN CERTIFICATE-----").unwrap();
        assert!(require_file(path.to_str().unwrap()).is_ok());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn ensure_env_tolerates_missing_static_dir() {
        assert!(ensure_env("/nonexistent/static/dir").await.is_ok());
    }
}
