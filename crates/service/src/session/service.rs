use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::{debug, info, instrument};

use super::domain::{SessionData, SessionRecord};
use super::store::SessionStore;
use crate::errors::ServiceError;

const SESSION_ID_LEN: usize = 48;

/// Issues and resolves login sessions with a fixed lifetime counted from creation.
pub struct SessionService<S: SessionStore + ?Sized> {
    store: Arc<S>,
    ttl: Duration,
}

impl<S: SessionStore + ?Sized> SessionService<S> {
    pub fn new(store: Arc<S>, ttl: Duration) -> Self { Self { store, ttl } }

    pub fn ttl(&self) -> Duration { self.ttl }

    /// Create a session for `admin_id`.
    ///
    /// # Examples
    /// ```
    /// use service::session::{SessionService, store::memory::MemorySessionStore};
    /// use std::sync::Arc;
    /// let svc = SessionService::new(Arc::new(MemorySessionStore::default()), chrono::Duration::hours(1));
    /// let s = tokio_test::block_on(svc.create(3)).unwrap();
    /// let found = tokio_test::block_on(svc.resolve(&s.id)).unwrap().unwrap();
    /// assert_eq!(found.data.admin_id, 3);
    /// ```
    #[instrument(skip(self))]
    pub async fn create(&self, admin_id: i32) -> Result<SessionRecord, ServiceError> {
        self.create_at(admin_id, Utc::now()).await
    }

    pub async fn create_at(&self, admin_id: i32, now: DateTime<Utc>) -> Result<SessionRecord, ServiceError> {
        let record = SessionRecord {
            id: new_session_id(),
            data: SessionData { admin_id },
            expires_at: now + self.ttl,
        };
        self.store.create(&record).await?;
        info!(event = "session_created", admin_id, expires_at = %record.expires_at);
        Ok(record)
    }

    /// Live session for a cookie value; expired or unknown ids resolve to `None`.
    pub async fn resolve(&self, id: &str) -> Result<Option<SessionRecord>, ServiceError> {
        self.resolve_at(id, Utc::now()).await
    }

    pub async fn resolve_at(&self, id: &str, now: DateTime<Utc>) -> Result<Option<SessionRecord>, ServiceError> {
        if id.is_empty() {
            return Ok(None);
        }
        self.store.load(id, now).await
    }

    #[instrument(skip_all)]
    pub async fn destroy(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        debug!(event = "session_destroyed");
        Ok(())
    }

    pub async fn purge_expired(&self) -> Result<u64, ServiceError> {
        let removed = self.store.delete_expired(Utc::now()).await?;
        info!(event = "sessions_purged", removed);
        Ok(removed)
    }
}

fn new_session_id() -> String {
    OsRng.sample_iter(&Alphanumeric).take(SESSION_ID_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::memory::MemorySessionStore;

    fn service(ttl: Duration) -> (Arc<MemorySessionStore>, SessionService<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::default());
        (store.clone(), SessionService::new(store, ttl))
    }

    #[tokio::test]
    async fn session_expires_after_fixed_ttl() {
        let (_, svc) = service(Duration::minutes(30));
        let start = Utc::now();
        let s = svc.create_at(1, start).await.unwrap();

        assert!(svc.resolve_at(&s.id, start + Duration::minutes(29)).await.unwrap().is_some());
        assert!(svc.resolve_at(&s.id, start + Duration::minutes(30)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_unique_and_opaque() {
        let (_, svc) = service(Duration::hours(1));
        let a = svc.create(1).await.unwrap();
        let b = svc.create(1).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), SESSION_ID_LEN);
        assert!(a.id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn destroy_and_purge_remove_records() {
        let (store, svc) = service(Duration::hours(1));
        let live = svc.create(1).await.unwrap();
        svc.create_at(2, Utc::now() - Duration::hours(2)).await.unwrap();
        assert_eq!(store.len(), 2);

        assert_eq!(svc.purge_expired().await.unwrap(), 1);
        svc.destroy(&live.id).await.unwrap();
        assert!(store.is_empty());
        assert!(svc.resolve("").await.unwrap().is_none());
    }
}
