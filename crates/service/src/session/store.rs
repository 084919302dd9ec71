use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::domain::SessionRecord;
use crate::errors::ServiceError;

/// Persistence abstraction for login sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, record: &SessionRecord) -> Result<(), ServiceError>;
    /// Returns the session only when it has not expired at `now`.
    async fn load(&self, id: &str, now: DateTime<Utc>) -> Result<Option<SessionRecord>, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ServiceError>;
}

/// In-memory store for tests and doc examples
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemorySessionStore {
        sessions: Mutex<HashMap<String, SessionRecord>>,
    }

    impl MemorySessionStore {
        pub fn len(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl SessionStore for MemorySessionStore {
        async fn create(&self, record: &SessionRecord) -> Result<(), ServiceError> {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.insert(record.id.clone(), record.clone());
            Ok(())
        }

        async fn load(&self, id: &str, now: DateTime<Utc>) -> Result<Option<SessionRecord>, ServiceError> {
            let sessions = self.sessions.lock().unwrap();
            Ok(sessions.get(id).filter(|s| !s.is_expired_at(now)).cloned())
        }

        async fn delete(&self, id: &str) -> Result<(), ServiceError> {
            self.sessions.lock().unwrap().remove(id);
            Ok(())
        }

        async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ServiceError> {
            let mut sessions = self.sessions.lock().unwrap();
            let before = sessions.len();
            sessions.retain(|_, s| !s.is_expired_at(now));
            Ok((before - sessions.len()) as u64)
        }
    }
}
