use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::session::domain::{SessionData, SessionRecord};
use crate::session::store::SessionStore;

pub struct SeaOrmSessionStore {
    pub db: DatabaseConnection,
}

fn decode(row: models::session::Model) -> Result<SessionRecord, ServiceError> {
    let data: SessionData = serde_json::from_slice(&row.data)
        .map_err(|e| ServiceError::PersistenceUnavailable(format!("corrupt session payload: {e}")))?;
    Ok(SessionRecord { id: row.id, data, expires_at: row.expires_at.with_timezone(&Utc) })
}

#[async_trait::async_trait]
impl SessionStore for SeaOrmSessionStore {
    async fn create(&self, record: &SessionRecord) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(&record.data)
            .map_err(|e| ServiceError::PersistenceUnavailable(e.to_string()))?;
        models::session::insert(&self.db, &record.id, data, record.expires_at.into()).await?;
        Ok(())
    }

    async fn load(&self, id: &str, now: DateTime<Utc>) -> Result<Option<SessionRecord>, ServiceError> {
        match models::session::find_live(&self.db, id, now.into()).await? {
            Some(row) => decode(row).map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        models::session::delete(&self.db, id).await?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ServiceError> {
        Ok(models::session::delete_expired(&self.db, now.into()).await?)
    }
}
