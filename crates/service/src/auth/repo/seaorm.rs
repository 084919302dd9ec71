use sea_orm::DatabaseConnection;

use crate::auth::domain::AdminAccount;
use crate::auth::errors::AuthError;
use crate::auth::repository::AdminRepository;

pub struct SeaOrmAdminRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AuthError> {
        let res = models::admin::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|a| AdminAccount { id: a.id, username: a.username, password_hash: a.password_hash }))
    }
}
