use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::packages::domain::{Package, PackageInput};
use crate::packages::repository::PackageRepository;

pub struct SeaOrmPackageRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl PackageRepository for SeaOrmPackageRepository {
    async fn list_public(&self) -> Result<Vec<Package>, ServiceError> {
        Ok(models::package::list_public(&self.db).await?)
    }

    async fn list_admin(&self) -> Result<Vec<Package>, ServiceError> {
        Ok(models::package::list_admin(&self.db).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Package>, ServiceError> {
        Ok(models::package::find(&self.db, id).await?)
    }

    async fn create(&self, input: &PackageInput) -> Result<Package, ServiceError> {
        Ok(models::package::create(&self.db, input).await?)
    }

    async fn update(&self, id: i32, input: &PackageInput) -> Result<Option<Package>, ServiceError> {
        Ok(models::package::update(&self.db, id, input).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::package::delete(&self.db, id).await?)
    }
}
