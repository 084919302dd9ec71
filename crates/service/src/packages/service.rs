use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{group_by_category, CategoryGroup, Package, PackageInput};
use super::repository::PackageRepository;
use crate::errors::ServiceError;

/// Pricelist business service independent of web framework
pub struct PackageService<R: PackageRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PackageRepository + ?Sized> PackageService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Public pricelist grouped by category.
    ///
    /// # Examples
    /// ```
    /// use service::packages::{PackageService, domain::PackageInput, repository::mock::MockPackageRepository};
    /// use std::sync::Arc;
    /// let svc = PackageService::new(Arc::new(MockPackageRepository::default()));
    /// let input = PackageInput { category: "Wedding".into(), name: "Basic".into(), price: 100, features: String::new(), contact_message_template: String::new() };
    /// tokio_test::block_on(svc.create(input)).unwrap();
    /// let groups = tokio_test::block_on(svc.pricelist()).unwrap();
    /// assert_eq!(groups[0].category, "Wedding");
    /// ```
    pub async fn pricelist(&self) -> Result<Vec<CategoryGroup>, ServiceError> {
        Ok(group_by_category(self.repo.list_public().await?))
    }

    pub async fn list_public(&self) -> Result<Vec<Package>, ServiceError> {
        self.repo.list_public().await
    }

    pub async fn list_admin(&self) -> Result<Vec<Package>, ServiceError> {
        self.repo.list_admin().await
    }

    pub async fn get(&self, id: i32) -> Result<Package, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("package"))
    }

    #[instrument(skip(self, input), fields(category = %input.category, name = %input.name))]
    pub async fn create(&self, input: PackageInput) -> Result<Package, ServiceError> {
        input.validate()?;
        let created = self.repo.create(&input).await?;
        info!(event = "package_created", package_id = created.id);
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: PackageInput) -> Result<Package, ServiceError> {
        input.validate()?;
        let updated = self
            .repo
            .update(id, &input)
            .await?
            .ok_or_else(|| ServiceError::not_found("package"))?;
        info!(event = "package_updated", package_id = id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("package"));
        }
        info!(event = "package_deleted", package_id = id);
        Ok(())
    }
}
