use async_trait::async_trait;

use super::domain::{Package, PackageInput};
use crate::errors::ServiceError;

/// Repository abstraction for pricelist persistence. Each call is a single statement.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Ordered by category, then price, then id.
    async fn list_public(&self) -> Result<Vec<Package>, ServiceError>;
    /// Ordered by category, then id.
    async fn list_admin(&self) -> Result<Vec<Package>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Package>, ServiceError>;
    async fn create(&self, input: &PackageInput) -> Result<Package, ServiceError>;
    /// `None` when no package has this id.
    async fn update(&self, id: i32, input: &PackageInput) -> Result<Option<Package>, ServiceError>;
    /// Whether a package was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPackageRepository {
        rows: Mutex<BTreeMap<i32, Package>>,
        next_id: Mutex<i32>,
    }

    fn build(id: i32, input: &PackageInput) -> Package {
        Package {
            id,
            category: input.category.clone(),
            name: input.name.clone(),
            price: input.price,
            features: input.features.clone(),
            contact_message_template: input.contact_message_template.clone(),
        }
    }

    #[async_trait]
    impl PackageRepository for MockPackageRepository {
        async fn list_public(&self) -> Result<Vec<Package>, ServiceError> {
            let mut all: Vec<Package> = self.rows.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| (&a.category, a.price, a.id).cmp(&(&b.category, b.price, b.id)));
            Ok(all)
        }

        async fn list_admin(&self) -> Result<Vec<Package>, ServiceError> {
            let mut all: Vec<Package> = self.rows.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| (&a.category, a.id).cmp(&(&b.category, b.id)));
            Ok(all)
        }

        async fn get(&self, id: i32) -> Result<Option<Package>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self, input: &PackageInput) -> Result<Package, ServiceError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let p = build(*next, input);
            self.rows.lock().unwrap().insert(p.id, p.clone());
            Ok(p)
        }

        async fn update(&self, id: i32, input: &PackageInput) -> Result<Option<Package>, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&id) {
                Some(existing) => {
                    *existing = build(id, input);
                    Ok(Some(existing.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }
    }
}
