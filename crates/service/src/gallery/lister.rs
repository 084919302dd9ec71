use async_trait::async_trait;

use super::domain::StoredObject;
use crate::errors::ServiceError;

/// Lists every object in the configured bucket.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    async fn list_all(&self) -> Result<Vec<StoredObject>, ServiceError>;
}

/// Fixed listings for tests
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct StaticObjectLister {
        objects: Mutex<Vec<StoredObject>>,
        failure: Mutex<Option<String>>,
    }

    impl StaticObjectLister {
        pub fn new(objects: Vec<StoredObject>) -> Self {
            Self { objects: Mutex::new(objects), failure: Mutex::new(None) }
        }

        /// Make every subsequent listing fail with `reason`.
        pub fn fail_with(&self, reason: &str) {
            *self.failure.lock().unwrap() = Some(reason.to_string());
        }

        pub fn push(&self, object: StoredObject) {
            self.objects.lock().unwrap().push(object);
        }
    }

    #[async_trait]
    impl ObjectLister for StaticObjectLister {
        async fn list_all(&self) -> Result<Vec<StoredObject>, ServiceError> {
            if let Some(reason) = self.failure.lock().unwrap().clone() {
                return Err(ServiceError::StorageUnavailable(reason));
            }
            Ok(self.objects.lock().unwrap().clone())
        }
    }
}
