use async_trait::async_trait;

use super::domain::AdminAccount;
use super::errors::AuthError;

/// Repository abstraction for admin account lookups.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::auth::password::hash_password;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAdminRepository {
        admins: Mutex<HashMap<String, AdminAccount>>, // key: username
    }

    impl MockAdminRepository {
        /// Register an admin with a freshly hashed password; returns its id.
        pub fn insert(&self, username: &str, password: &str) -> Result<i32, AuthError> {
            let mut admins = self.admins.lock().unwrap();
            let id = admins.len() as i32 + 1;
            let account = AdminAccount { id, username: username.to_string(), password_hash: hash_password(password)? };
            admins.insert(username.to_string(), account);
            Ok(id)
        }
    }

    #[async_trait]
    impl AdminRepository for MockAdminRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AuthError> {
            let admins = self.admins.lock().unwrap();
            Ok(admins.get(username).cloned())
        }
    }
}
