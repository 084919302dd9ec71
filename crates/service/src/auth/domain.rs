use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Login form input
#[derive(Clone, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput").field("username", &self.username).finish_non_exhaustive()
    }
}

/// Stored admin account (hashed credentials)
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Successful login: the admin plus the session that now carries it.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: i32,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}
