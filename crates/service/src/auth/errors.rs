use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username and wrong password share this variant and message.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
    #[error("session error: {0}")]
    Session(#[from] ServiceError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::Repository(_) => 1200,
            AuthError::Session(_) => 1201,
        }
    }
}
