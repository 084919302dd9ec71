use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{AdminSession, LoginInput};
use super::errors::AuthError;
use super::password::{dummy_hash, verify_password};
use super::repository::AdminRepository;
use crate::session::{store::SessionStore, SessionService};

/// Checks a plaintext password against a PHC string.
pub type VerifyFn = fn(&str, &str) -> Result<bool, AuthError>;

/// Admin authentication independent of web framework
pub struct AuthService<R: AdminRepository + ?Sized, S: SessionStore + ?Sized> {
    repo: Arc<R>,
    sessions: Arc<SessionService<S>>,
    verify: VerifyFn,
}

impl<R: AdminRepository + ?Sized, S: SessionStore + ?Sized> AuthService<R, S> {
    pub fn new(repo: Arc<R>, sessions: Arc<SessionService<S>>) -> Self {
        Self { repo, sessions, verify: verify_password }
    }

    /// Replace the Argon2 verifier, e.g. to observe calls in tests.
    pub fn with_verifier(mut self, verify: VerifyFn) -> Self {
        self.verify = verify;
        self
    }

    /// Verify credentials and open a session for the admin.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, domain::LoginInput, repository::mock::MockAdminRepository};
    /// use service::session::{SessionService, store::memory::MemorySessionStore};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAdminRepository::default());
    /// repo.insert("owner", "s3cret-pass").unwrap();
    /// let sessions = Arc::new(SessionService::new(Arc::new(MemorySessionStore::default()), chrono::Duration::days(30)));
    /// let svc = AuthService::new(repo, sessions);
    /// let login = LoginInput { username: "owner".into(), password: "s3cret-pass".into() };
    /// let session = tokio_test::block_on(svc.authenticate(login)).unwrap();
    /// assert_eq!(session.admin_id, 1);
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn authenticate(&self, input: LoginInput) -> Result<AdminSession, AuthError> {
        let Some(admin) = self.repo.find_by_username(&input.username).await? else {
            // Same Argon2 cost as a wrong password for an existing admin
            if let Some(phc) = dummy_hash() {
                let _ = (self.verify)(&input.password, phc);
            }
            return Err(AuthError::InvalidCredentials);
        };

        let matches = match (self.verify)(&input.password, &admin.password_hash) {
            Ok(m) => m,
            Err(e) => {
                // Unreadable stored hash: report as a failed login, keep the cause in logs
                warn!(admin_id = admin.id, error = %e, "stored password hash rejected");
                false
            }
        };
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.sessions.create(admin.id).await?;
        info!(event = "admin_login", admin_id = admin.id);
        Ok(AdminSession { admin_id: admin.id, session_id: session.id, expires_at: session.expires_at })
    }
}
