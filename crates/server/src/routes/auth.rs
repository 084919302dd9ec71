use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use configs::{SessionConfig, MAX_SESSION_TTL_SECS};
use serde::Serialize;

use service::auth::{domain::LoginInput, repository::AdminRepository, AuthService};
use service::events::Broadcaster;
use service::gallery::{lister::ObjectLister, GalleryService};
use service::packages::{repository::PackageRepository, PackageService};
use service::session::{store::SessionStore, SessionService};

use crate::errors::ApiError;

pub type DynPackageService = PackageService<dyn PackageRepository>;
pub type DynAuthService = AuthService<dyn AdminRepository, dyn SessionStore>;
pub type DynSessionService = SessionService<dyn SessionStore>;
pub type DynGalleryService = GalleryService<dyn ObjectLister>;

/// Session cookie attributes; lifetime matches the server-side session TTL.
#[derive(Clone, Debug)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: i64,
}

impl From<&SessionConfig> for CookieSettings {
    fn from(cfg: &SessionConfig) -> Self {
        Self {
            name: cfg.cookie_name.clone(),
            secure: cfg.secure_cookie,
            max_age_secs: cfg.ttl_secs.min(MAX_SESSION_TTL_SECS) as i64,
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub packages: Arc<DynPackageService>,
    pub auth: Arc<DynAuthService>,
    pub sessions: Arc<DynSessionService>,
    pub gallery: Arc<DynGalleryService>,
    pub broadcaster: Arc<Broadcaster>,
    pub cookies: CookieSettings,
}

impl ServerState {
    /// Wire services over the given stores.
    pub fn new(
        packages: Arc<dyn PackageRepository>,
        admins: Arc<dyn AdminRepository>,
        session_store: Arc<dyn SessionStore>,
        gallery: DynGalleryService,
        broadcaster: Arc<Broadcaster>,
        session_cfg: &SessionConfig,
    ) -> Self {
        let ttl = chrono::Duration::seconds(session_cfg.ttl_secs.min(MAX_SESSION_TTL_SECS) as i64);
        let sessions = Arc::new(SessionService::new(session_store, ttl));
        Self {
            packages: Arc::new(PackageService::new(packages)),
            auth: Arc::new(AuthService::new(admins, sessions.clone())),
            sessions,
            gallery: Arc::new(gallery),
            broadcaster,
            cookies: CookieSettings::from(session_cfg),
        }
    }

    fn session_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build(Cookie::new(self.cookies.name.clone(), value))
            .path("/")
            .http_only(true)
            .secure(self.cookies.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.cookies.max_age_secs))
            .build()
    }

    fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build(Cookie::new(self.cookies.name.clone(), "")).path("/").build()
    }
}

/// Identity attached to guarded requests by [`require_admin_session`].
#[derive(Clone, Debug)]
pub struct AuthenticatedAdmin {
    pub admin_id: i32,
    pub session_id: String,
}

#[derive(Serialize)]
pub struct LoginPage {
    pub action: &'static str,
    pub fields: [&'static str; 2],
}

pub async fn login_page() -> Json<LoginPage> {
    Json(LoginPage { action: "/login", fields: ["username", "password"] })
}

/// Verify credentials, set the session cookie and continue to the dashboard.
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(input): Form<LoginInput>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let session = state.auth.authenticate(input).await?;
    let jar = jar.add(state.session_cookie(session.session_id));
    Ok((jar, Redirect::to("/admin/dashboard")))
}

/// Delete the server-side session before clearing the cookie; a failed delete
/// keeps the cookie and reports the error.
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> Result<(CookieJar, Redirect), ApiError> {
    if let Some(cookie) = jar.get(&state.cookies.name) {
        state.sessions.destroy(cookie.value()).await?;
    }
    let jar = jar.remove(state.clear_cookie());
    Ok((jar, Redirect::to("/login")))
}

/// Guard for `/admin/*`: a live session is required, otherwise redirect to `/login`.
pub async fn require_admin_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(session_id) = jar.get(&state.cookies.name).map(|c| c.value().to_string()) else {
        return Redirect::to("/login").into_response();
    };
    match state.sessions.resolve(&session_id).await {
        Ok(Some(session)) => {
            req.extensions_mut().insert(AuthenticatedAdmin { admin_id: session.data.admin_id, session_id });
            next.run(req).await
        }
        Ok(None) => Redirect::to("/login").into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
