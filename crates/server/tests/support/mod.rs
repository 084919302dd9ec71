//! In-memory wiring of the full router for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use configs::SessionConfig;
use http_body_util::BodyExt;
use service::auth::repository::mock::MockAdminRepository;
use service::events::Broadcaster;
use service::gallery::lister::{mock::StaticObjectLister, ObjectLister};
use service::gallery::GalleryService;
use service::packages::repository::mock::MockPackageRepository;
use service::session::store::{memory::MemorySessionStore, SessionStore};
use tower::ServiceExt;

use server::routes::{self, auth::ServerState};

pub const ADMIN_USER: &str = "owner";
pub const ADMIN_PASSWORD: &str = "correct-password";
pub const PUBLIC_BASE_URL: &str = "https://photos.example.com/";

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub packages: Arc<MockPackageRepository>,
    pub sessions: Arc<MemorySessionStore>,
    pub lister: Arc<StaticObjectLister>,
}

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

pub fn build_app() -> TestApp {
    build_app_with_session_store(|memory| memory)
}

/// Like [`build_app`], but the router talks to whatever store `wrap` builds
/// around the in-memory one.
pub fn build_app_with_session_store(
    wrap: impl FnOnce(Arc<MemorySessionStore>) -> Arc<dyn SessionStore>,
) -> TestApp {
    let lister = Arc::new(StaticObjectLister::default());
    let dyn_lister: Arc<dyn ObjectLister> = lister.clone();
    build_with_gallery(GalleryService::new(dyn_lister, PUBLIC_BASE_URL), lister, wrap)
}

pub fn build_app_without_storage() -> TestApp {
    build_with_gallery(GalleryService::unconfigured(), Arc::new(StaticObjectLister::default()), |memory| memory)
}

fn build_with_gallery(
    gallery: GalleryService<dyn ObjectLister>,
    lister: Arc<StaticObjectLister>,
    wrap: impl FnOnce(Arc<MemorySessionStore>) -> Arc<dyn SessionStore>,
) -> TestApp {
    let packages = Arc::new(MockPackageRepository::default());
    let sessions = Arc::new(MemorySessionStore::default());
    let admins = Arc::new(MockAdminRepository::default());
    admins.insert(ADMIN_USER, ADMIN_PASSWORD).expect("seed admin");

    let state = ServerState::new(
        packages.clone(),
        admins,
        wrap(sessions.clone()),
        gallery,
        Arc::new(Broadcaster::new()),
        &SessionConfig::default(),
    );
    let router = routes::build_router(state.clone(), cors(), "tests/no-static-dir");
    TestApp { router, state, packages, sessions, lister }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap()).await
    }

    /// Log in as the seeded admin and return the `name=value` cookie pair.
    pub async fn login(&self) -> String {
        let form = format!("username={ADMIN_USER}&password={ADMIN_PASSWORD}");
        let res = self.post_form("/login", &form, None).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        session_cookie(&res).expect("session cookie")
    }
}

/// `name=value` part of the first Set-Cookie header.
pub fn session_cookie(res: &Response<Body>) -> Option<String> {
    let raw = res.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(|s| s.trim().to_string())
}

pub fn set_cookie_header(res: &Response<Body>) -> String {
    res.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn location(res: &Response<Body>) -> Option<String> {
    res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()).map(str::to_string)
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = res.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
