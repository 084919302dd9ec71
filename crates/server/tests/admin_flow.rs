mod support;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use service::errors::ServiceError;
use service::session::domain::SessionRecord;
use service::session::store::{memory::MemorySessionStore, SessionStore};
use support::{body_json, build_app, build_app_with_session_store, location, session_cookie, set_cookie_header};

const CREATE_FORM: &str =
    "category=Wedding&name=Gold&price=2500000&features=8+hours%0A200+photos&whatsapp_message=Hi%2C+I+want+Gold";

#[tokio::test]
async fn dashboard_without_session_redirects_to_login() {
    let app = build_app();
    let res = app.get("/admin/dashboard", None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/login"));
}

#[tokio::test]
async fn unknown_session_cookie_redirects_to_login() {
    let app = build_app();
    let res = app.get("/admin/dashboard", Some("sid=forged-session-id")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/login"));
}

#[tokio::test]
async fn expired_session_redirects_to_login() {
    let app = build_app();
    let stale = app.state.sessions.create_at(1, Utc::now() - Duration::days(31)).await.unwrap();
    assert_eq!(app.sessions.len(), 1);

    let res = app.get("/admin/dashboard", Some(&format!("sid={}", stale.id))).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/login"));
}

#[tokio::test]
async fn login_sets_session_cookie_and_redirects_to_dashboard() {
    let app = build_app();
    let res = app.post_form("/login", "username=owner&password=correct-password", None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/admin/dashboard"));

    let header = set_cookie_header(&res);
    assert!(header.starts_with("sid="));
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("Path=/"));
    assert!(header.contains("Max-Age=2592000"));
    assert_eq!(app.sessions.len(), 1);

    let cookie = session_cookie(&res).unwrap();
    let res = app.get("/admin/dashboard", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["admin_id"], 1);
}

#[tokio::test]
async fn failed_logins_are_indistinguishable() {
    let app = build_app();
    let unknown = app.post_form("/login", "username=stranger&password=correct-password", None).await;
    let wrong = app.post_form("/login", "username=owner&password=nope", None).await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&unknown).is_none());
    assert_eq!(body_json(unknown).await, body_json(wrong).await);
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn package_crud_round_trip() {
    let app = build_app();
    let cookie = app.login().await;

    let res = app.post_form("/admin/packages/add", CREATE_FORM, Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/admin/dashboard"));

    let dashboard = body_json(app.get("/admin/dashboard", Some(&cookie)).await).await;
    let created = &dashboard["packages"][0];
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["category"], "Wedding");
    assert_eq!(created["name"], "Gold");
    assert_eq!(created["price"], 2500000);
    assert_eq!(created["features"], "8 hours\n200 photos");
    assert_eq!(created["contact_message_template"], "Hi, I want Gold");

    let edit = body_json(app.get(&format!("/admin/packages/edit/{id}"), Some(&cookie)).await).await;
    assert_eq!(&edit["package"], created);

    let res = app
        .post_form(
            &format!("/admin/packages/edit/{id}"),
            "category=Wedding&name=Gold&price=2750000&features=all+day&contact_message_template=",
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let edit = body_json(app.get(&format!("/admin/packages/edit/{id}"), Some(&cookie)).await).await;
    assert_eq!(edit["package"]["price"], 2750000);
    assert_eq!(edit["package"]["features"], "all day");

    let res = app.post_form(&format!("/admin/packages/delete/{id}"), "", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let res = app.get(&format!("/admin/packages/edit/{id}"), Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_price_is_rejected_and_record_unchanged() {
    let app = build_app();
    let cookie = app.login().await;
    app.post_form("/admin/packages/add", CREATE_FORM, Some(&cookie)).await;
    let before = body_json(app.get("/admin/dashboard", Some(&cookie)).await).await;
    let id = before["packages"][0]["id"].as_i64().unwrap();

    let res = app
        .post_form(
            &format!("/admin/packages/edit/{id}"),
            "category=Wedding&name=Gold&price=lots&features=&contact_message_template=",
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["error"], "Bad Request");

    let after = body_json(app.get("/admin/dashboard", Some(&cookie)).await).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn editing_a_missing_package_is_not_found() {
    let app = build_app();
    let cookie = app.login().await;
    let res = app
        .post_form("/admin/packages/edit/404", "category=a&name=b&price=1", Some(&cookie))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutations_without_session_do_not_touch_the_store() {
    let app = build_app();
    let res = app.post_form("/admin/packages/add", CREATE_FORM, None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/login"));

    let cookie = app.login().await;
    let dashboard = body_json(app.get("/admin/dashboard", Some(&cookie)).await).await;
    assert_eq!(dashboard["packages"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn logout_destroys_the_session() {
    let app = build_app();
    let cookie = app.login().await;

    let res = app.get("/logout", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/login"));
    assert!(set_cookie_header(&res).contains("Max-Age=0"));
    assert!(app.sessions.is_empty());

    let res = app.get("/admin/dashboard", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

/// Delegates to the in-memory store but refuses to delete.
struct UndeletableSessions(Arc<MemorySessionStore>);

#[async_trait]
impl SessionStore for UndeletableSessions {
    async fn create(&self, record: &SessionRecord) -> Result<(), ServiceError> {
        self.0.create(record).await
    }

    async fn load(&self, id: &str, now: DateTime<Utc>) -> Result<Option<SessionRecord>, ServiceError> {
        self.0.load(id, now).await
    }

    async fn delete(&self, _id: &str) -> Result<(), ServiceError> {
        Err(ServiceError::PersistenceUnavailable("connection reset".into()))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ServiceError> {
        self.0.delete_expired(now).await
    }
}

#[tokio::test]
async fn logout_reports_a_failed_session_delete() {
    let app = build_app_with_session_store(|memory| Arc::new(UndeletableSessions(memory)));
    let cookie = app.login().await;

    let res = app.get("/logout", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(set_cookie_header(&res).is_empty());
    assert_eq!(app.sessions.len(), 1);

    let res = app.get("/admin/dashboard", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
}
