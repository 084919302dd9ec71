mod support;

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use futures::StreamExt;
use http_body_util::BodyExt;
use serde_json::json;
use support::build_app;
use tokio::time::timeout;

fn notify(payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/notify-new-photo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn notify_forwards_payload_to_subscribers() {
    let app = build_app();
    let mut viewer = app.state.broadcaster.subscribe();

    let payload = json!({"filename": "IMG_0001.jpg"});
    let res = app.send(notify(&payload)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let received = timeout(Duration::from_secs(2), viewer.next()).await.unwrap().unwrap();
    assert_eq!(received, payload.to_string());
}

#[tokio::test]
async fn notify_without_viewers_still_succeeds() {
    let app = build_app();
    let res = app.send(notify(&json!({"filename": "x.jpg"}))).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn event_stream_delivers_and_unregisters_on_disconnect() {
    let app = build_app();
    assert_eq!(app.state.broadcaster.subscriber_count(), 0);

    let res = app.get("/events", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/event-stream"));
    assert_eq!(app.state.broadcaster.subscriber_count(), 1);

    app.state.broadcaster.publish(&json!({"filename": "new.jpg"}));
    let mut body = res.into_body();
    let frame = timeout(Duration::from_secs(2), body.frame()).await.unwrap().unwrap().unwrap();
    let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
    assert!(text.contains(r#"data: {"filename":"new.jpg"}"#));

    // Viewer goes away
    drop(body);
    assert_eq!(app.state.broadcaster.subscriber_count(), 0);
}

#[tokio::test]
async fn close_all_ends_open_event_streams() {
    let app = build_app();
    let res = app.get("/events", None).await;
    app.state.broadcaster.close_all();

    let mut body = res.into_body();
    let end = timeout(Duration::from_secs(2), body.frame()).await.unwrap();
    assert!(end.is_none());
}
