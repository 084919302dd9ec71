use std::{convert::Infallible, time::Duration};

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{Stream, StreamExt};

use crate::routes::auth::ServerState;

/// SSE stream of new-photo notifications. The subscription is released when
/// the client disconnects and axum drops the stream.
pub async fn events(State(state): State<ServerState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = state.broadcaster.subscribe().map(|data| Ok(Event::default().data(data)));
    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(30)).text("ping"))
}

/// Trigger from the photo ingester; the payload is forwarded untouched.
pub async fn notify_new_photo(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> StatusCode {
    state.broadcaster.publish(&payload);
    StatusCode::NO_CONTENT
}
