pub mod admin;
pub mod auth;
pub mod events;
pub mod public;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use self::auth::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public pages, login, the guarded admin
/// panel and the static asset fallback.
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: &str) -> Router {
    // Public routes
    let public = Router::new()
        .route("/", get(public::pricelist))
        .route("/gallery", get(public::gallery))
        .route("/events", get(events::events))
        .route("/notify-new-photo", post(events::notify_new_photo))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/health", get(health));

    // Admin routes, all behind the session guard
    let admin_routes = Router::new()
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/packages/add", get(admin::add_form).post(admin::create_package))
        .route("/admin/packages/edit/:id", get(admin::edit_form).post(admin::update_package))
        .route("/admin/packages/delete/:id", post(admin::delete_package))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin_session));

    // Compose
    public
        .merge(admin_routes)
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
