pub mod handlers;
pub mod state;
pub mod views;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use self::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/urls", get(handlers::list_urls).post(handlers::create_url))
        .route("/urls/:id", get(handlers::show_url))
        .route("/urls/:id/checks", post(handlers::create_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
