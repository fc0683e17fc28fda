use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub(crate) mod handlers;
pub(crate) mod state;

use state::ApiServerState;

pub(crate) fn router(state: Arc<ApiServerState>) -> Router {
    Router::new()
        .route("/mutate", post(handlers::mutate_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .route("/readiness", get(handlers::healthz_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
