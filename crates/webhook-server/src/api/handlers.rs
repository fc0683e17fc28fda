use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mount_rewriter::AdmissionReviewResponse;
use tracing::debug;

use crate::api::state::ApiServerState;

// The body is taken as raw bytes instead of going through the Json
// extractor: a malformed review must still produce a 200 allow response,
// never an extractor rejection. Errors are encoded in the review body, not
// in the status line.
#[tracing::instrument(
    name = "mutation",
    fields(host = crate::config::HOSTNAME.as_str()),
    skip_all
)]
pub(crate) async fn mutate_handler(
    State(state): State<Arc<ApiServerState>>,
    body: Bytes,
) -> Json<AdmissionReviewResponse> {
    debug!(body_size = body.len(), "admission review received");

    Json(state.handler.handle(&body))
}

/// Liveness/readiness probe endpoint.
pub(crate) async fn healthz_handler() -> StatusCode {
    StatusCode::OK
}
