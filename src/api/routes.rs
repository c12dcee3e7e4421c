//! API route definitions

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use super::types::*;
use crate::effects::PlaybackHandle;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Create the API router with all endpoints
pub fn create_router(playback: PlaybackHandle) -> Router {
    Router::new()
        .route("/api/animations", get(list_animations))
        .route("/api/animations/run", post(run_animation))
        .with_state(playback)
}

async fn list_animations(State(playback): State<PlaybackHandle>) -> Json<AnimationsResponse> {
    Json(AnimationsResponse {
        animations: playback.names(),
    })
}

/// The body is read raw so malformed JSON gets our error shape instead of
/// the extractor's rejection, and content type is not enforced.
async fn run_animation(
    State(playback): State<PlaybackHandle>,
    body: Bytes,
) -> ApiResult<RunAnimationResponse> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| (StatusCode::BAD_REQUEST, Json(ApiError::invalid_json())))?;

    let requested = payload
        .get("animation")
        .and_then(Value::as_str)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, Json(ApiError::missing_animation())))?;

    if !playback.request_by_name(requested) {
        tracing::info!(animation = requested, "Rejected run request for unknown animation");
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::unknown_animation(playback.names())),
        ));
    }

    tracing::info!(animation = requested, "Accepted run request");
    Ok(Json(RunAnimationResponse::accepted(
        requested,
        playback.duration_ms(),
    )))
}
