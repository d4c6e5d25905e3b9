use crate::HttpState;
use crate::api_error::Result as ApiResult;

use relay_hub::EventSource;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::json;

/// POST /api/events - in-process producer entry point.
///
/// The raw body is the event payload. Accepted means handed to the hub, not
/// delivered.
pub async fn submit_event(State(state): State<HttpState>, body: Bytes) -> ApiResult<Response> {
    state
        .ingress
        .submit_bytes(&body, EventSource::Producer)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))).into_response())
}
