//! Streaming chat route forwarding to the QA backend.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use client::net::types::ChatRequest;

use crate::services::chat_proxy::ChatProxyError;
use crate::state::AppState;

pub(crate) fn chat_proxy_error_to_status(err: &ChatProxyError) -> StatusCode {
    match err {
        ChatProxyError::EmptyQuestion => StatusCode::BAD_REQUEST,
        ChatProxyError::Request(_) | ChatProxyError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        ChatProxyError::HttpClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `POST /api/chat/sse`: relay the upstream event stream as-is.
pub async fn chat_sse(State(state): State<AppState>, Json(body): Json<ChatRequest>) -> Response {
    match state.chat.open(&body.question).await {
        Ok(stream) => {
            tracing::info!(question_len = body.question.len(), "chat stream opened");
            (
                [(CONTENT_TYPE, "text/event-stream"), (CACHE_CONTROL, "no-cache")],
                Body::from_stream(stream),
            )
                .into_response()
        }
        Err(e) => {
            let status = chat_proxy_error_to_status(&e);
            if status.is_server_error() {
                tracing::warn!(error = %e, upstream = state.chat.upstream_url(), "chat upstream failed");
            }
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}
