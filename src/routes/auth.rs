//! Login route, checked against the in-memory account directory.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use client::net::types::{LoginRequest, UserResponse};

use super::users::directory_failure;
use crate::state::AppState;

/// `POST /api/auth/login`: `200 {success, user}` or `401 {success: false, error}`.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> (StatusCode, Json<UserResponse>) {
    let username = body.username.trim();
    match state.directory.read().await.authenticate(username, &body.password) {
        Ok(user) => {
            tracing::info!(user_id = user.id, %username, role = user.role.as_str(), "login succeeded");
            (StatusCode::OK, Json(UserResponse { success: true, user: Some(user), error: None }))
        }
        Err(e) => {
            tracing::info!(%username, "login rejected");
            directory_failure(&e)
        }
    }
}
