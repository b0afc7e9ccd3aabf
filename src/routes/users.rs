//! Account management routes over the in-memory directory.
//!
//! These endpoints are unauthenticated; access control lives in the shell's
//! route guard.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use client::net::types::{User, UserDraft, UserResponse};
use time::OffsetDateTime;

use crate::services::directory::DirectoryError;
use crate::state::AppState;

type Failure = (StatusCode, Json<UserResponse>);

pub(crate) fn directory_error_to_status(err: &DirectoryError) -> StatusCode {
    match err {
        DirectoryError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
        DirectoryError::DuplicateUsername(_) => StatusCode::CONFLICT,
        DirectoryError::EmptyUsername | DirectoryError::MissingPassword => StatusCode::BAD_REQUEST,
    }
}

/// Error envelope shared by the login and user endpoints.
pub(crate) fn directory_failure(err: &DirectoryError) -> Failure {
    let body = UserResponse { success: false, user: None, error: Some(err.to_string()) };
    (directory_error_to_status(err), Json(body))
}

fn user_ok(status: StatusCode, user: User) -> (StatusCode, Json<UserResponse>) {
    (status, Json(UserResponse { success: true, user: Some(user), error: None }))
}

/// `GET /api/users`: every account.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.directory.read().await.list())
}

/// `POST /api/users`: create an account, `201` with the stored user.
pub async fn add_user(
    State(state): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<UserResponse>), Failure> {
    let user = state
        .directory
        .write()
        .await
        .add(draft, OffsetDateTime::now_utc())
        .map_err(|e| directory_failure(&e))?;
    tracing::info!(user_id = user.id, username = %user.username, "user added");
    Ok(user_ok(StatusCode::CREATED, user))
}

/// `PUT /api/users/{id}`: replace username/role (and password when given).
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<UserResponse>), Failure> {
    let user = state
        .directory
        .write()
        .await
        .update(user_id, draft)
        .map_err(|e| directory_failure(&e))?;
    tracing::info!(user_id, role = user.role.as_str(), "user updated");
    Ok(user_ok(StatusCode::OK, user))
}

/// `DELETE /api/users/{id}`: `{success: true}` or `404`.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, Failure> {
    let removed = state.directory.write().await.delete(user_id).map_err(|e| directory_failure(&e))?;
    tracing::info!(user_id, username = %removed.username, "user deleted");
    Ok(Json(UserResponse { success: true, user: None, error: None }))
}
